use crate::{
    affinity, auth_http, blue_green, cors,
    diagnostics::{Diagnostics, RouteLog},
    oauth, rewrite, waf, whitelist,
};
use ingress_backend_resolver_core::{
    BackendConfig, ClusterCache, DirectiveSet, RouteSource, RouteTable, UserlistStore,
};

/// Applies a route's directives to its backend configuration.
///
/// An updater is created for one reconciliation pass. It borrows the cluster snapshot and the
/// pass's registry, which it updates as userlists are first referenced.
pub struct Updater<'a, R> {
    cache: &'a dyn ClusterCache,
    registry: &'a mut R,
    diagnostics: &'a dyn Diagnostics,
}

/// The state each resolver operates on.
pub(crate) struct BackendData<'a> {
    pub(crate) directives: &'a DirectiveSet,
    pub(crate) backend: &'a mut BackendConfig,
    pub(crate) log: RouteLog<'a>,
}

// === impl Updater ===

impl<'a, R> Updater<'a, R>
where
    R: UserlistStore + RouteTable,
{
    pub fn new(
        cache: &'a dyn ClusterCache,
        registry: &'a mut R,
        diagnostics: &'a dyn Diagnostics,
    ) -> Self {
        Self {
            cache,
            registry,
            diagnostics,
        }
    }

    /// Runs every resolver, in order, against `backend`.
    ///
    /// Resolvers are independent: a directive that cannot be applied does not prevent the
    /// remaining ones from being applied.
    pub fn update_backend(
        &mut self,
        source: &RouteSource,
        directives: &DirectiveSet,
        backend: &mut BackendConfig,
    ) {
        let _span = tracing::debug_span!("backend", route = %source).entered();

        let mut d = BackendData {
            directives,
            backend,
            log: RouteLog::new(source, self.diagnostics),
        };

        affinity::build(&mut d);
        auth_http::build(&mut d, self.cache, &mut *self.registry);
        blue_green::build(&mut d, self.cache);
        cors::build(&mut d);
        oauth::build(&mut d, &*self.registry);
        rewrite::build(&mut d);
        waf::build(&mut d);
        whitelist::build(&mut d);
    }
}
