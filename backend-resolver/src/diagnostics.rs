use ingress_backend_resolver_core::RouteSource;
use std::fmt;

/// Receives the operator-facing messages produced while resolving a route.
///
/// Message texts are consumed by operator tooling, so their wording is kept stable.
pub trait Diagnostics {
    /// A directive could not be applied at all.
    fn error(&self, route: &RouteSource, message: fmt::Arguments<'_>);

    /// An item of a directive was dropped or replaced with a default.
    fn warn(&self, route: &RouteSource, message: fmt::Arguments<'_>);

    /// A notice that never changes the produced configuration, shown at `verbosity` and above.
    fn info_v(&self, verbosity: u8, route: &RouteSource, message: fmt::Arguments<'_>);
}

/// Emits diagnostics as `tracing` events.
#[derive(Clone, Debug, Default)]
pub struct TracingDiagnostics {
    verbosity: u8,
}

/// Binds a diagnostics sink to the route being resolved.
#[derive(Clone, Copy)]
pub(crate) struct RouteLog<'a> {
    source: &'a RouteSource,
    sink: &'a dyn Diagnostics,
}

// === impl TracingDiagnostics ===

impl TracingDiagnostics {
    pub fn new(verbosity: u8) -> Self {
        Self { verbosity }
    }
}

impl Diagnostics for TracingDiagnostics {
    fn error(&self, route: &RouteSource, message: fmt::Arguments<'_>) {
        tracing::error!(%route, "{message}");
    }

    fn warn(&self, route: &RouteSource, message: fmt::Arguments<'_>) {
        tracing::warn!(%route, "{message}");
    }

    fn info_v(&self, verbosity: u8, route: &RouteSource, message: fmt::Arguments<'_>) {
        if verbosity <= self.verbosity {
            tracing::info!(%route, "{message}");
        } else {
            tracing::trace!(%route, verbosity, "{message}");
        }
    }
}

// === impl RouteLog ===

impl<'a> RouteLog<'a> {
    pub(crate) fn new(source: &'a RouteSource, sink: &'a dyn Diagnostics) -> Self {
        Self { source, sink }
    }

    pub(crate) fn source(&self) -> &'a RouteSource {
        self.source
    }

    pub(crate) fn error(&self, message: fmt::Arguments<'_>) {
        self.sink.error(self.source, message)
    }

    pub(crate) fn warn(&self, message: fmt::Arguments<'_>) {
        self.sink.warn(self.source, message)
    }

    pub(crate) fn info_v(&self, verbosity: u8, message: fmt::Arguments<'_>) {
        self.sink.info_v(verbosity, self.source, message)
    }
}
