use crate::updater::BackendData;
use ingress_backend_resolver_core::{Cookie, CookieStrategy};

const DEFAULT_COOKIE_NAME: &str = "INGRESSCOOKIE";

/// Configures cookie based session affinity.
pub(crate) fn build(d: &mut BackendData<'_>) {
    let ann = d.directives;
    let src = d.log.source();
    match ann.affinity.as_str() {
        "cookie" => {}
        "" => return,
        affinity => {
            d.log.error(format_args!(
                "unsupported affinity type on {src}: {affinity}"
            ));
            return;
        }
    }

    let name = match ann.session_cookie_name.as_str() {
        "" => DEFAULT_COOKIE_NAME,
        name => name,
    };

    let strategy = match ann.session_cookie_strategy.as_str() {
        "" => CookieStrategy::default(),
        strategy => strategy.parse().unwrap_or_else(|_| {
            d.log.warn(format_args!(
                "invalid affinity cookie strategy '{strategy}' on {src}, using 'insert' instead"
            ));
            CookieStrategy::Insert
        }),
    };

    d.backend.cookie = Some(Cookie {
        name: name.to_string(),
        strategy,
        dynamic: ann.session_cookie_dynamic,
    });
}
