use crate::updater::BackendData;
use ingress_backend_resolver_core::{BackendRef, OAuthConfig, RouteTable};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

const OAUTH2_PROXY: &str = "oauth2_proxy";
const DEFAULT_URI_PREFIX: &str = "/oauth2";
const DEFAULT_HEADERS: &str = "X-Auth-Request-Email:auth_response_email";

static HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9-]+:[A-Za-z0-9_-]+$").expect("must compile"));

/// Delegates authentication to an oauth2_proxy instance routed on the same namespace.
pub(crate) fn build(d: &mut BackendData<'_>, routes: &dyn RouteTable) {
    let ann = d.directives;
    let src = d.log.source();
    match ann.oauth.as_str() {
        "" => return,
        OAUTH2_PROXY => {}
        implementation => {
            d.log.warn(format_args!(
                "ignoring invalid oauth implementation '{implementation}' on {src}"
            ));
            return;
        }
    }

    let uri_prefix = match ann.oauth_uri_prefix.as_str() {
        "" => DEFAULT_URI_PREFIX,
        prefix => prefix,
    }
    .trim_end_matches('/');
    let namespace = &src.namespace;
    let Some(backend) = find_backend(routes, namespace, uri_prefix) else {
        d.log.error(format_args!(
            "path '{uri_prefix}' was not found on namespace '{namespace}'"
        ));
        return;
    };

    let headers = match ann.oauth_headers.as_str() {
        "" => DEFAULT_HEADERS,
        headers => headers,
    };
    let headers = headers
        .split(',')
        .filter(|h| !h.is_empty())
        .filter_map(|header| {
            if !HEADER.is_match(header) {
                d.log.warn(format_args!(
                    "invalid header format '{header}' on {src}"
                ));
                return None;
            }
            header
                .split_once(':')
                .map(|(name, attr)| (name.to_string(), attr.to_string()))
        })
        .collect::<BTreeMap<_, _>>();

    d.backend.oauth = Some(OAuthConfig {
        implementation: OAUTH2_PROXY.to_string(),
        backend_name: backend.id(),
        uri_prefix: uri_prefix.to_string(),
        headers,
    });
}

/// Finds the backend routed at `uri_prefix`, ignoring trailing slashes, within `namespace`.
fn find_backend<'r>(
    routes: &'r dyn RouteTable,
    namespace: &str,
    uri_prefix: &str,
) -> Option<&'r BackendRef> {
    routes
        .hosts()
        .iter()
        .flat_map(|host| host.paths.iter())
        .find(|path| {
            path.path.trim_end_matches('/') == uri_prefix && path.backend.namespace == namespace
        })
        .map(|path| &path.backend)
}
