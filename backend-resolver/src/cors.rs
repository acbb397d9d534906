use crate::updater::BackendData;
use ingress_backend_resolver_core::Cors;
use once_cell::sync::Lazy;
use regex::Regex;

const DEFAULT_ALLOW_ORIGIN: &str = "*";
const DEFAULT_ALLOW_HEADERS: &str =
    "DNT,X-CustomHeader,Keep-Alive,User-Agent,X-Requested-With,If-Modified-Since,Cache-Control,Content-Type,Authorization";
const DEFAULT_ALLOW_METHODS: &str = "GET, PUT, POST, DELETE, PATCH, OPTIONS";
const DEFAULT_MAX_AGE: i64 = 86400;

static ORIGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://[A-Za-z0-9.-]*(:[0-9]+)?|\*)?$").expect("must compile"));
// Separators are ASCII whitespace only.
static METHODS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z]+,?[\t\n\f\r ]?)+$").expect("must compile"));
static HEADERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z0-9_-]+,?[\t\n\f\r ]?)+$").expect("must compile"));

/// Configures the cross-origin policy, replacing each rejected field with its default.
pub(crate) fn build(d: &mut BackendData<'_>) {
    let ann = d.directives;
    if !ann.cors_enable {
        return;
    }

    let allow_origin = validated(d, "allow-origin", &ann.cors_allow_origin, &ORIGIN)
        .unwrap_or(DEFAULT_ALLOW_ORIGIN);
    let allow_headers = validated(d, "allow-headers", &ann.cors_allow_headers, &HEADERS)
        .unwrap_or(DEFAULT_ALLOW_HEADERS);
    let allow_methods = validated(d, "allow-methods", &ann.cors_allow_methods, &METHODS)
        .unwrap_or(DEFAULT_ALLOW_METHODS);
    let expose_headers = validated(d, "expose-headers", &ann.cors_expose_headers, &HEADERS);
    let max_age = if ann.cors_max_age > 0 {
        ann.cors_max_age
    } else {
        DEFAULT_MAX_AGE
    };

    d.backend.cors = Cors {
        enabled: true,
        allow_origin: allow_origin.to_string(),
        allow_headers: allow_headers.to_string(),
        allow_methods: allow_methods.to_string(),
        allow_credentials: ann.cors_allow_credentials,
        max_age,
        expose_headers: expose_headers.map(str::to_string),
    };
}

/// Returns `value` if it is set and matches `re`. A value that is set but rejected is reported.
fn validated<'v>(
    d: &BackendData<'_>,
    field: &str,
    value: &'v str,
    re: &Regex,
) -> Option<&'v str> {
    if value.is_empty() {
        return None;
    }
    if !re.is_match(value) {
        let src = d.log.source();
        d.log.warn(format_args!(
            "ignoring invalid cors {field} '{value}' on {src}"
        ));
        return None;
    }
    Some(value)
}
