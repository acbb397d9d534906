use super::*;
use ingress_backend_resolver_core::Cors;

fn enabled() -> DirectiveSet {
    DirectiveSet {
        cors_enable: true,
        ..Default::default()
    }
}

#[test]
fn disabled() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        cors_allow_origin: "https://example.com".into(),
        ..Default::default()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(backend.cors, Cors::default());
    test.assert_logging(&[]);
}

#[test]
fn defaults() {
    let mut test = TestConfig::default();
    let backend = test.update(&enabled(), vec![]);
    assert_eq!(
        backend.cors,
        Cors {
            enabled: true,
            allow_origin: "*".into(),
            allow_headers: "DNT,X-CustomHeader,Keep-Alive,User-Agent,X-Requested-With,If-Modified-Since,Cache-Control,Content-Type,Authorization".into(),
            allow_methods: "GET, PUT, POST, DELETE, PATCH, OPTIONS".into(),
            allow_credentials: false,
            max_age: 86400,
            expose_headers: None,
        }
    );
    test.assert_logging(&[]);
}

#[test]
fn declared_values() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        cors_allow_origin: "https://example.com:8443".into(),
        cors_allow_headers: "X-Custom, Authorization".into(),
        cors_allow_methods: "GET,POST".into(),
        cors_allow_credentials: true,
        cors_max_age: 600,
        cors_expose_headers: "X-Request-Id".into(),
        ..enabled()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(
        backend.cors,
        Cors {
            enabled: true,
            allow_origin: "https://example.com:8443".into(),
            allow_headers: "X-Custom, Authorization".into(),
            allow_methods: "GET,POST".into(),
            allow_credentials: true,
            max_age: 600,
            expose_headers: Some("X-Request-Id".into()),
        }
    );
    test.assert_logging(&[]);
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        cors_allow_origin: "javascript:alert(1)".into(),
        cors_allow_headers: "X-Custom;rm".into(),
        cors_allow_methods: "GET,P0ST".into(),
        cors_max_age: -1,
        cors_expose_headers: "X-Request;id".into(),
        ..enabled()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(backend.cors.allow_origin, "*");
    assert_eq!(
        backend.cors.allow_methods,
        "GET, PUT, POST, DELETE, PATCH, OPTIONS"
    );
    assert!(backend.cors.allow_headers.starts_with("DNT,"));
    assert_eq!(backend.cors.max_age, 86400);
    assert_eq!(backend.cors.expose_headers, None);
    test.assert_logging(&[
        "WARN ignoring invalid cors allow-origin 'javascript:alert(1)' on ingress 'default/ing1'",
        "WARN ignoring invalid cors allow-headers 'X-Custom;rm' on ingress 'default/ing1'",
        "WARN ignoring invalid cors allow-methods 'GET,P0ST' on ingress 'default/ing1'",
        "WARN ignoring invalid cors expose-headers 'X-Request;id' on ingress 'default/ing1'",
    ]);
}

#[test]
fn separators_must_be_ascii_whitespace() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        cors_allow_methods: "GET,\u{a0}POST".into(),
        cors_allow_headers: "X-A,\u{2028}X-B".into(),
        cors_expose_headers: "X-A,\tX-B".into(),
        ..enabled()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(
        backend.cors.allow_methods,
        "GET, PUT, POST, DELETE, PATCH, OPTIONS"
    );
    assert!(backend.cors.allow_headers.starts_with("DNT,"));
    assert_eq!(backend.cors.expose_headers.as_deref(), Some("X-A,\tX-B"));
    test.assert_logging(&[
        "WARN ignoring invalid cors allow-headers 'X-A,\u{2028}X-B' on ingress 'default/ing1'",
        "WARN ignoring invalid cors allow-methods 'GET,\u{a0}POST' on ingress 'default/ing1'",
    ]);
}
