use super::*;
use ingress_backend_resolver_core::{Cookie, CookieStrategy};

fn cookie(name: &str, strategy: CookieStrategy, dynamic: bool) -> Option<Cookie> {
    Some(Cookie {
        name: name.to_string(),
        strategy,
        dynamic,
    })
}

#[test]
fn unset() {
    let mut test = TestConfig::default();
    let backend = test.update(&DirectiveSet::default(), vec![]);
    assert_eq!(backend.cookie, None);
    test.assert_logging(&[]);
}

#[test]
fn unsupported_type() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        affinity: "no".into(),
        ..Default::default()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(backend.cookie, None);
    test.assert_logging(&["ERROR unsupported affinity type on ingress 'default/ing1': no"]);
}

#[test]
fn cookie_defaults() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        affinity: "cookie".into(),
        ..Default::default()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(
        backend.cookie,
        cookie("INGRESSCOOKIE", CookieStrategy::Insert, false)
    );
    test.assert_logging(&[]);
}

#[test]
fn cookie_name() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        affinity: "cookie".into(),
        session_cookie_name: "ing".into(),
        ..Default::default()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(backend.cookie, cookie("ing", CookieStrategy::Insert, false));
    test.assert_logging(&[]);
}

#[test]
fn invalid_strategy_falls_back_to_insert() {
    let mut test = TestConfig::default();
    let ann = DirectiveSet {
        affinity: "cookie".into(),
        session_cookie_strategy: "err".into(),
        ..Default::default()
    };
    let backend = test.update(&ann, vec![]);
    assert_eq!(
        backend.cookie,
        cookie("INGRESSCOOKIE", CookieStrategy::Insert, false)
    );
    test.assert_logging(&[
        "WARN invalid affinity cookie strategy 'err' on ingress 'default/ing1', using 'insert' instead",
    ]);
}

#[test]
fn strategies() {
    for (strategy, dynamic, expected) in [
        ("rewrite", false, CookieStrategy::Rewrite),
        ("prefix", true, CookieStrategy::Prefix),
        ("insert", true, CookieStrategy::Insert),
    ] {
        let mut test = TestConfig::default();
        let ann = DirectiveSet {
            affinity: "cookie".into(),
            session_cookie_strategy: strategy.into(),
            session_cookie_dynamic: dynamic,
            ..Default::default()
        };
        let backend = test.update(&ann, vec![]);
        assert_eq!(
            backend.cookie,
            cookie("INGRESSCOOKIE", expected, dynamic),
            "strategy {strategy}"
        );
        test.assert_logging(&[]);
    }
}
