use graft_base::{Config, Tracing};

#[test]
fn test_tracing_init() {
    // An invalid directive is rejected before any install attempt.
    let bad = Config::parse(r#"{"tracing": {"directives": ["!!!"]}}"#).unwrap();
    assert!(Tracing::init(&bad).is_err());

    let config =
        Config::parse(r#"{"tracing": {"level": "debug", "directives": ["graft=info"]}}"#).unwrap();
    Tracing::init(&config).unwrap();

    // The global subscriber is already installed now.
    assert!(Tracing::init(&config).is_err());

    tracing::debug!("Subscriber installed");
}
