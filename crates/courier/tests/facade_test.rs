//! Smoke tests for the facade re-exports.

use courier::{
    AuthSpec, ClientConfig, Credential, Dispatch, RateLimit, RetryPolicy, WebhookRouter,
    WebhookVerifier,
};
use std::time::Duration;

#[test]
fn test_client_config_builds_through_facade() {
    let config = ClientConfig::new(
        "acme",
        "https://api.acme.test",
        Credential::new("tok").unwrap(),
    )
    .unwrap()
    .with_auth(AuthSpec::header("x-acme-key"))
    .with_rate_limit(RateLimit::fixed_delay(Duration::from_millis(100)))
    .with_retry(RetryPolicy::new(2));

    assert_eq!(config.service(), "acme");
    assert_eq!(config.retry().max_retries, 2);
}

#[test]
fn test_webhook_flow_through_facade() {
    let verifier = WebhookVerifier::sha256("secret");
    let mut router = WebhookRouter::new().with_verifier(verifier.clone());
    router.on("invoice.paid", |_| {});

    let body = br#"{"event_type": "invoice.paid"}"#;
    let signature = verifier.sign(body);

    let outcome = router.dispatch(body, Some(&signature)).unwrap();
    assert_eq!(
        outcome,
        Dispatch::Handled {
            event_type: "invoice.paid".to_string()
        }
    );
}
