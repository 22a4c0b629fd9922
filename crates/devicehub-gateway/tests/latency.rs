#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::time::Duration;

use devicehub_gateway::latency::{LatencyConfig, LatencyMode, MAX_BASE_MS};

#[test]
fn none_never_delays() {
    assert_eq!(LatencyConfig::none().delay(), Duration::ZERO);
    let cfg = LatencyConfig {
        mode: LatencyMode::None,
        base_ms: 500,
    };
    assert_eq!(cfg.delay(), Duration::ZERO);
}

#[test]
fn fixed_delays_exactly_base() {
    assert_eq!(LatencyConfig::fixed(250).delay(), Duration::from_millis(250));
    assert_eq!(LatencyConfig::fixed(0).delay(), Duration::ZERO);
}

#[test]
fn jitter_stays_below_base_plus_a_minute_of_seconds() {
    let cfg = LatencyConfig::jitter(200);
    for _ in 0..200 {
        assert!(cfg.delay() < Duration::from_millis(200 + 60));
    }
    // base 0 still draws from the wall-clock second
    let zero = LatencyConfig::jitter(0);
    for _ in 0..200 {
        assert!(zero.delay() < Duration::from_millis(60));
    }
}

#[test]
fn base_ms_upper_bound() {
    assert!(LatencyConfig::fixed(MAX_BASE_MS).validate("latency.login").is_ok());
    let err = LatencyConfig::jitter(MAX_BASE_MS + 1)
        .validate("latency.login")
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
    assert!(err.to_string().contains("latency.login.base_ms"));
}

#[tokio::test]
async fn apply_with_none_returns_immediately() {
    let started = tokio::time::Instant::now();
    LatencyConfig::none().apply().await;
    assert!(started.elapsed() < Duration::from_millis(50));
}
