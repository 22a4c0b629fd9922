#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::time::Duration;

use devicehub_gateway::obs::DeviceHubMetrics;

#[test]
fn renders_every_family_with_help_and_type() {
    let m = DeviceHubMetrics::new();
    let out = m.render();
    for (name, kind) in [
        ("myapp_connected_devices", "gauge"),
        ("myapp_info", "gauge"),
        ("myapp_device_upgrade_total", "counter"),
        ("myapp_request_duration_seconds", "histogram"),
        ("myapp_login_request_duration_seconds", "summary"),
    ] {
        assert!(out.contains(&format!("# TYPE {name} {kind}\n")), "{name}: {out}");
        assert!(out.contains(&format!("# HELP {name} ")), "{name}");
    }
}

#[test]
fn gauges_and_counters() {
    let m = DeviceHubMetrics::new();
    m.devices.set(3);
    m.info.set(&[("version", "2.10.5")], 1);
    m.upgrades.inc(&[("type", "router")]);
    m.upgrades.inc(&[("type", "router")]);

    let out = m.render();
    assert!(out.contains("myapp_connected_devices 3\n"));
    assert!(out.contains("myapp_info{version=\"2.10.5\"} 1\n"));
    assert!(out.contains("myapp_device_upgrade_total{type=\"router\"} 2\n"));
    assert_eq!(m.upgrades.get(&[("type", "router")]), 2);
}

#[test]
fn histogram_buckets_are_cumulative_in_seconds() {
    let m = DeviceHubMetrics::new();
    let labels = [("method", "GET"), ("status", "200")];
    m.duration.observe(&labels, Duration::from_millis(50));
    m.duration.observe(&labels, Duration::from_millis(180));
    m.duration.observe(&labels, Duration::from_millis(400));

    let out = m.render();
    let series = "myapp_request_duration_seconds";
    let labels_str = "method=\"GET\",status=\"200\"";
    let bucket = |le: &str, n: u64| format!("{series}_bucket{{{labels_str},le=\"{le}\"}} {n}\n");
    for (le, n) in [("0.1", 1), ("0.15", 1), ("0.2", 2), ("0.25", 2), ("0.3", 2), ("+Inf", 3)] {
        assert!(out.contains(&bucket(le, n)), "le={le}: {out}");
    }
    assert!(out.contains(&format!("{series}_sum{{{labels_str}}} 0.63\n")));
    assert!(out.contains(&format!("{series}_count{{{labels_str}}} 3\n")));
    assert_eq!(m.duration.count(&labels), 3);
}

#[test]
fn summary_quantiles() {
    let m = DeviceHubMetrics::new();
    assert_eq!(m.login_duration.quantile(0.5), None);
    assert!(m
        .render()
        .contains("myapp_login_request_duration_seconds{quantile=\"0.5\"} NaN\n"));

    for ms in 1..=100 {
        m.login_duration.observe(Duration::from_millis(ms));
    }
    assert_eq!(m.login_duration.count(), 100);
    assert_eq!(m.login_duration.quantile(0.5), Some(0.05));
    assert_eq!(m.login_duration.quantile(0.9), Some(0.09));
    assert_eq!(m.login_duration.quantile(0.99), Some(0.099));

    let out = m.render();
    assert!(out.contains("myapp_login_request_duration_seconds{quantile=\"0.9\"} 0.09\n"));
    assert!(out.contains("myapp_login_request_duration_seconds_count 100\n"));
}
