//! Config file resolution. A single test owns `DEVICEHUB_CONFIG` so nothing
//! else in this binary races on the process environment.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use devicehub_gateway::config::{self, CONFIG_ENV, DEFAULT_CONFIG_PATH};

#[test]
fn missing_file_is_an_error() {
    let err = config::load_from_file("/nonexistent/devicehub.yaml").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");
    assert!(err.to_string().contains("/nonexistent/devicehub.yaml"));
}

#[test]
fn load_resolves_env_then_default_path() {
    // tests run from the crate directory, which has no devicehub.yaml
    assert!(!Path::new(DEFAULT_CONFIG_PATH).exists());

    std::env::remove_var(CONFIG_ENV);
    let cfg = config::load().expect("defaults");
    assert_eq!(cfg.app.version, "2.10.5");
    assert_eq!(cfg.seed_devices.len(), 2);

    let path = std::env::temp_dir().join(format!("devicehub-{}.yaml", std::process::id()));
    fs::write(&path, "version: 1\napp:\n  version: \"9.0.0\"\n").unwrap();
    std::env::set_var(CONFIG_ENV, &path);
    let cfg = config::load().expect("env file");
    assert_eq!(cfg.app.version, "9.0.0");
    fs::remove_file(&path).unwrap();

    // an explicitly named file must exist
    let err = config::load().expect_err("removed file must fail");
    assert_eq!(err.client_code().as_str(), "INTERNAL");

    std::env::remove_var(CONFIG_ENV);
}
