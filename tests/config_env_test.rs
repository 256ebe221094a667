//! Environment variable overrides. Kept in its own test binary because it
//! mutates process environment.

use std::env;
use std::fs;

use tempfile::TempDir;

use huffgen::config::{local_config_path, Settings};
use huffgen::domain::SingleSymbolPolicy;

#[test]
fn given_env_vars_when_load_then_override_local_config() {
    // Arrange
    let project = TempDir::new().unwrap();
    fs::write(
        local_config_path(project.path()),
        "max_code_length = 24\nsort_input = false\n",
    )
    .unwrap();
    env::set_var("XDG_CONFIG_HOME", project.path().join("xdg"));
    env::set_var("HUFFGEN_MAX_CODE_LENGTH", "8");
    env::set_var("HUFFGEN_SORT_INPUT", "true");
    env::set_var("HUFFGEN_SINGLE_SYMBOL", "reject");

    // Act
    let settings = Settings::load(Some(project.path()));

    env::remove_var("HUFFGEN_MAX_CODE_LENGTH");
    env::remove_var("HUFFGEN_SORT_INPUT");
    env::remove_var("HUFFGEN_SINGLE_SYMBOL");

    // Assert
    let settings = settings.expect("load settings");
    assert_eq!(settings.max_code_length, Some(8));
    assert!(settings.sort_input);
    assert_eq!(settings.single_symbol, SingleSymbolPolicy::Reject);

    // Invalid values surface as config errors
    env::set_var("HUFFGEN_MAX_CODE_LENGTH", "deep");
    let result = Settings::load(Some(project.path()));
    env::remove_var("HUFFGEN_MAX_CODE_LENGTH");
    assert!(result.is_err());
}
