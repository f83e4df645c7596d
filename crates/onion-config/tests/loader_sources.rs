//! Loading configuration from files, `.env` files and the environment.
//!
//! Each test uses its own environment prefix so tests can run in parallel.

use onion_config::{ConfigError, ConfigLoader};
use onion_core::{Args, Terminal, Value};
use onion_pipeline::{fixtures, ParameterDelivery, Position};
use onion_telemetry::LogFormat;
use std::io::Write;

const PIPELINE_TOML: &str = r#"
[pipeline]
required_capability = "middleware"
parameter_setter = "set_parameters"

[[pipeline.layers]]
id = "setter-separator"
parameters = { separator = "_" }

[logging]
level = "debug"
format = "pretty"
"#;

fn write_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_toml_file_builds_working_pipeline() {
    let file = write_file(".toml", PIPELINE_TOML);

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(
        config.pipeline.parameter_delivery(),
        ParameterDelivery::setter("set_parameters")
    );

    let pipeline = config.build_pipeline(fixtures::container());
    let greet = Terminal::callable(|_| Ok(Value::from("hello, world!")));
    assert_eq!(pipeline.call(greet, Args::new()).unwrap(), "hello,_world!");
}

#[test]
fn test_json_file() {
    let file = write_file(
        ".json",
        r#"{
            "pipeline": {
                "layers": [
                    {"id": "framing", "parameters": {"tag": "1"}},
                    {"id": "separator", "parameters": {"separator": "_"}}
                ]
            }
        }"#,
    );

    let config = ConfigLoader::new().with_file(file.path()).unwrap().load().unwrap();
    assert_eq!(config.pipeline.layers.len(), 2);
    assert_eq!(config.pipeline.layers[1].position, Position::Inner);

    let pipeline = config.build_pipeline(fixtures::container());
    let greet = Terminal::callable(|_| Ok(Value::from("hello, world!")));
    assert_eq!(pipeline.call(greet, Args::new()).unwrap(), "1Bhello,_world!1A");
}

#[test]
fn test_unsupported_extension() {
    let file = write_file(".yaml", "pipeline: {}");
    let result = ConfigLoader::new().with_file(file.path());
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn test_optional_file_present() {
    let file = write_file(".toml", "[pipeline]\nterminal_method = \"execute\"\n");

    let config = ConfigLoader::new()
        .with_optional_file(file.path())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(config.pipeline.terminal_method, "execute");
}

#[test]
fn test_env_overrides_file() {
    let file = write_file(".toml", PIPELINE_TOML);
    std::env::set_var("ONION_TEST_ENV__PIPELINE__PARAMETER_SETTER", "");
    std::env::set_var("ONION_TEST_ENV__LOGGING__FORMAT", "json");

    let config = ConfigLoader::new()
        .with_file(file.path())
        .unwrap()
        .with_env_prefix("onion_test_env")
        .load()
        .unwrap();

    assert_eq!(config.pipeline.parameter_delivery(), ParameterDelivery::Constructor);
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_env_override_parse_failure() {
    std::env::set_var("ONION_TEST_BAD__LOGGING__ENABLED", "perhaps");

    let result = ConfigLoader::new().with_env_prefix("ONION_TEST_BAD").load();
    assert!(matches!(result, Err(ConfigError::EnvParseError { .. })));
}

#[test]
fn test_env_override_fails_validation() {
    std::env::set_var("ONION_TEST_INVALID__PIPELINE__TERMINAL_METHOD", "");

    let result = ConfigLoader::new().with_env_prefix("ONION_TEST_INVALID").load();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn test_dotenv_file() {
    let env_file = write_file(
        ".env",
        "ONION_TEST_DOTENV__PIPELINE__TERMINAL_METHOD=execute\n\
         ONION_TEST_DOTENV__PIPELINE__REQUIRED_CAPABILITY=middleware\n",
    );

    let config = ConfigLoader::new()
        .with_dotenv_file(env_file.path())
        .unwrap()
        .with_env_prefix("ONION_TEST_DOTENV")
        .load()
        .unwrap();

    assert_eq!(config.pipeline.terminal_method, "execute");
    assert_eq!(config.pipeline.required_capability.as_deref(), Some("middleware"));
}

#[test]
fn test_dotenv_file_missing() {
    let result = ConfigLoader::new().with_dotenv_file("/nonexistent/.env");
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}
