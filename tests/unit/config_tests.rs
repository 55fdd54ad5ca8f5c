use std::io::Write;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use letterboard::{config::GlobalConfig, AppError};

fn sample_toml() -> &'static str {
    r#"
host = "0.0.0.0"
http_port = 8080
lines_port = 8081
event_buffer = 64
rng_seed = 1234

[round]
round_seconds = 300
break_seconds = 30
initial_letters = 20
tick_millis = 500
"#
}

#[test]
fn empty_config_uses_defaults() {
    let config = GlobalConfig::from_toml_str("").expect("defaults");

    assert_eq!(config, GlobalConfig::default());
    assert_eq!(config.host, IpAddr::V4(Ipv4Addr::LOCALHOST));
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.lines_port, None);
    assert_eq!(config.event_buffer, 256);
    assert_eq!(config.rng_seed, None);
    assert_eq!(config.round.round_seconds, 600);
    assert_eq!(config.round.break_seconds, 60);
    assert_eq!(config.round.initial_letters, 12);
    assert_eq!(config.round.tick_interval(), Duration::from_secs(1));
}

#[test]
fn parses_full_config() {
    let config = GlobalConfig::from_toml_str(sample_toml()).expect("valid config");

    assert_eq!(config.http_addr().to_string(), "0.0.0.0:8080");
    assert_eq!(
        config.lines_addr().map(|a| a.to_string()),
        Some("0.0.0.0:8081".to_owned())
    );
    assert_eq!(config.event_buffer, 64);
    assert_eq!(config.rng_seed, Some(1234));
    assert_eq!(config.round.round_seconds, 300);
    assert_eq!(config.round.break_seconds, 30);
    assert_eq!(config.round.initial_letters, 20);
    assert_eq!(config.round.tick_interval(), Duration::from_millis(500));
}

#[test]
fn partial_round_section_keeps_other_defaults() {
    let config = GlobalConfig::from_toml_str("[round]\nbreak_seconds = 5\n").expect("valid");
    assert_eq!(config.round.break_seconds, 5);
    assert_eq!(config.round.round_seconds, 600);
    assert_eq!(config.round.initial_letters, 12);
}

#[test]
fn load_from_path_reads_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(sample_toml().as_bytes()).expect("write");

    let config = GlobalConfig::load_from_path(file.path()).expect("load");
    assert_eq!(config.http_port, 8080);
}

#[test]
fn missing_file_is_config_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let result = GlobalConfig::load_from_path(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("failed to read config")));
}

#[test]
fn invalid_toml_is_config_error() {
    let result = GlobalConfig::from_toml_str("http_port = \"not a number\"");
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.starts_with("invalid config")));
}

#[test]
fn rejects_zero_durations() {
    for (field, expected) in [
        ("round_seconds", "round.round_seconds"),
        ("break_seconds", "round.break_seconds"),
        ("tick_millis", "round.tick_millis"),
    ] {
        let raw = format!("[round]\n{field} = 0\n");
        let result = GlobalConfig::from_toml_str(&raw);
        assert!(
            matches!(result, Err(AppError::Config(ref msg)) if msg.contains(expected)),
            "{field}: {result:?}"
        );
    }
}

#[test]
fn rejects_letter_count_outside_alphabet() {
    for count in [0, 27] {
        let raw = format!("[round]\ninitial_letters = {count}\n");
        let result = GlobalConfig::from_toml_str(&raw);
        assert!(
            matches!(result, Err(AppError::Config(ref msg)) if msg.contains("initial_letters")),
            "{count}: {result:?}"
        );
    }
    assert!(GlobalConfig::from_toml_str("[round]\ninitial_letters = 26\n").is_ok());
}

#[test]
fn rejects_zero_event_buffer() {
    let result = GlobalConfig::from_toml_str("event_buffer = 0");
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("event_buffer")));
}

#[test]
fn rejects_shared_fixed_port() {
    let result = GlobalConfig::from_toml_str("http_port = 4000\nlines_port = 4000\n");
    assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("lines_port")));
}

#[test]
fn allows_ephemeral_ports_for_both_listeners() {
    let config = GlobalConfig::from_toml_str("http_port = 0\nlines_port = 0\n").expect("valid");
    assert_eq!(config.lines_port, Some(0));
}
