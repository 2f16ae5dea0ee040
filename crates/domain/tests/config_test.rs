use dnstap_gen_domain::{
    CliOverrides, CollectorTarget, Config, ConfigError, FailurePolicy, GeneratorError, NameSource,
    RecordType, TransportKind,
};
use std::io::Write;
use std::time::Duration;

#[test]
fn test_defaults_match_documented_values() {
    let config = Config::default();

    assert_eq!(config.generator.count, 1);
    assert_eq!(config.generator.connections, 1);
    assert_eq!(config.generator.domain_min, 10);
    assert_eq!(config.generator.domain_max, 60);
    assert_eq!(config.target.transport, TransportKind::Tcp);
    assert_eq!(config.target.address, "127.0.0.1");
    assert_eq!(config.target.port, 6000);
    assert_eq!(config.target.handshake_timeout_secs, 5);
    assert!(!config.generator.skip_queries);
    assert!(!config.generator.skip_replies);
    assert_eq!(config.generator.on_error, FailurePolicy::FailFast);
    assert!(config.validate().is_ok());
}

#[test]
fn test_to_load_config_resolves_random_template() {
    let config = Config::default();
    let load = config.to_load_config().unwrap();

    assert_eq!(
        load.target,
        CollectorTarget::Tcp {
            host: "127.0.0.1".into(),
            port: 6000
        }
    );
    assert_eq!(
        load.template.name,
        NameSource::Random {
            min_len: 10,
            max_len: 60
        }
    );
    assert_eq!(load.template.record_type, None);
    assert_eq!(&*load.identity, "dnstap-generator");
    assert_eq!(&*load.version, "-");
    assert_eq!(load.handshake_timeout, Duration::from_secs(5));
    assert_eq!(load.frames_per_connection(), 2);
}

#[test]
fn test_fixed_name_and_type_override_random_generation() {
    let overrides = CliOverrides {
        qname: Some("example.org.".to_string()),
        qtype: Some("aaaa".to_string()),
        // bounds that would be rejected in random mode are ignored here
        domain_min: Some(0),
        domain_max: Some(200),
        ..Default::default()
    };
    let config = Config::load(None, overrides).unwrap();
    let load = config.to_load_config().unwrap();

    assert_eq!(load.template.name, NameSource::Fixed("example.org.".into()));
    assert_eq!(load.template.record_type, Some(RecordType::AAAA));
}

#[test]
fn test_both_suppression_flags_rejected() {
    let overrides = CliOverrides {
        skip_queries: true,
        skip_replies: true,
        count: Some(3),
        ..Default::default()
    };
    let config = Config::load(None, overrides).unwrap();

    let err = config.to_load_config().unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));

    let generator_err: GeneratorError = err.into();
    assert!(matches!(generator_err, GeneratorError::Configuration(_)));
}

#[test]
fn test_both_suppression_flags_allowed_with_zero_count() {
    let overrides = CliOverrides {
        skip_queries: true,
        skip_replies: true,
        count: Some(0),
        ..Default::default()
    };
    let config = Config::load(None, overrides).unwrap();
    let load = config.to_load_config().unwrap();
    assert_eq!(load.frames_per_connection(), 0);
}

#[test]
fn test_single_side_frames_per_connection() {
    let overrides = CliOverrides {
        skip_replies: true,
        count: Some(5),
        ..Default::default()
    };
    let load = Config::load(None, overrides)
        .unwrap()
        .to_load_config()
        .unwrap();
    assert_eq!(load.frames_per_connection(), 5);
}

#[test]
fn test_invalid_domain_bounds_rejected() {
    let mut config = Config::default();
    config.generator.domain_min = 20;
    config.generator.domain_max = 10;
    assert!(config.validate().is_err());

    config.generator.domain_min = 0;
    config.generator.domain_max = 10;
    assert!(config.validate().is_err());

    config.generator.domain_min = 10;
    config.generator.domain_max = 64;
    assert!(config.validate().is_err());

    config.generator.domain_max = 63;
    assert!(config.validate().is_ok());
}

#[test]
fn test_unsupported_qtype_rejected() {
    let mut config = Config::default();
    config.generator.qtype = Some("MX".to_string());

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("MX"));
}

#[test]
fn test_zero_connections_rejected() {
    let mut config = Config::default();
    config.generator.connections = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_zero_port_rejected_for_tcp_only() {
    let mut config = Config::default();
    config.target.port = 0;
    assert!(config.validate().is_err());

    config.target.transport = TransportKind::Unix;
    config.target.address = "/var/run/dnstap.sock".to_string();
    assert!(config.validate().is_ok());
    assert_eq!(
        config.collector_target(),
        CollectorTarget::Unix {
            path: "/var/run/dnstap.sock".into()
        }
    );
}

#[test]
fn test_seed_override_is_kept() {
    let overrides = CliOverrides {
        seed: Some(42),
        ..Default::default()
    };
    let load = Config::load(None, overrides)
        .unwrap()
        .to_load_config()
        .unwrap();
    assert_eq!(load.seed, 42);
}

#[test]
fn test_partial_toml_uses_defaults() {
    let config = Config::from_toml(
        r#"
        [target]
        port = 6001

        [generator]
        count = 1000
        connections = 8
        on_error = "isolate"
        "#,
    )
    .unwrap();

    assert_eq!(config.target.port, 6001);
    assert_eq!(config.target.address, "127.0.0.1");
    assert_eq!(config.generator.count, 1000);
    assert_eq!(config.generator.connections, 8);
    assert_eq!(config.generator.domain_max, 60);
    assert_eq!(config.generator.on_error, FailurePolicy::Isolate);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_load_from_file_then_cli_wins() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[target]\ntransport = \"tcp\"\nport = 7000\n\n[generator]\nconnections = 4\n"
    )
    .unwrap();

    let overrides = CliOverrides {
        port: Some(7001),
        ..Default::default()
    };
    let config = Config::load(file.path().to_str(), overrides).unwrap();

    assert_eq!(config.target.port, 7001);
    assert_eq!(config.generator.connections, 4);
}

#[test]
fn test_missing_file_reports_read_error() {
    let result = Config::load(Some("/nonexistent/dnstap-generator.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_malformed_toml_reports_parse_error() {
    let result = Config::from_toml("[generator]\ncount = \"many\"\n");
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}
