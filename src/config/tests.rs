use super::*;
use serial_test::serial;
use std::env;
use std::net::IpAddr;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_semmatch_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("SEMMATCH_PORT");
        env::remove_var("SEMMATCH_BIND_ADDR");
        env::remove_var("SEMMATCH_FAQ_PATH");
        env::remove_var("SEMMATCH_MODEL");
        env::remove_var("SEMMATCH_MODELS_DIR");
        env::remove_var("SEMMATCH_NORMALIZE");
        env::remove_var("SEMMATCH_THRESHOLD");
        env::remove_var("SEMMATCH_TOP_K");
        env::remove_var("SEMMATCH_STUB_EMBEDDER");
    }
}

fn sample_faq() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/samples/faq.json")
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.port, 8080);
    assert_eq!(
        config.bind_addr,
        IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1))
    );
    assert_eq!(config.faq_path, PathBuf::from("data/samples/faq.json"));
    assert_eq!(config.model, "all-MiniLM-L6-v2");
    assert_eq!(config.models_dir, PathBuf::from("./.models"));
    assert!(config.normalize);
    assert_eq!(config.threshold, 0.3);
    assert_eq!(config.top_k, 3);
    assert!(!config.stub_embedder);
}

#[test]
fn test_socket_addr() {
    let config = Config::default();
    assert_eq!(config.socket_addr(), "127.0.0.1:8080");

    let config = Config {
        port: 3000,
        bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        ..Default::default()
    };
    assert_eq!(config.socket_addr(), "0.0.0.0:3000");
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_semmatch_env();

    let config = Config::from_env().expect("should parse with defaults");
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn test_from_env_custom_port() {
    clear_semmatch_env();

    with_env_vars(&[("SEMMATCH_PORT", "3000")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.port, 3000);
    });
}

#[test]
#[serial]
fn test_from_env_ipv6_bind_addr() {
    clear_semmatch_env();

    with_env_vars(&[("SEMMATCH_BIND_ADDR", "::1")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(
            config.bind_addr,
            IpAddr::V6(std::net::Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    });
}

#[test]
#[serial]
fn test_invalid_port_zero() {
    clear_semmatch_env();

    with_env_vars(&[("SEMMATCH_PORT", "0")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
        assert!(err.to_string().contains("invalid port"));
    });
}

#[test]
#[serial]
fn test_invalid_port_not_number() {
    clear_semmatch_env();

    with_env_vars(&[("SEMMATCH_PORT", "not_a_port")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::PortParseError { .. }));
    });
}

#[test]
#[serial]
fn test_invalid_bind_addr() {
    clear_semmatch_env();

    with_env_vars(&[("SEMMATCH_BIND_ADDR", "not.an.ip.address")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBindAddr { .. }));
    });
}

#[test]
#[serial]
fn test_from_env_matching_settings() {
    clear_semmatch_env();

    with_env_vars(
        &[
            ("SEMMATCH_FAQ_PATH", "/srv/faq/prod.json"),
            ("SEMMATCH_MODEL", "/models/all-mpnet-base-v2"),
            ("SEMMATCH_MODELS_DIR", "/models"),
            ("SEMMATCH_NORMALIZE", "false"),
            ("SEMMATCH_THRESHOLD", "0.55"),
            ("SEMMATCH_TOP_K", "5"),
            ("SEMMATCH_STUB_EMBEDDER", "yes"),
        ],
        || {
            let config = Config::from_env().expect("should parse");

            assert_eq!(config.faq_path, PathBuf::from("/srv/faq/prod.json"));
            assert_eq!(config.model, "/models/all-mpnet-base-v2");
            assert_eq!(config.models_dir, PathBuf::from("/models"));
            assert!(!config.normalize);
            assert_eq!(config.threshold, 0.55);
            assert_eq!(config.top_k, 5);
            assert!(config.stub_embedder);
        },
    );
}

#[test]
#[serial]
fn test_blank_model_falls_back_to_default() {
    clear_semmatch_env();

    with_env_vars(&[("SEMMATCH_MODEL", "   ")], || {
        let config = Config::from_env().expect("should parse");
        assert_eq!(config.model, "all-MiniLM-L6-v2");
    });
}

#[test]
#[serial]
fn test_invalid_threshold_values() {
    for value in ["1.5", "-0.1", "NaN", "high"] {
        clear_semmatch_env();

        with_env_vars(&[("SEMMATCH_THRESHOLD", value)], || {
            let err = Config::from_env().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidThreshold { .. }),
                "value {value} should be rejected"
            );
        });
    }
}

#[test]
#[serial]
fn test_invalid_top_k_values() {
    for value in ["0", "-3", "three"] {
        clear_semmatch_env();

        with_env_vars(&[("SEMMATCH_TOP_K", value)], || {
            let err = Config::from_env().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTopK { .. }));
        });
    }
}

#[test]
#[serial]
fn test_invalid_bool() {
    clear_semmatch_env();

    with_env_vars(&[("SEMMATCH_NORMALIZE", "maybe")], || {
        let err = Config::from_env().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidBool {
                name: "SEMMATCH_NORMALIZE",
                ..
            }
        ));
    });
}

#[test]
fn test_validate_success_with_sample_faq() {
    let config = Config {
        faq_path: sample_faq(),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_missing_faq() {
    let config = Config {
        faq_path: PathBuf::from("/nonexistent/faq.json"),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PathNotFound { .. })
    ));
}

#[test]
fn test_validate_faq_path_is_directory() {
    let config = Config {
        faq_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src"),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotAFile { .. })
    ));
}

#[test]
fn test_validate_models_dir_is_file() {
    let config = Config {
        faq_path: sample_faq(),
        models_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml"),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_validate_ranges() {
    let config = Config {
        faq_path: sample_faq(),
        threshold: 1.01,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidThreshold { .. })
    ));

    let config = Config {
        faq_path: sample_faq(),
        top_k: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidTopK { .. })
    ));
}

#[test]
fn test_validate_blank_model_requires_stub() {
    let config = Config {
        faq_path: sample_faq(),
        model: String::new(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingEnvVar { .. })
    ));

    let config = Config {
        stub_embedder: true,
        ..config
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_encoder_config_mapping() {
    let config = Config {
        model: "paraphrase-MiniLM-L3-v2".to_string(),
        models_dir: PathBuf::from("/opt/models"),
        normalize: false,
        ..Default::default()
    };

    let encoder = config.encoder_config();
    assert_eq!(encoder.model, "paraphrase-MiniLM-L3-v2");
    assert_eq!(encoder.models_dir, PathBuf::from("/opt/models"));
    assert!(!encoder.normalize);
    assert!(!encoder.testing_stub);

    let stub = Config {
        stub_embedder: true,
        ..Default::default()
    }
    .encoder_config();
    assert!(stub.testing_stub);
    assert!(stub.normalize);
}

#[test]
fn test_match_config_mapping() {
    let config = Config {
        threshold: 0.42,
        top_k: 7,
        ..Default::default()
    };

    let matching = config.match_config();
    assert_eq!(matching.threshold, 0.42);
    assert_eq!(matching.default_top_k, 7);
}

#[test]
fn test_error_messages_are_descriptive() {
    let err = ConfigError::InvalidPort {
        value: "0".to_string(),
    };
    assert!(err.to_string().contains("1 and 65535"));

    let err = ConfigError::InvalidThreshold {
        value: "2".to_string(),
    };
    assert!(err.to_string().contains("between 0.0 and 1.0"));

    let err = ConfigError::PathNotFound {
        path: PathBuf::from("/some/path"),
    };
    assert!(err.to_string().contains("/some/path"));
}
