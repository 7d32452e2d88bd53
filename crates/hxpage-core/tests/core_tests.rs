//! Core type tests — configuration loading, environments, user records.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use hxpage_core::*;

    // ─────────────────────────────────────────────────────────────────────
    // Config
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.app.name, "hxpage");
        assert_eq!(config.app.environment, Environment::Local);
        assert_eq!(config.http.hostname, "127.0.0.1");
        assert_eq!(config.http.port, 8000);
        assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    }

    #[test]
    fn config_partial_json_keeps_defaults() {
        let config = Config::from_json_str(r#"{ "http": { "port": 9090 } }"#).unwrap();
        assert_eq!(config.http.port, 9090);
        assert_eq!(config.http.hostname, "127.0.0.1");
        assert_eq!(config.app, AppConfig::default());
    }

    #[test]
    fn config_full_json() {
        let config = Config::from_json_str(
            r#"{
                "app": { "name": "Pages", "host": "https://pages.example", "environment": "production" },
                "http": { "hostname": "0.0.0.0", "port": 80 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.app.name, "Pages");
        assert_eq!(config.app.host, "https://pages.example");
        assert_eq!(config.app.environment, Environment::Production);
        assert_eq!(config.bind_addr(), "0.0.0.0:80");
    }

    #[test]
    fn config_invalid_json_is_parse_error() {
        let err = Config::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn config_unknown_environment_in_json_is_rejected() {
        let err = Config::from_json_str(r#"{ "app": { "environment": "moon" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn config_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "app": {{ "name": "From File" }} }}"#).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.app.name, "From File");
    }

    #[test]
    fn config_load_missing_file_is_io_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("missing.json");

        let err = Config::load(&path).unwrap_err();
        match err {
            ConfigError::Io { path: p, .. } => assert_eq!(p, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Environment
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn environment_parses_names_and_aliases() {
        assert_eq!("local".parse::<Environment>().unwrap(), Environment::Local);
        assert_eq!("TEST".parse::<Environment>().unwrap(), Environment::Test);
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!("staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
    }

    #[test]
    fn environment_rejects_unknown() {
        let err = "qa".parse::<Environment>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownEnvironment(ref s) if s == "qa"));
    }

    #[test]
    fn environment_display_matches_serde() {
        for env in [
            Environment::Local,
            Environment::Test,
            Environment::Development,
            Environment::Staging,
            Environment::Production,
        ] {
            let json = serde_json::to_value(env).unwrap();
            assert_eq!(json, serde_json::Value::String(env.to_string()));
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // AuthUser / CsrfToken
    // ─────────────────────────────────────────────────────────────────────

    #[test]
    fn auth_user_defaults_to_non_admin() {
        let user = AuthUser::new(1, "Ada", "ada@example.com");
        assert!(!user.admin);
        assert!(user.with_admin(true).admin);
    }

    #[test]
    fn auth_user_admin_defaults_when_missing_from_json() {
        let user: AuthUser =
            serde_json::from_str(r#"{ "id": 7, "name": "Bo", "email": "bo@example.com" }"#).unwrap();
        assert_eq!(user.id, 7);
        assert!(!user.admin);
    }

    #[test]
    fn csrf_token_as_str() {
        assert_eq!(CsrfToken::new("abc").as_str(), "abc");
        assert_eq!(CsrfToken::default().as_str(), "");
    }
}
