#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;

    use super::super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
        assert!(!config.server.debug);
        assert_eq!(config.artifacts.paths().model_path(), PathBuf::from("artifacts/model.json"));
        assert_eq!(config.artifacts.paths().vectorizer_path(), PathBuf::from("artifacts/tfidf_vectorizer.json"));
        assert_eq!(config.artifacts.paths().label_encoder_path(), PathBuf::from("artifacts/label_encoder.json"));
    }

    #[test]
    fn test_default_static_dir_holds_the_stylesheet() {
        let static_dir = ServerConfig::default().static_dir;
        assert!(Path::new(&static_dir).join("css/main.css").is_file(), "static_dir: {static_dir}");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            port = 8080

            [artifacts]
            dir = "models"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.artifacts.dir, "models");
        assert_eq!(config.artifacts.model, "model.json");
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyricmood.toml");
        let (config, source) = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(source, ConfigSource::Defaults(path));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyricmood.toml");
        std::fs::write(&path, "[server]\nport = \"not a number\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_file_source_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lyricmood.toml");
        std::fs::write(&path, "[server]\ndebug = true\n").unwrap();
        let (config, source) = Config::load_from(&path).unwrap();
        assert!(config.server.debug);
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        config
            .apply_overrides(env(&[
                ("LYRICMOOD_HOST", "0.0.0.0"),
                ("LYRICMOOD_PORT", "9000"),
                ("LYRICMOOD_DEBUG", "yes"),
                ("LYRICMOOD_ARTIFACT_DIR", "/srv/models"),
            ]))
            .unwrap();
        assert_eq!(config.server.bind_address(), "0.0.0.0:9000");
        assert!(config.server.debug);
        assert_eq!(config.artifacts.dir, "/srv/models");
    }

    #[test]
    fn test_bad_overrides_are_rejected() {
        let mut config = Config::default();
        assert!(config.apply_overrides(env(&[("LYRICMOOD_PORT", "http")])).is_err());
        assert!(config.apply_overrides(env(&[("LYRICMOOD_DEBUG", "maybe")])).is_err());
    }
}
