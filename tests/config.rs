#[cfg(test)]
mod tests {
    use millroll::api::StoreConfig;
    use millroll::libs::config::{Config, ExportConfig};
    use millroll::libs::glyph::GlyphMode;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Points the user data directory at a temporary directory.
    struct ConfigTestContext {
        _temp_dir: TempDir,
        api_url: String,
        auth_token: String,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext {
                _temp_dir: temp_dir,
                api_url: "https://mill.example.com/api".to_string(),
                auth_token: "token123".to_string(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_default_config(_ctx: &mut ConfigTestContext) {
        let config = Config::default();
        assert!(config.store.is_none());
        assert!(config.export.is_none());
        assert_eq!(config.export_settings(), ExportConfig::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_export_defaults(_ctx: &mut ConfigTestContext) {
        let export = ExportConfig::default();
        assert_eq!(export.title, "Attendance Register");
        assert_eq!(export.rows_per_page, 25);
        assert_eq!(export.glyphs, GlyphMode::Short);
        assert!(export.output_dir.is_none());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let config = Config {
            store: Some(StoreConfig {
                api_url: ctx.api_url.clone(),
                auth_token: ctx.auth_token.clone(),
            }),
            export: Some(ExportConfig {
                title: "Carding Register".to_string(),
                rows_per_page: 30,
                glyphs: GlyphMode::Full,
                output_dir: Some(PathBuf::from("/tmp/registers")),
            }),
        };
        config.save().unwrap();

        assert_eq!(Config::read().unwrap(), config);
    }

    #[test]
    fn test_partial_config_file_parses() {
        let config: Config = serde_json::from_str(r#"{ "export": { "title": "Register", "rows_per_page": 10 } }"#).unwrap();
        assert!(config.store.is_none());
        let export = config.export.unwrap();
        assert_eq!(export.glyphs, GlyphMode::Short);
        assert_eq!(export.rows_per_page, 10);
    }

    #[test]
    fn test_store_config_without_url_is_not_configured() {
        let saved = StoreConfig {
            api_url: "   ".to_string(),
            auth_token: "".to_string(),
        };
        if std::env::var("MILLROLL_API_URL").is_err() {
            assert_eq!(StoreConfig::from_env(Some(saved)), None);
            assert_eq!(StoreConfig::from_env(None), None);
        }
    }
}
