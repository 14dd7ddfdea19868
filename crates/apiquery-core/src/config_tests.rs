//! Tests for config module

#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::query::SortDirection;
    use std::fs;
    use tempfile::TempDir;

    // ========================================================================
    // Defaults
    // ========================================================================

    #[test]
    fn test_config_default_values() {
        // Arrange & Act
        let config = QueryConfig::default();

        // Assert
        assert!(config.query.default_limit.is_none());
        assert_eq!(config.query.max_limit, 10_000);
        assert_eq!(config.query.sort_direction(), SortDirection::Asc);
        assert!(!config.output.pretty);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "text");
        assert!(config.validate().is_ok());
    }

    // ========================================================================
    // TOML parsing
    // ========================================================================

    #[test]
    fn test_config_from_toml_partial_keeps_defaults() {
        // Arrange
        let toml = r#"
[query]
default_limit = 25
"#;

        // Act
        let config = QueryConfig::from_toml(toml).expect("parse");

        // Assert
        assert_eq!(config.query.default_limit, Some(25));
        assert_eq!(config.query.max_limit, 10_000);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_from_toml_full() {
        // Arrange
        let toml = r#"
[query]
default_limit = 50
max_limit = 500
default_sort_direction = "desc"

[output]
pretty = true

[logging]
level = "debug"
format = "json"
"#;

        // Act
        let config = QueryConfig::from_toml(toml).expect("parse");

        // Assert
        assert_eq!(config.query.default_limit, Some(50));
        assert_eq!(config.query.max_limit, 500);
        assert_eq!(config.query.sort_direction(), SortDirection::Desc);
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml_wrong_type() {
        let result = QueryConfig::from_toml("[query]\nmax_limit = \"many\"\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    // ========================================================================
    // Validation
    // ========================================================================

    #[test]
    fn test_config_validate_zero_max_limit() {
        // Arrange
        let mut config = QueryConfig::default();
        config.query.max_limit = 0;

        // Act
        let result = config.validate();

        // Assert
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "query.max_limit"
        ));
    }

    #[test]
    fn test_config_validate_default_limit_above_max() {
        let mut config = QueryConfig::default();
        config.query.max_limit = 10;
        config.query.default_limit = Some(11);

        let err = config.validate().expect_err("must fail");
        assert!(err.to_string().contains("query.default_limit"));
    }

    #[test]
    fn test_config_validate_invalid_sort_direction() {
        let mut config = QueryConfig::default();
        config.query.default_sort_direction = "sideways".to_string();

        let err = config.validate().expect_err("must fail");
        assert!(err.to_string().contains("default_sort_direction"));
    }

    #[test]
    fn test_config_validate_invalid_log_level() {
        let mut config = QueryConfig::default();
        config.logging.level = "loud".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_invalid_log_format() {
        let mut config = QueryConfig::default();
        config.logging.format = "xml".to_string();

        assert!(config.validate().is_err());
    }

    // ========================================================================
    // Files and round-trips
    // ========================================================================

    #[test]
    fn test_config_load_from_path() {
        // Arrange
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("apiquery.toml");
        fs::write(&path, "[output]\npretty = true\n").expect("write");

        // Act
        let config = QueryConfig::load_from_path(&path).expect("load");

        // Assert
        assert!(config.output.pretty);
        assert_eq!(config.query.max_limit, 10_000);
    }

    #[test]
    fn test_config_load_from_missing_path_uses_defaults() {
        let dir = TempDir::new().expect("tempdir");
        let config = QueryConfig::load_from_path(dir.path().join("absent.toml")).expect("load");
        assert_eq!(config.logging.format, "text");
    }

    #[test]
    fn test_config_roundtrip() {
        // Arrange
        let mut config = QueryConfig::default();
        config.query.default_limit = Some(30);
        config.output.pretty = true;

        // Act
        let toml_str = config.to_toml().expect("serialize");
        let parsed = QueryConfig::from_toml(&toml_str).expect("parse");

        // Assert
        assert_eq!(parsed.query.default_limit, Some(30));
        assert!(parsed.output.pretty);
    }
}
