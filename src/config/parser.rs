use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn parse_config(path: &PathBuf) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

    Ok(config)
}

pub fn render_config(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_config() {
        let config_content = r#"
[backend]
base_url = "http://10.1.0.4:8000"

[logs]
poll_interval_ms = 2500
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        let path = PathBuf::from(temp_file.path());

        let config = parse_config(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://10.1.0.4:8000");
        assert_eq!(config.backend.rules_path, "/api-rule/rule");
        assert_eq!(config.logs.poll_interval_ms, 2500);
        assert_eq!(config.logs.alert_hide_ms, 5000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_file_yields_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        let path = PathBuf::from(temp_file.path());

        assert_eq!(parse_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_rendered_defaults_parse_back() {
        let rendered = render_config(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_missing_file_names_path() {
        let path = PathBuf::from("/nonexistent/rule-console.toml");
        let err = parse_config(&path).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rule-console.toml"));
    }
}
