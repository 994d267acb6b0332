use super::Config;
use anyhow::Result;

pub fn validate_config(config: &Config) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    let base_url = config.backend.base_url.as_str();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        warnings.push(format!(
            "[X] Backend URL must start with http:// or https://: {}",
            base_url
        ));
    }

    if config.backend.request_timeout_secs == 0 {
        warnings.push("[X] Request timeout cannot be 0".to_string());
    }

    for (name, path) in [
        ("rules_path", &config.backend.rules_path),
        ("initial_logs_path", &config.backend.initial_logs_path),
        ("updated_logs_path", &config.backend.updated_logs_path),
    ] {
        if path.is_empty() {
            warnings.push(format!("[X] backend.{} cannot be empty", name));
        }
    }

    if config.logs.poll_interval_ms == 0 {
        warnings.push("[X] Log poll interval cannot be 0".to_string());
    } else if config.logs.poll_interval_ms < 1000 {
        warnings.push(format!(
            "[!] Log poll interval of {}ms fetches the full snapshot very often",
            config.logs.poll_interval_ms
        ));
    }

    if config.logs.alert_hide_ms == 0 {
        warnings.push("[!] New-log alerts will hide immediately (alert_hide_ms = 0)".to_string());
    }

    if !["trace", "debug", "info", "warn", "error"].contains(&config.logging.level.as_str()) {
        warnings.push(format!(
            "[X] Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
            config.logging.level
        ));
    }

    if !["text", "json", "pretty"].contains(&config.logging.format.as_str()) {
        warnings.push(format!(
            "[X] Invalid log format: {}. Must be 'text', 'json' or 'pretty'",
            config.logging.format
        ));
    }

    if config.logging.output == "stdout" {
        warnings.push(
            "[*] Recommendation: Log to stderr or a file; stdout logging garbles the interactive console"
                .to_string(),
        );
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_clean() {
        assert!(validate_config(&Config::default()).unwrap().is_empty());
    }

    #[test]
    fn test_reports_bad_values() {
        let mut config = Config::default();
        config.backend.base_url = "ftp://backend".to_string();
        config.logs.poll_interval_ms = 0;
        config.logging.level = "loud".to_string();

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 3);
        assert!(warnings.iter().all(|w| w.starts_with("[X]")));
    }

    #[test]
    fn test_short_interval_is_a_warning() {
        let mut config = Config::default();
        config.logs.poll_interval_ms = 250;

        let warnings = validate_config(&config).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("[!]"));
    }
}
