use anyhow::{Result, bail};

use super::AppConfig;

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.general.host.trim().is_empty() {
        errors.push("general.host must not be empty".to_string());
    }

    let database = &cfg.database;
    if database.url.trim().is_empty() {
        errors.push("database.url must not be empty".to_string());
    } else if !database
        .url
        .trim()
        .to_ascii_lowercase()
        .starts_with("sqlite:")
    {
        errors.push(format!(
            "database.url ({}) must be a sqlite: url",
            database.url
        ));
    }

    if database.max_connections == 0 {
        errors.push("database.max_connections must be > 0".to_string());
    }

    if database.min_idle > database.max_connections {
        errors.push(format!(
            "database.min_idle ({}) must be <= database.max_connections ({})",
            database.min_idle, database.max_connections
        ));
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::config::{AppConfig, DatabaseConfig};

    #[test]
    fn defaults_are_valid() {
        validate(&AppConfig::default()).expect("default config should validate");
    }

    #[test]
    fn collects_every_problem() {
        let mut cfg = AppConfig::default();
        cfg.general.host = "  ".to_string();
        cfg.database = DatabaseConfig {
            url: "postgres://localhost/canteen".to_string(),
            max_connections: 1,
            min_idle: 3,
        };

        let message = validate(&cfg).expect_err("config should be rejected").to_string();
        assert!(message.contains("general.host"));
        assert!(message.contains("must be a sqlite: url"));
        assert!(message.contains("database.min_idle (3)"));
    }

    #[test]
    fn rejects_zero_connections() {
        let mut cfg = AppConfig::default();
        cfg.database.max_connections = 0;
        cfg.database.min_idle = 0;

        let message = validate(&cfg).expect_err("config should be rejected").to_string();
        assert!(message.contains("database.max_connections must be > 0"));
    }
}
