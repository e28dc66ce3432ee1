use std::path::Path;

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Loads a config struct from `.env` plus `APP_`-prefixed environment
/// variables, with `__` between nested keys.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";

    /// Unprefixed variables honoured as fallbacks, as `(variable, config key)`.
    /// A prefixed variable for the same key wins.
    const FALLBACKS: &'static [(&'static str, &'static str)] = &[];

    /// Turns a fallback variable's raw value into the config value.
    fn fallback_value(_key: &str, raw: String) -> String {
        raw
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn from_env() -> Result<Self> {
        let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        if dotenvy::from_filename(&manifest_env).is_err() {
            dotenvy::dotenv().ok();
        }

        let mut builder = config_rs::Config::builder();
        for (variable, key) in Self::FALLBACKS {
            if let Ok(raw) = std::env::var(variable) {
                builder = builder
                    .set_default(*key, Self::fallback_value(key, raw))
                    .with_context(|| format!("invalid fallback {variable} for {key}"))?;
            }
        }

        let cfg = builder
            .add_source(
                config_rs::Environment::with_prefix(Self::PREFIX)
                    .prefix_separator("_")
                    .separator(Self::SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("failed to read configuration from the environment")?
            .try_deserialize::<Self>()
            .context("failed to deserialize configuration")?;

        cfg.validate()?;
        Ok(cfg)
    }
}
