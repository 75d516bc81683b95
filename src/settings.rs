use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    /// Uploaded category icons live here and are served under `/static`.
    pub static_dir: PathBuf,
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl Settings {
    /// Defaults, then an optional `trivia.*` file, then `TRIVIA_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_sources(Environment::with_prefix("TRIVIA"))
    }

    fn from_sources(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("database_url", "sqlite:trivia.db")?
            .set_default("static_dir", "static")?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .add_source(File::with_name("trivia").required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let source: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix("TRIVIA").source(Some(source))
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let settings = Settings::from_sources(env(&[])).unwrap();
        assert_eq!(settings.database_url, "sqlite:trivia.db");
        assert_eq!(settings.static_dir, PathBuf::from("static"));
        assert_eq!(settings.address(), "0.0.0.0:8080");
    }

    #[test]
    fn environment_overrides_defaults() {
        let settings = Settings::from_sources(env(&[
            ("TRIVIA_DATABASE_URL", "sqlite::memory:"),
            ("TRIVIA_PORT", "9001"),
        ]))
        .unwrap();
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.port, 9001);
    }
}
