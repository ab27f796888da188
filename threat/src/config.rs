use std::time::Duration;

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;

use crate::shared::constants::THREAT_UPDATE_INTERVAL;

#[derive(Debug, Deserialize)]
pub struct ThreatConfig {
    #[serde(default)]
    pub threat: ThreatSection,
    pub common: CommonSection,
}

impl ThreatConfig {
    // https://github.com/mehcode/config-rs/blob/master/examples/hierarchical-env/settings.rs
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config.template.toml"))
            .add_source(File::with_name("config.toml").required(false))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        s.try_deserialize()
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_millis(self.threat.update_interval_ms)
    }

    pub fn world_database_path(&self) -> String {
        format!("{}/databases/world.db", self.common.data.directory)
    }
}

#[derive(Debug, Deserialize)]
pub struct CommonSection {
    pub data: DataSection,
}

#[derive(Debug, Deserialize)]
pub struct DataSection {
    pub directory: String,
}

#[derive(Debug, Deserialize)]
pub struct ThreatSection {
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,
}

fn default_update_interval_ms() -> u64 {
    THREAT_UPDATE_INTERVAL.as_millis() as u64
}

impl Default for ThreatSection {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml() {
        let config = ThreatConfig::from_toml(
            r#"
            [common.data]
            directory = "/srv/rustbolt"

            [threat]
            update_interval_ms = 250
            "#,
        )
        .unwrap();

        assert_eq!(config.update_interval(), Duration::from_millis(250));
        assert_eq!(
            config.world_database_path(),
            "/srv/rustbolt/databases/world.db"
        );
    }

    #[test]
    fn test_default_update_interval() {
        let config = ThreatConfig::from_toml(
            r#"
            [common.data]
            directory = "data"
            "#,
        )
        .unwrap();

        assert_eq!(config.update_interval(), THREAT_UPDATE_INTERVAL);
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(ThreatConfig::from_toml("[threat]\nupdate_interval_ms = 10").is_err());
    }
}
