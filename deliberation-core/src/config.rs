use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use shellexpand::tilde;

/// Collection the negotiation runs are uploaded into unless overridden.
pub const DEFAULT_COLLECTION_ID: &str = "de941abb-54e7-4425-8535-b87d1758eb59";

/// Name of the environment variable holding the Docent API key.
pub const DEFAULT_API_KEY_ENV: &str = "DOCENT_API_KEY";

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DeliberationConfig {
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ParserConfig {
    pub data_dir: String,
    pub agent_config_file: String,
    pub file_prefix: String,
    pub output_file: String,
    pub processed_dir: String,
    pub archive: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            data_dir: "games_descriptions/base/output/base_test_small".to_string(),
            agent_config_file: "config.txt".to_string(),
            file_prefix: "history".to_string(),
            output_file: "docent_prepared_data.json".to_string(),
            processed_dir: "processed".to_string(),
            archive: true,
        }
    }
}

impl ParserConfig {
    pub fn data_dir(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn output_file(&self) -> PathBuf {
        expand(&self.output_file)
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IngestConfig {
    pub artifact: String,
    pub collection_id: String,
    pub api_url: String,
    pub dashboard_url: String,
    pub api_key_env: String,
    pub timeout_seconds: u64,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            artifact: "docent_prepared_data.json".to_string(),
            collection_id: DEFAULT_COLLECTION_ID.to_string(),
            api_url: "https://api.docent.transluce.org/rest".to_string(),
            dashboard_url: "https://docent-alpha.transluce.org/dashboard".to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_seconds: 30,
        }
    }
}

impl IngestConfig {
    pub fn artifact(&self) -> PathBuf {
        expand(&self.artifact)
    }
}

impl DeliberationConfig {
    /// Load configuration from an optional TOML file, then `DELIBERATION__*`
    /// environment variables (e.g. `DELIBERATION__PARSER__DATA_DIR`).
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("DELIBERATION")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        s.try_deserialize()
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(tilde(path).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let config = DeliberationConfig::load(missing.to_str().unwrap()).unwrap();

        assert_eq!(config.parser.file_prefix, "history");
        assert_eq!(config.parser.output_file, "docent_prepared_data.json");
        assert!(config.parser.archive);
        assert_eq!(config.ingest.collection_id, DEFAULT_COLLECTION_ID);
        assert_eq!(config.ingest.api_key_env, "DOCENT_API_KEY");
        assert_eq!(config.ingest.timeout_seconds, 30);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deliberation.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "{}",
            concat!(
                "[parser]\ndata_dir = \"/data/run7\"\narchive = false\n\n",
                "[ingest]\ncollection_id = \"abc\"",
            )
        )
        .unwrap();

        let config = DeliberationConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.parser.data_dir(), PathBuf::from("/data/run7"));
        assert!(!config.parser.archive);
        assert_eq!(config.parser.agent_config_file, "config.txt");
        assert_eq!(config.ingest.collection_id, "abc");
        assert_eq!(config.ingest.api_url, "https://api.docent.transluce.org/rest");
    }
}
