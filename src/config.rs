use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

pub static FILE_NAME: &str = "vdpreview.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    /// Where intermediate SVG files are created. Defaults to the system temp dir.
    pub temp_dir: Option<PathBuf>,
}

fn default_output_path() -> PathBuf {
    PathBuf::from("previews")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            temp_dir: None,
        }
    }
}

impl Config {
    pub async fn read() -> anyhow::Result<Config> {
        Self::read_from(Path::new(FILE_NAME)).await
    }

    async fn read_from(path: &Path) -> anyhow::Result<Config> {
        let exists = fs::try_exists(path)
            .await
            .context("Failed to check for config file")?;
        if !exists {
            return Ok(Config::default());
        }

        let config = fs::read_to_string(path)
            .await
            .context("Failed to read config file")?;
        Self::parse(&config)
    }

    fn parse(config: &str) -> anyhow::Result<Config> {
        toml::from_str(config).context("Failed to parse config file")
    }
}
