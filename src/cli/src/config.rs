use std::{fs, path::Path};

use color_eyre::eyre::WrapErr;
use cube_core::SolverConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Settings read from the `--config` file.
#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    pub solver: SolverConfig,
    pub scramble: ScrambleConfig,
}

#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrambleConfig {
    /// Moves in a random scramble when `--length` is not given.
    pub length: usize,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        ScrambleConfig { length: 20 }
    }
}

impl CliConfig {
    /// Reads the configuration, falling back to defaults when no file is
    /// given or the file does not exist.
    pub fn load(path: Option<&Path>) -> color_eyre::Result<CliConfig> {
        let Some(path) = path else {
            return Ok(CliConfig::default());
        };

        if !path.exists() {
            warn!(target: "config", "{} does not exist, using defaults", path.display());
            return Ok(CliConfig::default());
        }

        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("Could not read {}", path.display()))?;
        let config = toml::from_str::<CliConfig>(&text)
            .wrap_err_with(|| format!("Could not parse {}", path.display()))?;

        info!(target: "config", "Loaded {}", path.display());

        Ok(config)
    }
}
