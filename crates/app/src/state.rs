//! Application state management

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use pairwise_core::{Error, JsonFileStore, LeagueConfig, PeriodController, Result};
use rand::rngs::ThreadRng;

use crate::cli::Cli;

/// Config file looked up in the data directory when `--config` is absent
const CONFIG_FILE: &str = "league.toml";

/// Main application state
pub struct AppState {
    pub controller: PeriodController<JsonFileStore, ThreadRng>,
    data_dir: PathBuf,
}

impl AppState {
    pub fn new(cli: &Cli) -> Result<Self> {
        let data_dir = match &cli.data_dir {
            Some(dir) => dir.clone(),
            None => Self::data_path()?,
        };
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| data_dir.join(CONFIG_FILE));

        Self::open(&data_dir, &config_path)
    }

    /// Open the week store in `data_dir` with the config at `config_path`
    pub fn open(data_dir: &Path, config_path: &Path) -> Result<Self> {
        let config = LeagueConfig::load(config_path)?;
        let store = JsonFileStore::open(data_dir.join("weeks"))?;
        let controller = PeriodController::new(store, config, rand::thread_rng())?;

        tracing::debug!(data_dir = %data_dir.display(), "Opened league data");

        Ok(Self {
            controller,
            data_dir: data_dir.to_path_buf(),
        })
    }

    fn data_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "onyx", "pairwise").ok_or_else(|| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
