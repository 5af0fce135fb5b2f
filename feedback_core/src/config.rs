use std::env::VarError;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

use crate::error::ConfigError;

static DATA_DIR_NAME: &str = "feedback_seed";
static SEED_DB_NAME: &str = "feedback.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";
static DATABASE_URL_VAR: &str = "DATABASE_URL";

// When DATABASE_URL is unset the layout is
// data_dir_path
// |- feedback_seed
//    |- feedback.sqlite
//    |- config.json

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SeedConfig {
    /// Connection string handed to the ORM, e.g. `sqlite://...?mode=rwc` or `postgres://...`.
    pub database_url: String,
}

impl SeedConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Default config pointing at a SQLite file inside `data_dir`.
    fn for_data_dir(data_dir: &Path) -> Self {
        let database_path = data_dir.join(SEED_DB_NAME);
        Self::new(format!("sqlite://{}?mode=rwc", database_path.display()))
    }
}

/// Resolves the seeder configuration.
///
/// `DATABASE_URL` (also read from a `.env` file) takes precedence. Otherwise the
/// config file in the platform data directory is used, and created with defaults
/// on first run.
pub async fn get_or_init() -> Result<SeedConfig, ConfigError> {
    dotenvy::dotenv().ok();

    if let Some(config) = from_env_var(std::env::var(DATABASE_URL_VAR))? {
        debug!("using {DATABASE_URL_VAR} from the environment");
        return Ok(config);
    }

    let data_dir = dirs::data_dir().ok_or(ConfigError::NoDataDir)?;
    load_or_create(&data_dir.join(DATA_DIR_NAME)).await
}

// Unset falls through to the config file; a non-unicode value is an error.
fn from_env_var(value: Result<String, VarError>) -> Result<Option<SeedConfig>, ConfigError> {
    match value {
        Ok(database_url) => Ok(Some(SeedConfig::new(database_url))),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::NotUnicode(raw)),
    }
}

/// Reads `config.json` from `seed_dir`, writing a default one if it doesn't exist.
pub async fn load_or_create(seed_dir: &Path) -> Result<SeedConfig, ConfigError> {
    let config_path: PathBuf = seed_dir.join(CONFIG_FILE_NAME);

    fs::create_dir_all(seed_dir).await?;

    if config_path.exists() {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let config: SeedConfig = serde_json::from_str(&contents)?;
        Ok(config)
    } else {
        let config = SeedConfig::for_data_dir(seed_dir);

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;

        debug!(path = %config_path.display(), "wrote default config");
        Ok(config)
    }
}
