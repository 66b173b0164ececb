//! Runtime configuration, read from the environment (and a `.env` file when present).

use std::env;
use std::path::PathBuf;

use crate::error::AppError;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DB: &str = "seisops.sqlite";
const DEFAULT_TEMPLATE_DIR: &str = "templates";
const DEFAULT_MEDIA_DIR: &str = "media";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// SQLite database file.
    pub database: PathBuf,
    /// Directory holding `bast/BAST.xlsx` and `cl_seiscomp/cl_seiscomp.xlsx`.
    pub template_dir: PathBuf,
    /// Uploaded SLMON screenshots.
    pub media_dir: PathBuf,
    /// Text file written by the external gap/spike/blank checker.
    pub checklist_feed: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv::dotenv().ok();

        let port = match env::var("SEISOPS_PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("SEISOPS_PORT is not a valid port: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };
        let template_dir = path_var("SEISOPS_TEMPLATE_DIR", DEFAULT_TEMPLATE_DIR);
        let checklist_feed = env::var("SEISOPS_CHECKLIST_FEED")
            .map(PathBuf::from)
            .unwrap_or_else(|_| template_dir.join("cl_seiscomp").join("checklist.txt"));

        Ok(Self {
            host: env::var("SEISOPS_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            database: path_var("SEISOPS_DB", DEFAULT_DB),
            template_dir,
            media_dir: path_var("SEISOPS_MEDIA_DIR", DEFAULT_MEDIA_DIR),
            checklist_feed,
        })
    }

    pub fn bast_template(&self) -> PathBuf {
        self.template_dir.join("bast").join("BAST.xlsx")
    }

    pub fn checklist_template(&self) -> PathBuf {
        self.template_dir.join("cl_seiscomp").join("cl_seiscomp.xlsx")
    }
}

fn path_var(key: &str, default: &str) -> PathBuf {
    env::var(key)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}
