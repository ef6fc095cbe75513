use anyhow::Result;
use std::env;
use std::path::PathBuf;

use crate::database::{SUBMISSIONS_FILE, USERS_FILE};

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub upload_dir: PathBuf,
    pub max_file_size: usize,
    pub allowed_origins: Vec<String>,
    pub enable_debug_routes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3001,
            data_dir: PathBuf::from("./data"),
            upload_dir: PathBuf::from("./uploads"),
            max_file_size: 5 * 1024 * 1024, // 5MB
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://127.0.0.1:5173".to_string(),
                "http://localhost:3000".to_string(),
            ],
            enable_debug_routes: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3001".to_string())
                .parse()?,
            data_dir: env::var("DATA_DIR")
                .unwrap_or_else(|_| "./data".to_string())
                .into(),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "./uploads".to_string())
                .into(),
            max_file_size: env::var("MAX_FILE_SIZE")
                .unwrap_or_else(|_| "5242880".to_string()) // 5MB
                .parse()?,
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .unwrap_or_else(|_| {
                    "http://localhost:5173,http://127.0.0.1:5173,http://localhost:3000".to_string()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            enable_debug_routes: env::var("ENABLE_DEBUG_ROUTES")
                .unwrap_or_else(|_| "true".to_string())
                .parse()?,
        })
    }

    /// Config rooted at the given directories, everything else default.
    pub fn with_dirs(data_dir: impl Into<PathBuf>, upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            upload_dir: upload_dir.into(),
            ..Self::default()
        }
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }

    pub fn submissions_file(&self) -> PathBuf {
        self.data_dir.join(SUBMISSIONS_FILE)
    }
}
