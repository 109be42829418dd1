use std::env;
use std::path::PathBuf;

use crate::errors::AppError;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_FILE: &str = "storage/app/employees.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Backing file shared by intake and listing.
    pub data_file: PathBuf,
    /// `None` keeps the actix default (one worker per core).
    pub workers: Option<usize>,
}

impl Config {
    /// Reads `APP_HOST`, `APP_PORT`, `EMPLOYEE_DATA_FILE` and `APP_WORKERS`.
    /// Call after `dotenv()` so a `.env` file is honored.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = value("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match value("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("APP_PORT must be a port number, got '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let data_file = value("EMPLOYEE_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let workers = match value("APP_WORKERS") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    return Err(AppError::Config(format!(
                        "APP_WORKERS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            },
            None => None,
        };

        Ok(Config { host, port, data_file, workers })
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.host.clone(), self.port)
    }
}
