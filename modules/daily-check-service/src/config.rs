use std::env;
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "db/dailycheck.db";
const DEFAULT_PORT: u16 = 443;
const DEFAULT_API_URL: &str = "http://localhost/";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_WEB_DIR: &str = "web";

#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Base URL the index page calls back into.
    pub api_url: String,
    pub web_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_url: DEFAULT_API_URL.to_string(),
            web_dir: PathBuf::from(DEFAULT_WEB_DIR),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("PORT {:?} is not a valid port, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        Self {
            db_path: lookup("DB").map(PathBuf::from).unwrap_or(defaults.db_path),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            api_url: lookup("API_URL").unwrap_or(defaults.api_url),
            web_dir: lookup("WEB_DIR").map(PathBuf::from).unwrap_or(defaults.web_dir),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
