use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_FFPROBE: &str = "ffprobe";

fn default_sanitizer() -> Vec<String> {
    vec!["python3".to_string(), "clean_metadata.py".to_string()]
}

#[derive(Deserialize, Default, Debug)]
pub struct FileConfig {
    pub roots: Option<Vec<PathBuf>>,
    pub port: Option<u16>,
    pub localhost: Option<bool>,
    pub ffprobe: Option<String>,
    pub sanitizer: Option<Vec<String>>,
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug)]
pub struct Config {
    pub roots: Vec<PathBuf>,
    pub port: u16,
    pub localhost: bool,
    pub ffprobe: String,
    pub sanitizer: Vec<String>,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Merge CLI/environment values over the config file over defaults.
    pub fn resolve(file: Option<FileConfig>, args: &crate::cli::Args) -> Self {
        let file = file.unwrap_or_default();
        let roots = if args.roots.is_empty() {
            file.roots.unwrap_or_default()
        } else {
            args.roots.clone()
        };
        // BASE_DIRS is written as "a, b"; drop the padding and stray commas.
        let roots = roots
            .into_iter()
            .map(|p| match p.to_str() {
                Some(s) => PathBuf::from(s.trim()),
                None => p,
            })
            .filter(|p| !p.as_os_str().is_empty())
            .collect();
        let sanitizer = if args.sanitizer.is_empty() {
            file.sanitizer
                .filter(|cmd| !cmd.is_empty())
                .unwrap_or_else(default_sanitizer)
        } else {
            args.sanitizer.clone()
        };
        Config {
            roots,
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
            localhost: args.localhost || file.localhost.unwrap_or(false),
            ffprobe: args
                .ffprobe
                .clone()
                .or(file.ffprobe)
                .unwrap_or_else(|| DEFAULT_FFPROBE.to_string()),
            sanitizer,
            static_dir: args.static_dir.clone().or(file.static_dir),
        }
    }
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from("metascrub.toml");
    if cwd_config.exists() {
        return Some(cwd_config);
    }
    if let Some(config_dir) = dirs::config_dir() {
        let xdg_config = config_dir.join("metascrub").join("config.toml");
        if xdg_config.exists() {
            return Some(xdg_config);
        }
    }
    None
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: FileConfig = toml::from_str(&content)?;
    Ok(config)
}
