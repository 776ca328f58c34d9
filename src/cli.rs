use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "metascrub",
    about = "Find video files with embedded title/comment tags and strip them in bulk",
    long_about = None,
    version,
)]
pub struct Args {
    /// Root directories clients may scan and clean beneath
    #[arg(env = "BASE_DIRS", value_delimiter = ',', num_args = 0..)]
    pub roots: Vec<PathBuf>,

    /// HTTP port to listen on [default: 3000]
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Path to TOML config file (overrides default search: ./metascrub.toml, ~/.config/metascrub/config.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Bind to localhost only (127.0.0.1) instead of all interfaces (0.0.0.0)
    #[arg(long)]
    pub localhost: bool,

    /// ffprobe executable used to read embedded tags [default: ffprobe]
    #[arg(long, value_name = "PROGRAM")]
    pub ffprobe: Option<String>,

    /// Sanitizer command; the file path is appended as the last argument.
    /// Repeat for each word, e.g. `--sanitizer python3 --sanitizer clean_metadata.py`
    /// [default: python3 clean_metadata.py]
    #[arg(long, value_name = "WORD")]
    pub sanitizer: Vec<String>,

    /// Directory of browser UI assets served at /
    #[arg(long, value_name = "DIR")]
    pub static_dir: Option<PathBuf>,
}
