//! Configuration for modfetch.
//!
//! Defaults are read from `~/.config/modfetch/config.toml` at startup; if
//! the file doesn't exist a commented default is created. CLI flags always
//! override file values, and the result is a single immutable [`Settings`]
//! passed to every component.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::app::ModfetchError;
use crate::cli::Cli;

pub const FEATURED_FEED_URL: &str = "https://modarchive.org/rss.php?request=featured";
pub const UPLOADS_FEED_URL: &str = "https://modarchive.org/rss.php?request=uploads";

/// Which feed the run polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    Featured,
    AllRecent,
}

impl FeedKind {
    /// Size of the window the feed serves, and so the ceiling for `--count`.
    pub fn window_ceiling(self) -> usize {
        match self {
            FeedKind::Featured => 40,
            FeedKind::AllRecent => 100,
        }
    }
}

/// Where the feed body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Remote(String),
    Local(PathBuf),
}

/// How the run decides what to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Fetch everything newer than the ownership boundary (default).
    Boundary,
    /// Fetch exactly the last N entries.
    Count(usize),
    /// Browse the feed in the terminal UI.
    Interactive,
}

/// Immutable per-run settings, built once from CLI flags and the config
/// file. No component reads ambient global state.
#[derive(Debug, Clone)]
pub struct Settings {
    pub feed_kind: FeedKind,
    pub feed_source: FeedSource,
    pub mode: RunMode,
    pub output_dir: PathBuf,
}

impl Settings {
    pub fn new(cli: &Cli, file: &FileConfig) -> crate::app::Result<Self> {
        let feed_kind = if cli.all_recent {
            FeedKind::AllRecent
        } else {
            FeedKind::Featured
        };

        if let Some(count) = cli.count {
            let ceiling = feed_kind.window_ceiling();
            if count == 0 || count > ceiling {
                return Err(ModfetchError::Config(format!(
                    "count must be between 1 and {} for this feed",
                    ceiling
                )));
            }
        }

        let mode = if cli.interactive {
            RunMode::Interactive
        } else if let Some(count) = cli.count {
            RunMode::Count(count)
        } else {
            RunMode::Boundary
        };

        let feed_source = match &cli.feed {
            Some(value) => {
                let path = Path::new(value);
                if path.exists() {
                    FeedSource::Local(path.to_path_buf())
                } else {
                    FeedSource::Remote(value.clone())
                }
            }
            None => FeedSource::Remote(match feed_kind {
                FeedKind::Featured => file.feeds.featured.clone(),
                FeedKind::AllRecent => file.feeds.uploads.clone(),
            }),
        };

        let output_dir = match cli.output.clone().or_else(|| file.output_dir.clone()) {
            Some(dir) => dir,
            None => default_output_dir()?,
        };

        Ok(Self {
            feed_kind,
            feed_source,
            mode,
            output_dir,
        })
    }
}

fn default_output_dir() -> crate::app::Result<PathBuf> {
    let music_dir = dirs::audio_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| ModfetchError::Config("could not determine a music directory".into()))?;
    Ok(music_dir.join("modarchive"))
}

/// On-disk configuration file contents.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub output_dir: Option<PathBuf>,
    pub feeds: FeedUrls,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedUrls {
    pub featured: String,
    pub uploads: String,
}

impl Default for FeedUrls {
    fn default() -> Self {
        Self {
            featured: FEATURED_FEED_URL.to_string(),
            uploads: UPLOADS_FEED_URL.to_string(),
        }
    }
}

impl FileConfig {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with
    /// comments. Missing fields use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// `~/.config/modfetch/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("modfetch").join("config.toml"))
    }

    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    fn default_config_content() -> String {
        r##"# modfetch configuration
#
# Values here are defaults; CLI flags always win.

# Destination directory for downloaded modules.
# Defaults to <music dir>/modarchive when unset.
# output_dir = "/home/you/Music/modarchive"

[feeds]
# Recently featured modules (window of 40 entries).
featured = "https://modarchive.org/rss.php?request=featured"
# All recent uploads (window of 100 entries).
uploads = "https://modarchive.org/rss.php?request=uploads"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl From<ConfigError> for ModfetchError {
    fn from(err: ConfigError) -> Self {
        ModfetchError::Config(err.to_string())
    }
}
