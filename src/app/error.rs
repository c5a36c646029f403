use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModfetchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed feed entry: {0}")]
    MalformedEntry(String),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("Interactive mode unavailable: {0}")]
    Ui(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ModfetchError>;

/// Process exit codes, one per error class.
pub mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const CONFIG_ERROR: u8 = 1;
    pub const FEED_ERROR: u8 = 2;
    pub const DOWNLOAD_ERROR: u8 = 3;
    pub const UI_ERROR: u8 = 4;
    pub const UNEXPECTED_ERROR: u8 = 5;
}

impl ModfetchError {
    /// Map an error to the exit code its class carries.
    pub fn exit_code(&self) -> u8 {
        match self {
            ModfetchError::Config(_) => exit_codes::CONFIG_ERROR,
            ModfetchError::MalformedEntry(_) | ModfetchError::FeedParse(_) => {
                exit_codes::FEED_ERROR
            }
            ModfetchError::Download(_) => exit_codes::DOWNLOAD_ERROR,
            ModfetchError::Ui(_) => exit_codes::UI_ERROR,
            _ => exit_codes::UNEXPECTED_ERROR,
        }
    }
}
