use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Message(String),

    #[error("{msg}: {source}")]
    WithSource {
        msg: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to install logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("Configuration lock poisoned")]
    LockPoisoned,
}

impl Error {
    pub fn new(msg: impl Into<String>) -> Self {
        Error::Message(msg.into())
    }

    pub fn with_source(
        msg: impl Into<String>, source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Error::WithSource {
            msg: msg.into(),
            source,
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for Error {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        Error::LockPoisoned
    }
}
