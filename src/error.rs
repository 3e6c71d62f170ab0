use thiserror::Error;

/// Errors on the config/startup path. The sampling and matching core
/// never produces errors; its failure modes degrade to empty or fallback
/// results instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("could not determine a config directory for this platform")]
    NoConfigDir,

    #[error("failed to install signal handler: {0}")]
    Signal(#[from] ctrlc::Error),
}
