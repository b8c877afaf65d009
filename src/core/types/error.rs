use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
    #[error("Invalid mutant execution result: {0}")]
    Result(#[from] ResultError),
    #[error("Signal handling error: {0}")]
    Signal(#[from] SignalError),
    #[error("{0}")]
    Metrics(#[from] MetricsError),
}

/// Rejection of a malformed mutant execution result, raised before it can reach a collector
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResultError {
    #[error("required field `{0}` is empty")]
    EmptyField(&'static str),
    #[error("line numbers are 1-based, got 0")]
    InvalidLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignalError {
    #[error("a signal subscriber is already registered for this process")]
    AlreadyRegistered,
    #[error("failed to install signal handler: {0}")]
    Handler(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("The minimum required MSI percentage should be {min}%, but actual is {msi}%")]
    MinMsi { msi: f64, min: f64 },
    #[error(
        "The minimum required Covered Code MSI percentage should be {min}%, but actual is {msi}%"
    )]
    MinCoveredMsi { msi: f64, min: f64 },
}
