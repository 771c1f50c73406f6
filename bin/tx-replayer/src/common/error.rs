use tx_replay::ReplayError;

/// Error types for the tx-replayer command
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Replay error raised before the transaction could be replayed
    #[error("{0}")]
    Replay(#[from] ReplayError),

    /// Failed to write the result to stdout
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    /// Failed to open the log file
    #[error("Failed to create log file: {0}")]
    LogFile(#[source] std::io::Error),
}

/// Result type for the tx-replayer command
pub type Result<T> = std::result::Result<T, Error>;
