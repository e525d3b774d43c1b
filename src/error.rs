//! Error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifeError {
    /// A neighborhood was requested with a radius below 1.
    #[error("invalid neighborhood radius {0}: must be at least 1")]
    InvalidRadius(i64),

    /// The simulation thread is gone and can no longer answer commands.
    #[error("simulation is no longer running")]
    SimulationStopped,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LifeError>;
