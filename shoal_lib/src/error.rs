use thiserror::Error;

/// Everything in the simulation core that can go wrong. Steady-state
/// transitions (wrapping, fading, a second collision with a dead fish) are
/// never reported through here.
#[derive(Debug, Error)]
pub enum ShoalError {
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },

    #[error("flock is full, capacity of {capacity} boids reached")]
    FlockFull { capacity: usize },

    #[error("could not write recorded data")]
    Io(#[from] std::io::Error),

    #[error("could not serialize recorded data")]
    Csv(#[from] csv::Error),
}

impl ShoalError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        ShoalError::InvalidOption {
            name,
            reason: reason.into(),
        }
    }
}
