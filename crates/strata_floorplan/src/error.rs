//! Error types for floorplan construction and perturbation.

/// Errors produced by the floorplan model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FloorplanError {
    /// The request parameters do not describe a buildable floorplan.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Which parameter was rejected and why.
        reason: String,
    },

    /// No enabled move kind can change the current state.
    #[error("no valid move exists for the current floorplan")]
    NoValidMove,
}

impl FloorplanError {
    /// Creates an [`FloorplanError::InvalidConfiguration`] with the given reason.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}
