/// Convenience result type used across scrollweave.
pub type ScrollweaveResult<T> = Result<T, ScrollweaveError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Every variant except [`ScrollweaveError::Lifecycle`] and [`ScrollweaveError::Other`] is a
/// configuration error: it is raised while a choreography is being built and prevents the
/// instance from ever ticking.
#[derive(thiserror::Error, Debug)]
pub enum ScrollweaveError {
    /// A phase marker name was declared twice in one timeline.
    #[error("duplicate phase '{name}'")]
    DuplicatePhase {
        /// Offending marker name.
        name: String,
    },

    /// A phase marker was declared before the furthest marker seen so far.
    #[error("phase '{name}' at offset {offset} precedes previously declared offset {previous}")]
    PhaseOrder {
        /// Offending marker name.
        name: String,
        /// Declared offset.
        offset: f64,
        /// Largest offset declared before it.
        previous: f64,
    },

    /// A keyframe referenced a marker that does not exist.
    #[error("unknown phase '{name}'")]
    UnknownPhase {
        /// Referenced marker name.
        name: String,
    },

    /// Any other malformed configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The instance was driven in a lifecycle state that does not allow the call.
    #[error("lifecycle error: {0}")]
    Lifecycle(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollweaveError {
    /// Build a [`ScrollweaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollweaveError::Lifecycle`] value.
    pub fn lifecycle(msg: impl Into<String>) -> Self {
        Self::Lifecycle(msg.into())
    }

    /// Build a [`ScrollweaveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ScrollweaveError::UnknownPhase`] value.
    pub fn unknown_phase(name: impl Into<String>) -> Self {
        Self::UnknownPhase { name: name.into() }
    }

    /// `true` for errors detected while building a choreography.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::DuplicatePhase { .. }
                | Self::PhaseOrder { .. }
                | Self::UnknownPhase { .. }
                | Self::Validation(_)
                | Self::Serde(_)
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
