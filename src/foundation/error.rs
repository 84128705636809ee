/// Convenience result type used across Scrollwork.
pub type ScrollworkResult<T> = Result<T, ScrollworkError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Everything here is a configuration or boundary error. Per-frame evaluation never fails:
/// degenerate geometry and detached targets degrade to "no effect" instead.
#[derive(thiserror::Error, Debug)]
pub enum ScrollworkError {
    /// Invalid user-provided scene, binding or form data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Invalid timeline entries or playback parameters.
    #[error("animation error: {0}")]
    Animation(String),

    /// Errors while resolving layout-dependent state.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Contact-form relay transport or protocol failure.
    #[error("relay error: {0}")]
    Relay(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrollworkError {
    /// Build a [`ScrollworkError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrollworkError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`ScrollworkError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`ScrollworkError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`ScrollworkError::Relay`] value.
    pub fn relay(msg: impl Into<String>) -> Self {
        Self::Relay(msg.into())
    }
}

impl From<serde_json::Error> for ScrollworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
