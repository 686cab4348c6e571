/// Result alias used across the crate.
pub type SceneResult<T> = Result<T, SceneError>;

/// Error taxonomy for scene generation and composition.
///
/// Every failure is local to one generation call. Generation is deterministic, so a failure
/// recurs identically for the same input.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Malformed input or a violated scene invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Empty or degenerate dataset shape. The compiler answers these with an empty scene.
    #[error("shape error: {0}")]
    Shape(String),

    /// A logical key has no bound object (stepper/emitter contract violation).
    #[error("binding error: {0}")]
    Binding(String),

    /// An id reference could not be resolved while composing scenes.
    #[error("reference error: {0}")]
    Reference(String),

    /// Negative, non-finite or non-monotonic duration.
    #[error("timing error: {0}")]
    Timing(String),

    /// A stepper misbehaved, e.g. ran past its event budget.
    #[error("simulation error: {0}")]
    Simulation(String),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::Shape`] value.
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Build a [`SceneError::Binding`] value.
    pub fn binding(msg: impl Into<String>) -> Self {
        Self::Binding(msg.into())
    }

    /// Build a [`SceneError::Reference`] value.
    pub fn reference(msg: impl Into<String>) -> Self {
        Self::Reference(msg.into())
    }

    /// Build a [`SceneError::Timing`] value.
    pub fn timing(msg: impl Into<String>) -> Self {
        Self::Timing(msg.into())
    }

    /// Build a [`SceneError::Simulation`] value.
    pub fn simulation(msg: impl Into<String>) -> Self {
        Self::Simulation(msg.into())
    }

    /// Build a [`SceneError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// `true` for errors that the compiler converts into an empty scene instead of failing.
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
