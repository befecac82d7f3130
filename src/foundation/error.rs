/// Convenience result type used across slidereveal.
pub type RevealResult<T> = Result<T, RevealError>;

/// Error taxonomy for scene validation, rendering and worker orchestration.
#[derive(thiserror::Error, Debug)]
pub enum RevealError {
    /// Structurally invalid scene description (mismatched arrays, no pairs, bad numbers).
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// Remote audio could not be fetched or encoded. Recovered by dropping the track.
    #[error("audio fetch error: {0}")]
    AudioFetch(String),

    /// The requested composition id is not registered in the render bundle.
    #[error("composition not found: {0}")]
    CompositionNotFound(String),

    /// The rendering engine or the isolated worker terminated abnormally.
    #[error("render failed: {0}")]
    RenderFailed(String),

    /// The worker exited successfully but its response frame was malformed.
    #[error("worker protocol error: {0}")]
    WorkerProtocol(String),

    /// Errors while producing or encoding frames.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RevealError {
    /// Build a [`RevealError::InvalidPayload`] value.
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload(msg.into())
    }

    /// Build a [`RevealError::AudioFetch`] value.
    pub fn audio_fetch(msg: impl Into<String>) -> Self {
        Self::AudioFetch(msg.into())
    }

    /// Build a [`RevealError::CompositionNotFound`] value.
    pub fn composition_not_found(id: impl Into<String>) -> Self {
        Self::CompositionNotFound(id.into())
    }

    /// Build a [`RevealError::RenderFailed`] value.
    pub fn render_failed(msg: impl Into<String>) -> Self {
        Self::RenderFailed(msg.into())
    }

    /// Build a [`RevealError::WorkerProtocol`] value.
    pub fn worker_protocol(msg: impl Into<String>) -> Self {
        Self::WorkerProtocol(msg.into())
    }

    /// Build a [`RevealError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// `true` for errors caused by the caller's payload rather than the render machinery.
    ///
    /// The composition id is server configuration, so an unknown one is not a client error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidPayload(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
