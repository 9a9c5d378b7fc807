//! Engine error taxonomy.
//!
//! Validation errors (`InvalidFormat`) are raised synchronously before any
//! asynchronous work starts. Asynchronous failures (`NotFound`, `Decode`,
//! `Denied`) surface as the terminal result of the pending operation's future
//! and leave prior state untouched. `InvalidState` is always returned to the
//! caller; the engine never retries on its own.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The locator's extension is not a recognised model format.
    #[error("unsupported model format: {locator} (expected .glb or .gltf)")]
    InvalidFormat { locator: String },

    /// The asset source could not resolve the locator.
    #[error("asset not found: {locator}")]
    NotFound { locator: String },

    /// The byte stream could not be parsed as the declared format.
    #[error("failed to decode {locator}: {reason}")]
    Decode { locator: String, reason: String },

    /// The platform cannot provide the requested capability.
    #[error("immersive feature unsupported: {0}")]
    UnsupportedFeature(String),

    /// The platform refused the session request.
    #[error("session request denied: {0}")]
    Denied(String),

    /// An operation was invoked from a state that does not allow it.
    #[error("{op} is not valid while the session is {state}")]
    InvalidState { op: &'static str, state: String },
}
