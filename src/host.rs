//! Contracts for the engine's external collaborators.
//!
//! The engine never talks to a concrete platform. Assets arrive through an
//! injected [`AssetSource`] and immersive capability through an injected
//! [`ImmersiveHost`]; both are constructed by the embedding application and
//! passed in, never reached through module-level globals. Host-side events
//! (most importantly session end) are fed back to the engine as discrete
//! [`HostEvent`] values rather than ad hoc callbacks.

use futures::future::LocalBoxFuture;

use crate::{error::EngineError, hit_test::HitTestSource};

/// Immersive session mode the engine can request from the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionMode {
    ImmersiveAr,
    ImmersiveVr,
}

/// Capabilities the engine asks the host to provide with the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionFeature {
    LocalFloor,
    LightEstimation,
    HitTest,
}

/// Discrete events originating from the host while a session is live.
///
/// `SessionEnded` covers both voluntary termination (the caller asked the
/// host to end) and external cancellation (headset removed, navigation,
/// interrupt); the engine handles both through this one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostEvent {
    SessionEnded,
}

/// A granted immersive session.
pub trait ImmersiveSession {
    /// Create a hit-test source for this session.
    ///
    /// Fails with [`EngineError::UnsupportedFeature`] when the platform has
    /// no surface detection for the active session.
    fn request_hit_test_source(&mut self) -> Result<Box<dyn HitTestSource>, EngineError>;

    /// Ask the host to terminate the session. Completion is observed through
    /// a later [`HostEvent::SessionEnded`], never assumed.
    fn request_end(&mut self);
}

/// The platform capability layer granting immersive sessions.
pub trait ImmersiveHost {
    fn is_supported(&self, mode: SessionMode) -> bool;

    fn request_session(
        &self,
        mode: SessionMode,
        features: &[SessionFeature],
    ) -> LocalBoxFuture<'static, Result<Box<dyn ImmersiveSession>, EngineError>>;
}

/// A named, loadable asset as reported by the asset source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetEntry {
    pub name: String,
    pub locator: String,
}

/// Storage collaborator yielding model listings and byte streams.
///
/// Resolution failures map to [`EngineError::NotFound`] at the loader
/// boundary; the engine attaches no retry policy of its own.
pub trait AssetSource {
    fn list_available(&self) -> LocalBoxFuture<'static, Result<Vec<AssetEntry>, EngineError>>;

    fn resolve(&self, locator: &str) -> LocalBoxFuture<'static, Result<Vec<u8>, EngineError>>;
}
