//! Real-world surface hit-testing.
//!
//! Wraps the host session's surface-detection capability. While the session
//! is active and placement is unlocked the engine polls once per rendered
//! frame; each poll intersects the viewer-centered ray of the current frame
//! with detected geometry. Results are transient: a frame with no hit
//! leaves the model at its last placed pose, and nothing is cached across
//! frames.

use instant::Duration;

use crate::{data_structures::transform::HitPose, error::EngineError, host::ImmersiveSession};

/// Per-frame context handed to the engine by the render loop.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    /// Time elapsed since the previous frame.
    pub dt: Duration,
}

/// A platform hit-test source bound to one immersive session.
pub trait HitTestSource {
    /// First valid intersection of the current frame's viewer ray with
    /// detected real-world geometry, if any.
    fn poll(&mut self, frame: &Frame) -> Option<HitPose>;

    /// Release the underlying platform source.
    fn end(&mut self);
}

/// Owns the hit-test source for the lifetime of one immersive session.
#[derive(Default)]
pub struct HitTestService {
    source: Option<Box<dyn HitTestSource>>,
}

impl HitTestService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Obtain a source from the active session.
    ///
    /// Fails with [`EngineError::UnsupportedFeature`] when the platform
    /// cannot provide one; any previous source is released first.
    pub fn begin(&mut self, session: &mut dyn ImmersiveSession) -> Result<(), EngineError> {
        self.end();
        self.source = Some(session.request_hit_test_source()?);
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.source.is_some()
    }

    /// Poll the current frame. Returns `None` when no source is active or no
    /// surface is hit this frame.
    pub fn poll(&mut self, frame: &Frame) -> Option<HitPose> {
        self.source.as_mut()?.poll(frame)
    }

    /// Release the source. Idempotent; a poll resolving after this point is
    /// simply never asked for.
    pub fn end(&mut self) {
        if let Some(mut source) = self.source.take() {
            source.end();
        }
    }
}
