//! Immersive session lifecycle.
//!
//! A finite-state machine over the life of an immersive session:
//!
//! ```text
//! Inactive -> Requesting -> Active -> Ended -> Inactive
//!                  \
//!                   -> Failed(reason) -> Inactive
//! ```
//!
//! Every transition is driven by a discrete event: the caller asking to
//! start or stop, the host granting or denying the request, or the host
//! announcing that the session ended. `stop_immersive` only *requests*
//! termination; the controller does not consider itself ended until the host
//! confirms through the same end event used for external cancellation, so
//! voluntary and involuntary termination share one code path.

use futures::{FutureExt, future::LocalBoxFuture};

use crate::{
    error::EngineError,
    host::{HostEvent, ImmersiveHost, ImmersiveSession, SessionFeature, SessionMode},
};

/// Lifecycle state of the immersive session. Exactly one per engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Inactive,
    Requesting,
    Active,
    Ended,
    Failed(String),
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Inactive => "inactive",
            SessionState::Requesting => "requesting",
            SessionState::Active => "active",
            SessionState::Ended => "ended",
            SessionState::Failed(_) => "failed",
        }
    }
}

/// Terminal result of one session request, fed back via
/// [`LifecycleController::finish_start`].
pub struct StartOutcome {
    generation: u64,
    result: Result<Box<dyn ImmersiveSession>, EngineError>,
}

pub struct LifecycleController {
    state: SessionState,
    mode: SessionMode,
    // Guards against a session grant resolving after the attempt it belongs
    // to was torn down or superseded.
    generation: u64,
    session: Option<Box<dyn ImmersiveSession>>,
    last_failure: Option<String>,
}

impl LifecycleController {
    pub fn new(mode: SessionMode) -> Self {
        Self {
            state: SessionState::Inactive,
            mode,
            generation: 0,
            session: None,
            last_failure: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    /// Reason the most recent session attempt failed, if any.
    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }

    pub(crate) fn session_mut(&mut self) -> Option<&mut (dyn ImmersiveSession + '_)> {
        self.session.as_deref_mut().map(|s| s as _)
    }

    /// Probe capability and put a session request in flight.
    ///
    /// Only valid from `Inactive`; from any other state this fails with
    /// [`EngineError::InvalidState`] and has no side effect. The returned
    /// future must be driven by the caller and its outcome handed to
    /// [`Self::finish_start`].
    pub fn start(
        &mut self,
        host: &dyn ImmersiveHost,
        features: &[SessionFeature],
    ) -> Result<LocalBoxFuture<'static, StartOutcome>, EngineError> {
        if self.state != SessionState::Inactive {
            return Err(EngineError::InvalidState {
                op: "start_immersive",
                state: self.state.name().to_string(),
            });
        }
        if !host.is_supported(self.mode) {
            let err = EngineError::UnsupportedFeature(format!("{:?}", self.mode));
            return Err(self.fail(err));
        }
        self.state = SessionState::Requesting;
        self.generation += 1;
        let generation = self.generation;
        let request = host.request_session(self.mode, features);
        Ok(async move {
            StartOutcome {
                generation,
                result: request.await,
            }
        }
        .boxed_local())
    }

    /// Apply the outcome of a session request.
    ///
    /// A grant belonging to a superseded or torn-down attempt is discarded;
    /// a denial moves through `Failed` and back to `Inactive`, surfacing the
    /// reason to the caller.
    pub fn finish_start(&mut self, outcome: StartOutcome) -> Result<(), EngineError> {
        if outcome.generation != self.generation || self.state != SessionState::Requesting {
            log::warn!("discarding stale session grant (engine is {})", self.state.name());
            if let Ok(mut session) = outcome.result {
                session.request_end();
            }
            return Ok(());
        }
        match outcome.result {
            Ok(session) => {
                self.session = Some(session);
                self.last_failure = None;
                self.state = SessionState::Active;
                log::info!("immersive session active");
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Ask the host to terminate the active session.
    ///
    /// The state stays `Active` until [`HostEvent::SessionEnded`] arrives.
    pub fn stop(&mut self) -> Result<(), EngineError> {
        if self.state != SessionState::Active {
            return Err(EngineError::InvalidState {
                op: "stop_immersive",
                state: self.state.name().to_string(),
            });
        }
        if let Some(session) = self.session.as_mut() {
            session.request_end();
        }
        Ok(())
    }

    /// React to a host-level event. The end event drives `Active -> Ended`
    /// whether or not the caller ever asked to stop.
    pub fn on_host_event(&mut self, event: HostEvent) {
        match event {
            HostEvent::SessionEnded => {
                if self.state != SessionState::Active {
                    log::warn!("session end event while {}", self.state.name());
                    return;
                }
                self.session = None;
                self.generation += 1;
                self.state = SessionState::Ended;
                log::info!("immersive session ended");
            }
        }
    }

    /// Settle terminal states; called once per frame tick so `Ended` and
    /// `Failed` return to `Inactive` on the next frame, after which a new
    /// `start` is valid again.
    pub fn finish_cleanup(&mut self) {
        if matches!(self.state, SessionState::Ended | SessionState::Failed(_)) {
            self.state = SessionState::Inactive;
        }
    }

    /// Drop any session unconditionally; used at engine disposal.
    pub fn dispose(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.request_end();
        }
        self.session = None;
        self.generation += 1;
        self.state = SessionState::Inactive;
    }

    /// Record a failed attempt and surface the reason. The state settles
    /// back to `Inactive` on the next frame tick; there is no automatic
    /// retry; a new attempt takes an explicit `start`.
    fn fail(&mut self, err: EngineError) -> EngineError {
        let reason = err.to_string();
        log::error!("immersive session attempt failed: {reason}");
        self.state = SessionState::Failed(reason.clone());
        self.last_failure = Some(reason);
        err
    }
}
