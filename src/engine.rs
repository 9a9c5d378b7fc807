//! Composition root: wires loader, scene session, lifecycle controller,
//! gesture interpreter and hit-test service into the one engine surface the
//! UI layer consumes.
//!
//! # Async contract
//!
//! Everything runs on a single cooperatively scheduled thread around the
//! per-frame render callback. The two long-running operations, model loads
//! and session requests, hand the caller a future to drive; the resolved
//! outcome is fed back through [`ArEngine::finish_load`] /
//! [`ArEngine::finish_start`]. Each outcome carries the generation of the
//! attempt it belongs to, so a load superseded by a newer one, or a session
//! grant landing after teardown, is discarded instead of clobbering newer
//! state. A pending operation never stalls frame presentation of whatever is
//! already on screen.

use std::rc::Rc;

use cgmath::Deg;
use futures::{FutureExt, future::LocalBoxFuture};
use winit::event::WindowEvent;

use crate::{
    config::EngineConfig,
    data_structures::{scene_graph::SceneNode, transform::Transform},
    error::EngineError,
    gesture::{GestureInterpreter, GestureUpdate, PointerEvent, WinitPointerAdapter},
    hit_test::{Frame, HitTestService},
    host::{AssetSource, HostEvent, ImmersiveHost, SessionMode},
    lifecycle::{LifecycleController, SessionState, StartOutcome},
    resources::{self, ModelHandle},
    session::{SceneSession, TransformBounds},
};

/// Terminal result of one model load, fed back via [`ArEngine::finish_load`].
pub struct LoadOutcome {
    generation: u64,
    handle: ModelHandle,
    result: Result<SceneNode, EngineError>,
}

/// Transform snapshot taken when a gesture segment begins; cumulative
/// gesture deltas are applied against it so per-event updates cannot drift.
#[derive(Clone, Copy, Debug)]
struct GestureAnchor {
    yaw: Deg<f32>,
    pitch: Deg<f32>,
    scale: f32,
}

pub struct ArEngine {
    config: EngineConfig,
    assets: Rc<dyn AssetSource>,
    host: Rc<dyn ImmersiveHost>,
    scene: SceneSession,
    lifecycle: LifecycleController,
    gestures: GestureInterpreter,
    hit_test: HitTestService,
    pointer_adapter: WinitPointerAdapter,
    gesture_anchor: Option<GestureAnchor>,
    load_generation: u64,
    disposed: bool,
}

impl ArEngine {
    pub fn new(
        config: EngineConfig,
        assets: Rc<dyn AssetSource>,
        host: Rc<dyn ImmersiveHost>,
    ) -> Self {
        let bounds = TransformBounds {
            min_scale: config.min_scale,
            max_scale: config.max_scale,
            pitch_limit: config.pitch_limit,
        };
        let gestures = GestureInterpreter::new(
            config.rotation_sensitivity,
            config.enable_gesture_rotation,
            config.enable_gesture_scale,
        );
        Self {
            config,
            assets,
            host,
            scene: SceneSession::new(bounds),
            lifecycle: LifecycleController::new(SessionMode::ImmersiveAr),
            gestures,
            hit_test: HitTestService::new(),
            pointer_adapter: WinitPointerAdapter::new(),
            gesture_anchor: None,
            load_generation: 0,
            disposed: false,
        }
    }

    /// Read-only session state, for the UI layer.
    pub fn session_state(&self) -> &SessionState {
        self.lifecycle.state()
    }

    /// Reason the most recent immersive attempt failed, if any.
    pub fn last_failure(&self) -> Option<&str> {
        self.lifecycle.last_failure()
    }

    /// Read-only transform of the active model, for the render tick.
    pub fn transform(&self) -> &Transform {
        self.scene.transform()
    }

    /// The active scene node, for the renderer.
    pub fn scene_node(&self) -> Option<&SceneNode> {
        self.scene.node()
    }

    /// Begin loading a model.
    ///
    /// The handle is already format-validated ([`ModelHandle::parse`] is the
    /// synchronous rejection point). Drive the returned future and hand its
    /// outcome to [`ArEngine::finish_load`]; starting another load first
    /// supersedes this one and its late result will be discarded.
    pub fn load_model(
        &mut self,
        handle: ModelHandle,
    ) -> Result<LocalBoxFuture<'static, LoadOutcome>, EngineError> {
        self.guard_disposed("load_model")?;
        self.load_generation += 1;
        let generation = self.load_generation;
        let source = Rc::clone(&self.assets);
        log::info!("loading model {}", handle.locator());
        Ok(async move {
            let result = resources::load_scene_node(source, handle.clone()).await;
            LoadOutcome {
                generation,
                handle,
                result,
            }
        }
        .boxed_local())
    }

    /// Apply a resolved load.
    ///
    /// Returns `Ok(true)` when the node was attached, `Ok(false)` when the
    /// outcome was stale and discarded (a newer load superseded it, or the
    /// engine was disposed). A failed load surfaces its error and leaves the
    /// previously displayed model untouched.
    pub fn finish_load(&mut self, outcome: LoadOutcome) -> Result<bool, EngineError> {
        if self.disposed || outcome.generation != self.load_generation {
            log::warn!(
                "discarding stale load result for {}",
                outcome.handle.locator()
            );
            return Ok(false);
        }
        let node = outcome.result?;
        log::info!(
            "model {} ready ({} meshes{})",
            outcome.handle.locator(),
            node.meshes.len(),
            if node.has_animation() { ", animated" } else { "" },
        );
        self.scene.attach(node);
        self.gesture_anchor = None;
        Ok(true)
    }

    /// Toggle animation playback; no-op when the model carries no track.
    pub fn set_animation_playing(&mut self, playing: bool) {
        self.scene.set_animation_playing(playing);
    }

    /// Request an immersive session from the host.
    ///
    /// Valid only while `Inactive`. Drive the returned future and hand its
    /// outcome to [`ArEngine::finish_start`].
    pub fn start_immersive(
        &mut self,
    ) -> Result<LocalBoxFuture<'static, StartOutcome>, EngineError> {
        self.guard_disposed("start_immersive")?;
        self.lifecycle
            .start(self.host.as_ref(), &self.config.required_features)
    }

    /// Apply the outcome of a session request. On activation, hit-test
    /// polling begins unless disabled or the placement is already locked.
    pub fn finish_start(&mut self, outcome: StartOutcome) -> Result<(), EngineError> {
        self.lifecycle.finish_start(outcome)?;
        if self.lifecycle.is_active()
            && self.config.enable_hit_test
            && !self.scene.placement_locked()
        {
            if let Some(session) = self.lifecycle.session_mut() {
                // An active session without surface detection still works:
                // the model keeps its current placement and gestures remain
                // available.
                if let Err(e) = self.hit_test.begin(session) {
                    log::warn!("hit-testing unavailable for this session: {e}");
                }
            }
        }
        Ok(())
    }

    /// Ask the host to terminate the immersive session. The engine stays
    /// `Active` until the host confirms via [`HostEvent::SessionEnded`].
    pub fn stop_immersive(&mut self) -> Result<(), EngineError> {
        self.guard_disposed("stop_immersive")?;
        self.lifecycle.stop()
    }

    /// Feed a host-level event into the lifecycle machine. The session end
    /// event must arrive here even when the caller never asked to stop.
    pub fn on_host_event(&mut self, event: HostEvent) {
        if self.disposed {
            return;
        }
        if event == HostEvent::SessionEnded {
            self.hit_test.end();
        }
        self.lifecycle.on_host_event(event);
    }

    /// Fix the model placement. Hit-test poses stop moving it; gestures may
    /// still adjust scale and orientation.
    pub fn lock_placement(&mut self) -> Result<(), EngineError> {
        self.guard_disposed("lock_placement")?;
        self.scene.lock_placement()
    }

    /// Feed a raw winit window event through the pointer adapter.
    pub fn on_window_event(&mut self, event: &WindowEvent) {
        if let Some(pointer) = self.pointer_adapter.translate(event) {
            self.on_pointer_event(pointer);
        }
    }

    /// Feed a platform-neutral pointer event through the gesture machine and
    /// apply the resulting transform mutations.
    pub fn on_pointer_event(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        for update in self.gestures.handle(event) {
            self.apply_gesture(update);
        }
    }

    /// Per-frame tick, called once per rendered frame.
    ///
    /// Settles post-session cleanup, polls hit-testing while active and
    /// unlocked, and advances animation playback.
    pub fn on_frame(&mut self, frame: &Frame) {
        if self.disposed {
            return;
        }
        self.lifecycle.finish_cleanup();
        if self.lifecycle.is_active() && !self.scene.placement_locked() {
            if let Some(pose) = self.hit_test.poll(frame) {
                self.scene.apply_placement(pose);
            }
        }
        self.scene.advance(frame.dt);
    }

    /// Tear the engine down: releases the hit-test source, requests session
    /// termination, drops the scene node. Idempotent; all further operations
    /// are rejected or ignored.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.hit_test.end();
        self.lifecycle.dispose();
        self.scene.detach();
        self.gesture_anchor = None;
        self.load_generation += 1;
        self.disposed = true;
    }

    fn apply_gesture(&mut self, update: GestureUpdate) {
        match update {
            GestureUpdate::Began => {
                let t = self.scene.transform();
                self.gesture_anchor = Some(GestureAnchor {
                    yaw: t.yaw,
                    pitch: t.pitch,
                    scale: t.scale,
                });
            }
            GestureUpdate::Rotate { yaw, pitch } => {
                if let Some(anchor) = self.gesture_anchor {
                    self.scene
                        .set_orientation(anchor.yaw + yaw, anchor.pitch + pitch);
                }
            }
            GestureUpdate::Scale { ratio } => {
                if let Some(anchor) = self.gesture_anchor {
                    self.scene.set_scale(anchor.scale * ratio);
                }
            }
            GestureUpdate::Ended => {
                self.gesture_anchor = None;
            }
        }
    }

    fn guard_disposed(&self, op: &'static str) -> Result<(), EngineError> {
        if self.disposed {
            return Err(EngineError::InvalidState {
                op,
                state: "disposed".to_string(),
            });
        }
        Ok(())
    }
}
