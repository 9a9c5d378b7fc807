//! Shared fakes for the engine's external collaborators: an in-memory asset
//! source, a scriptable immersive host and a queued hit-test source.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    rc::Rc,
};

use ar_ngin::{
    EngineConfig, EngineError, HitPose,
    engine::ArEngine,
    hit_test::{Frame, HitTestSource},
    host::{AssetEntry, AssetSource, ImmersiveHost, ImmersiveSession, SessionFeature, SessionMode},
};
use futures::{FutureExt, future::LocalBoxFuture};
use instant::Duration;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Smallest byte stream the glTF decoder accepts.
pub fn minimal_gltf() -> Vec<u8> {
    br#"{"asset":{"version":"2.0"}}"#.to_vec()
}

/// A frame with a fixed 16ms delta.
pub fn frame() -> Frame {
    Frame {
        dt: Duration::from_millis(16),
    }
}

/// In-memory asset source backed by a locator → bytes map.
#[derive(Default)]
pub struct MapAssetSource {
    files: HashMap<String, Vec<u8>>,
}

impl MapAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: &str, bytes: Vec<u8>) -> Self {
        self.files.insert(locator.to_string(), bytes);
        self
    }
}

impl AssetSource for MapAssetSource {
    fn list_available(&self) -> LocalBoxFuture<'static, Result<Vec<AssetEntry>, EngineError>> {
        let entries = self
            .files
            .keys()
            .map(|locator| AssetEntry {
                name: locator.clone(),
                locator: locator.clone(),
            })
            .collect();
        async move { Ok(entries) }.boxed_local()
    }

    fn resolve(&self, locator: &str) -> LocalBoxFuture<'static, Result<Vec<u8>, EngineError>> {
        let result = self.files.get(locator).cloned().ok_or(EngineError::NotFound {
            locator: locator.to_string(),
        });
        async move { result }.boxed_local()
    }
}

/// Poses the fake hit-test source will report, one entry per poll.
pub type PoseQueue = Rc<RefCell<VecDeque<Option<HitPose>>>>;

pub struct QueuedHitTestSource {
    poses: PoseQueue,
    ended: Rc<Cell<bool>>,
}

impl HitTestSource for QueuedHitTestSource {
    fn poll(&mut self, _frame: &Frame) -> Option<HitPose> {
        self.poses.borrow_mut().pop_front().flatten()
    }

    fn end(&mut self) {
        self.ended.set(true);
    }
}

pub struct FakeSession {
    /// `None` simulates a platform without surface detection.
    hit_test: Option<(PoseQueue, Rc<Cell<bool>>)>,
    end_requested: Rc<Cell<bool>>,
}

impl ImmersiveSession for FakeSession {
    fn request_hit_test_source(&mut self) -> Result<Box<dyn HitTestSource>, EngineError> {
        match self.hit_test.clone() {
            Some((poses, ended)) => Ok(Box::new(QueuedHitTestSource { poses, ended })),
            None => Err(EngineError::UnsupportedFeature("hit-test".to_string())),
        }
    }

    fn request_end(&mut self) {
        self.end_requested.set(true);
    }
}

/// Scriptable immersive host.
pub struct FakeHost {
    pub supported: bool,
    /// `Some(reason)` makes every session request fail with `Denied`.
    pub deny: Option<String>,
    /// `false` grants sessions without a hit-test source.
    pub hit_test_available: bool,
    pub poses: PoseQueue,
    pub hit_test_ended: Rc<Cell<bool>>,
    pub end_requested: Rc<Cell<bool>>,
    pub requested_features: RefCell<Vec<SessionFeature>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            supported: true,
            deny: None,
            hit_test_available: true,
            poses: Rc::new(RefCell::new(VecDeque::new())),
            hit_test_ended: Rc::new(Cell::new(false)),
            end_requested: Rc::new(Cell::new(false)),
            requested_features: RefCell::new(Vec::new()),
        }
    }

    pub fn push_pose(&self, pose: Option<HitPose>) {
        self.poses.borrow_mut().push_back(pose);
    }
}

impl ImmersiveHost for FakeHost {
    fn is_supported(&self, _mode: SessionMode) -> bool {
        self.supported
    }

    fn request_session(
        &self,
        _mode: SessionMode,
        features: &[SessionFeature],
    ) -> LocalBoxFuture<'static, Result<Box<dyn ImmersiveSession>, EngineError>> {
        *self.requested_features.borrow_mut() = features.to_vec();
        let result = match &self.deny {
            Some(reason) => Err(EngineError::Denied(reason.clone())),
            None => Ok(Box::new(FakeSession {
                hit_test: self
                    .hit_test_available
                    .then(|| (Rc::clone(&self.poses), Rc::clone(&self.hit_test_ended))),
                end_requested: Rc::clone(&self.end_requested),
            }) as Box<dyn ImmersiveSession>),
        };
        async move { result }.boxed_local()
    }
}

/// Engine wired to a scriptable host and an in-memory asset source.
pub fn engine_with(
    config: EngineConfig,
    assets: MapAssetSource,
    host: Rc<FakeHost>,
) -> ArEngine {
    init_logging();
    ArEngine::new(config, Rc::new(assets), host)
}
