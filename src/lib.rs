//! ar-ngin
//!
//! An AR scene session engine: the session/interaction layer between a UI
//! and an existing renderer. It owns the lifecycle of a loaded 3D model,
//! establishes and tears down immersive sessions against an injected
//! platform host, translates raw pointer/touch input into model transforms
//! and places the model on real-world surfaces via hit-testing. Rendering
//! itself stays outside: the engine hands the renderer a scene node and a
//! transform to read each tick.
//!
//! High-level modules
//! - `config`: engine tuning knobs and behavior flags
//! - `data_structures`: scene node, animation track, transform and poses
//! - `engine`: the composition root exposed to the UI layer
//! - `error`: the engine error taxonomy
//! - `gesture`: pointer/touch gesture state machine and winit adapter
//! - `hit_test`: per-frame real-world surface hit-testing
//! - `host`: contracts for the asset source and immersive host collaborators
//! - `lifecycle`: the immersive session finite-state machine
//! - `resources`: model handle validation and asynchronous glTF loading
//! - `session`: the scene session owning the active node and its transform
//!

pub mod config;
pub mod data_structures;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod hit_test;
pub mod host;
pub mod lifecycle;
pub mod resources;
pub mod session;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::{Deg, Quaternion, Rad, Vector3};
pub use winit::event::WindowEvent;

pub use crate::{
    config::EngineConfig,
    data_structures::{
        scene_graph::SceneNode,
        transform::{HitPose, Transform},
    },
    engine::{ArEngine, LoadOutcome},
    error::EngineError,
    gesture::PointerEvent,
    hit_test::Frame,
    host::{AssetEntry, AssetSource, HostEvent, ImmersiveHost, ImmersiveSession},
    lifecycle::SessionState,
    resources::ModelHandle,
};
