//! Engine data structures: loaded scene nodes and model transforms.
//!
//! This module contains the core data types the session layer hands to an
//! external renderer:
//!
//! - `scene_graph` holds the loaded scene node, its meshes and animation track
//! - `transform` holds the model transform and world-space placement poses

pub mod scene_graph;
pub mod transform;
