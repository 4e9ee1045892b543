//! # nodeflow-rs: visual pipeline composer core
//!
//! The editing engine behind a node-canvas UI for composing robot processing
//! pipelines: nodes with typed, named ports, directed wires drawn between
//! them by pointer, and a per-node run/stop toggle. This crate owns the data
//! model and interaction logic only — painting, the spawn menu, pan/zoom and
//! window bootstrap belong to the host shell.
//!
//! ## Architecture
//!
//! - **Graph scene**: arena-owned nodes and connections, id-handle
//!   back-references, pointer-driven connection state machine
//! - **Catalog**: node kinds, their port manifests and the spawn factory
//! - **Runtime**: opaque start/stop callbacks behind the activation toggle
//! - **Config**: connection policy and canvas settings, TOML on disk
//!
//! Everything is single-threaded and synchronous: pointer events are
//! processed to completion, one at a time, on the thread that delivers them.
//!
//! ## Example
//!
//! ```
//! use egui::{pos2, Modifiers, PointerButton};
//! use nodeflow_rs::catalog::NodeKind;
//! use nodeflow_rs::graph::GraphScene;
//!
//! let mut scene = GraphScene::new();
//! let teleop = scene.add_node(NodeKind::KeyboardTeleop.spawn(), pos2(100.0, 100.0));
//! let mux = scene.add_node(NodeKind::TwistMux.spawn(), pos2(420.0, 100.0));
//!
//! // Drag a wire from the teleop's "cmd_vel" output onto the mux's first input.
//! let from = scene.port_scene_position(
//!     nodeflow_rs::graph::PortId::new(teleop, nodeflow_rs::graph::PortDirection::Output, 0),
//! );
//! let to = scene.port_scene_position(
//!     nodeflow_rs::graph::PortId::new(mux, nodeflow_rs::graph::PortDirection::Input, 0),
//! );
//! scene.pointer_down(from, PointerButton::Primary, Modifiers::NONE);
//! scene.pointer_move(to);
//! scene.pointer_up(to, PointerButton::Primary);
//!
//! assert_eq!(scene.connection_count(), 1);
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod runtime;

// Re-export commonly used types
pub use catalog::{NodeCategory, NodeKind};
pub use config::{CanvasSettings, ConnectPolicy, EditorConfig};
pub use error::{ComposerError, Result};
pub use graph::{
    Connection, ConnectionId, ConnectionState, GraphError, GraphScene, Node, NodeId, Port,
    PortDirection, PortId, SceneItem,
};
pub use runtime::{LaunchStub, NodeRuntime, NullRuntime};
