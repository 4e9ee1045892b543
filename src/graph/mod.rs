//! Live graph-editing engine.
//!
//! The in-memory node/port/connection model and the pointer-driven state
//! machine that edits it. Ownership runs one way: the scene owns nodes and
//! the permanent connection set, each node owns its ports, and connections
//! hold only id handles to their endpoint ports.
//!
//! # Structure
//!
//! ```text
//! GraphScene ──owns──► Node ──owns──► Port
//!     │                                  ▲
//!     └──owns──► Connection ──handles────┘
//! ```
//!
//! All editing flows through [`GraphScene`]'s pointer entry points or its
//! explicit add/remove operations; there is no implicit cleanup anywhere.

pub mod connection;
pub mod error;
pub mod id;
pub mod node;
pub mod port;
pub mod scene;

pub use connection::{Connection, ConnectionState};
pub use error::{GraphError, GraphResult};
pub use id::{ConnectionId, NodeId, PortId};
pub use node::{
    Node, BOUNDS_PADDING, HEADER_HEIGHT, MIN_NODE_HEIGHT, NODE_WIDTH, PORT_SPACING,
    RUN_BUTTON_MARGIN, RUN_BUTTON_SIZE,
};
pub use port::{Port, PortDirection, PORT_RADIUS};
pub use scene::{GraphScene, SceneItem, WIRE_HIT_TOLERANCE};
