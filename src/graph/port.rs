//! Ports — directional named attachment points owned by a node.
//!
//! A port's position is expressed in its node's local frame and is
//! recomputed by the node's layout pass whenever the port sequences change.
//! The attached-connection list holds `ConnectionId` handles only; the
//! connections themselves live in the scene arena.

use egui::Pos2;

use crate::graph::id::ConnectionId;

/// Whether a port is an input or output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortDirection {
    Input,
    Output,
}

/// Radius of the circular hit area around a port's center, in canvas units.
pub const PORT_RADIUS: f32 = 8.0;

/// A named attachment point on one side of a node.
#[derive(Debug, Clone)]
pub struct Port {
    pub name: String,
    pub direction: PortDirection,
    /// Position relative to the owning node's local frame. Set by the node
    /// layout pass; `(0, 0)` until the first pass runs.
    pub relative_pos: Pos2,
    pub radius: f32,
    /// Connections currently attached to this port (non-owning handles).
    connections: Vec<ConnectionId>,
}

impl Port {
    pub(crate) fn new(name: impl Into<String>, direction: PortDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            relative_pos: Pos2::ZERO,
            radius: PORT_RADIUS,
            connections: Vec::new(),
        }
    }

    /// True iff `point` (in the owning node's local frame) falls within the
    /// port's circular hit area.
    pub fn contains_point(&self, point: Pos2) -> bool {
        self.relative_pos.distance_sq(point) <= self.radius * self.radius
    }

    /// Connections attached to this port, in attachment order.
    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }

    pub fn is_connected(&self) -> bool {
        !self.connections.is_empty()
    }

    pub(crate) fn attach(&mut self, id: ConnectionId) {
        if !self.connections.contains(&id) {
            self.connections.push(id);
        }
    }

    /// Removes `id` from the attached set. Safe to call when `id` is not
    /// attached.
    pub(crate) fn detach(&mut self, id: ConnectionId) {
        self.connections.retain(|&c| c != id);
    }
}
