//! Connections — directed wires between an output port and an input port.
//!
//! A connection is born pending, anchored at its start port with a free
//! cursor endpoint, and either completes (binds an end port, exactly once)
//! or is discarded. The smooth curve drawn between the endpoints is a
//! rendering concern; the core maintains only the resolved anchor positions
//! that feed it.

use egui::Pos2;

use crate::graph::id::{ConnectionId, PortId};

/// Lifecycle state of a connection. Pending → Complete happens at most once
/// and is irreversible; a complete connection can only be torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Under interactive creation; the end follows the cursor.
    Pending,
    /// Both endpoints bound; member of the scene's permanent set.
    Complete,
}

/// A directed edge between two ports, or between one port and a free
/// cursor point while pending.
#[derive(Debug, Clone)]
pub struct Connection {
    id: ConnectionId,
    /// Start port, fixed at creation. Cleared only by disconnect.
    start: Option<PortId>,
    /// End port, bound once on completion. Cleared only by disconnect.
    end: Option<PortId>,
    /// Cursor-side endpoint used while the connection is pending.
    free_end: Pos2,
    state: ConnectionState,
    /// Resolved endpoint positions for the painter, maintained by the scene.
    start_anchor: Pos2,
    end_anchor: Pos2,
}

impl Connection {
    /// A new pending connection anchored at `start`. `start_pos` seeds both
    /// anchors so the wire degenerates to a point until the first move.
    pub(crate) fn pending(id: ConnectionId, start: PortId, start_pos: Pos2) -> Self {
        Self {
            id,
            start: Some(start),
            end: None,
            free_end: start_pos,
            state: ConnectionState::Pending,
            start_anchor: start_pos,
            end_anchor: start_pos,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn start(&self) -> Option<PortId> {
        self.start
    }

    pub fn end(&self) -> Option<PortId> {
        self.end
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == ConnectionState::Complete
    }

    /// Last pushed cursor point; the effective end position while pending.
    pub fn free_end(&self) -> Pos2 {
        self.free_end
    }

    pub(crate) fn set_free_end(&mut self, pos: Pos2) {
        self.free_end = pos;
    }

    pub(crate) fn bind_end(&mut self, port: PortId) {
        self.end = Some(port);
        self.state = ConnectionState::Complete;
    }

    pub(crate) fn clear_endpoints(&mut self) {
        self.start = None;
        self.end = None;
    }

    /// Resolved start/end positions in canvas coordinates, as last refreshed
    /// by the scene.
    pub fn anchors(&self) -> (Pos2, Pos2) {
        (self.start_anchor, self.end_anchor)
    }

    pub(crate) fn set_anchors(&mut self, start: Pos2, end: Pos2) {
        self.start_anchor = start;
        self.end_anchor = end;
    }
}
