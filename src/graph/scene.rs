//! The graph scene — arena storage and the pointer-driven editing engine.
//!
//! `GraphScene` owns every node and every completed connection, plus at most
//! one draft connection while the user is dragging a wire. Pointer events
//! arrive through [`GraphScene::pointer_down`] / [`pointer_move`] /
//! [`pointer_up`] and are classified against the scene front-to-back; all
//! mutation is synchronous, one event at a time, and every structural change
//! updates every back-reference before the method returns.
//!
//! Storage follows the slot-vector pattern: ids are indices, removal marks
//! the slot deleted, and all iteration filters deleted slots. Nothing is
//! compacted, so handles held by ports and connections stay stable.
//!
//! [`pointer_move`]: GraphScene::pointer_move
//! [`pointer_up`]: GraphScene::pointer_up

use egui::{Modifiers, PointerButton, Pos2, Vec2};

use crate::config::ConnectPolicy;
use crate::graph::connection::{Connection, ConnectionState};
use crate::graph::error::{GraphError, GraphResult};
use crate::graph::id::{ConnectionId, NodeId, PortId};
use crate::graph::node::Node;
use crate::graph::port::{Port, PortDirection};

/// Distance from a wire's start→end chord within which [`GraphScene::items_at`]
/// reports the connection.
pub const WIRE_HIT_TOLERANCE: f32 = 4.0;

/// A scene item handle, for queries and removal over the fixed set of graph
/// item kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneItem {
    Node(NodeId),
    Connection(ConnectionId),
}

struct NodeSlot {
    node: Node,
    deleted: bool,
}

struct ConnectionSlot {
    connection: Connection,
    deleted: bool,
}

/// In-progress connection creation: the captured start port and the pending
/// wire. Holding both in one option keeps them set and cleared together.
#[derive(Debug, Clone, Copy)]
struct DraftWire {
    start: PortId,
    wire: ConnectionId,
}

/// An active node drag: which node, and the pointer-to-node offset captured
/// at press time.
#[derive(Debug, Clone, Copy)]
struct DragState {
    node: NodeId,
    grab_offset: Vec2,
}

/// Pointer-down classification, resolved before any mutation.
enum DownAction {
    Toggle(NodeId),
    StartWire(PortId),
    ConsumeInput,
    Body(NodeId),
}

/// The canvas scene: all nodes, all completed connections, and the
/// interactive editing state.
pub struct GraphScene {
    nodes: Vec<NodeSlot>,
    connections: Vec<ConnectionSlot>,
    draft: Option<DraftWire>,
    drag: Option<DragState>,
    hovered_port: Option<PortId>,
    policy: ConnectPolicy,
}

impl GraphScene {
    pub fn new() -> Self {
        Self::with_policy(ConnectPolicy::default())
    }

    pub fn with_policy(policy: ConnectPolicy) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            draft: None,
            drag: None,
            hovered_port: None,
            policy,
        }
    }

    pub fn policy(&self) -> &ConnectPolicy {
        &self.policy
    }

    // ── Nodes ──

    /// Adds `node` at `position` and returns its handle. Insertion order is
    /// draw order: later nodes sit in front.
    pub fn add_node(&mut self, mut node: Node, position: Pos2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.set_id(id);
        node.position = position;
        tracing::debug!("added node '{}' as {} at {:?}", node.title, id, position);
        self.nodes.push(NodeSlot {
            node,
            deleted: false,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index())
            .filter(|slot| !slot.deleted)
            .map(|slot| &slot.node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .filter(|slot| !slot.deleted)
            .map(|slot| &mut slot.node)
    }

    /// Live nodes in draw order (back to front).
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|slot| !slot.deleted)
            .map(|slot| &slot.node)
    }

    fn nodes_front_to_back(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .rev()
            .filter(|slot| !slot.deleted)
            .map(|slot| &slot.node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|slot| !slot.deleted).count()
    }

    /// Removes a node, cascading into full teardown of every connection
    /// attached to any of its ports. Any interaction state referencing the
    /// node (drag, hover, draft) is cancelled first.
    pub fn remove_node(&mut self, id: NodeId) -> GraphResult<()> {
        if self.node(id).is_none() {
            return Err(GraphError::UnknownNode(id));
        }

        if self.drag.is_some_and(|d| d.node == id) {
            self.drag = None;
        }
        if self.hovered_port.is_some_and(|p| p.node() == id) {
            self.hovered_port = None;
        }
        if let Some(draft) = self.draft {
            if draft.start.node() == id {
                self.discard_draft(draft);
            }
        }

        let attached: Vec<ConnectionId> = self
            .node(id)
            .map(|node| {
                node.inputs()
                    .iter()
                    .chain(node.outputs().iter())
                    .flat_map(|port| port.connections().iter().copied())
                    .collect()
            })
            .unwrap_or_default();
        for cid in attached {
            self.remove_connection_internal(cid);
        }

        let slot = &mut self.nodes[id.index()];
        debug_assert!(
            slot.node
                .inputs()
                .iter()
                .chain(slot.node.outputs().iter())
                .all(|port| !port.is_connected()),
            "node removed with connections still attached"
        );
        slot.deleted = true;
        tracing::debug!("removed node {}", id);
        Ok(())
    }

    // ── Ports ──

    pub fn port(&self, id: PortId) -> Option<&Port> {
        self.node(id.node())?.port(id.direction(), id.slot())
    }

    fn port_mut(&mut self, id: PortId) -> Option<&mut Port> {
        self.node_mut(id.node())?.port_mut(id.direction(), id.slot())
    }

    /// A port's position in canvas coordinates, or the origin when the
    /// owning node is not (or no longer) part of this scene.
    pub fn port_scene_position(&self, id: PortId) -> Pos2 {
        match self.node(id.node()) {
            Some(node) => match node.port(id.direction(), id.slot()) {
                Some(port) => node.port_canvas_pos(port),
                None => Pos2::ZERO,
            },
            None => Pos2::ZERO,
        }
    }

    /// Tears down every connection attached to the port. Operates on a
    /// snapshot of the attached set, since teardown mutates it.
    pub fn disconnect_port(&mut self, id: PortId) {
        let attached: Vec<ConnectionId> = match self.port(id) {
            Some(port) => port.connections().to_vec(),
            None => return,
        };
        for cid in attached {
            self.remove_connection_internal(cid);
        }
    }

    /// For each connection attached to the port, the node owning the
    /// opposite endpoint.
    pub fn connected_nodes(&self, id: PortId) -> Vec<NodeId> {
        let Some(port) = self.port(id) else {
            return Vec::new();
        };
        let mut nodes = Vec::new();
        for &cid in port.connections() {
            let Some(conn) = self.connection_any_state(cid) else {
                continue;
            };
            let other = if conn.start() == Some(id) {
                conn.end()
            } else {
                conn.start()
            };
            if let Some(other) = other {
                nodes.push(other.node());
            }
        }
        nodes
    }

    // ── Connections ──

    /// Completed connections — the permanent set, in creation order.
    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(|slot| !slot.deleted && slot.connection.is_complete())
            .map(|slot| &slot.connection)
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connection_any_state(id)
            .filter(|conn| conn.is_complete())
    }

    fn connection_any_state(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections
            .get(id.index())
            .filter(|slot| !slot.deleted)
            .map(|slot| &slot.connection)
    }

    /// Size of the permanent set.
    pub fn connection_count(&self) -> usize {
        self.connections().count()
    }

    /// Tears a connection down: detaches it from both ports, clears both
    /// endpoint references and retires the slot. Idempotent — removing an
    /// already-removed connection is a no-op.
    pub fn remove_connection(&mut self, id: ConnectionId) -> GraphResult<()> {
        if self.connections.get(id.index()).is_none() {
            return Err(GraphError::UnknownConnection(id));
        }
        self.remove_connection_internal(id);
        Ok(())
    }

    fn remove_connection_internal(&mut self, id: ConnectionId) {
        let Some(slot) = self.connections.get_mut(id.index()) else {
            return;
        };
        if slot.deleted {
            return;
        }
        let start = slot.connection.start();
        let end = slot.connection.end();
        slot.connection.clear_endpoints();
        slot.deleted = true;

        for pid in [start, end].into_iter().flatten() {
            if let Some(port) = self.port_mut(pid) {
                port.detach(id);
            }
        }
        if self.draft.is_some_and(|d| d.wire == id) {
            self.draft = None;
        }
        tracing::debug!("removed connection {}", id);
    }

    /// Recomputes the resolved anchor pair feeding the painter: the start
    /// port's live scene position, and either the bound end port's scene
    /// position (complete) or the last pushed cursor point (pending).
    fn refresh_connection_geometry(&mut self, id: ConnectionId) {
        let Some(conn) = self.connection_any_state(id) else {
            return;
        };
        let (start, end, state, free_end) =
            (conn.start(), conn.end(), conn.state(), conn.free_end());

        let start_anchor = start
            .map(|p| self.port_scene_position(p))
            .unwrap_or(Pos2::ZERO);
        let end_anchor = match (state, end) {
            (ConnectionState::Complete, Some(p)) => self.port_scene_position(p),
            _ => free_end,
        };
        self.connections[id.index()]
            .connection
            .set_anchors(start_anchor, end_anchor);
    }

    fn refresh_node_connections(&mut self, id: NodeId) {
        let attached: Vec<ConnectionId> = match self.node(id) {
            Some(node) => node
                .inputs()
                .iter()
                .chain(node.outputs().iter())
                .flat_map(|port| port.connections().iter().copied())
                .collect(),
            None => return,
        };
        for cid in attached {
            self.refresh_connection_geometry(cid);
        }
    }

    // ── Item queries ──

    /// Removes a node or connection, with cascading teardown.
    pub fn remove_item(&mut self, item: SceneItem) -> GraphResult<()> {
        match item {
            SceneItem::Node(id) => self.remove_node(id),
            SceneItem::Connection(id) => self.remove_connection(id),
        }
    }

    /// Items under a canvas point, front-to-back. Nodes draw above wires, so
    /// they come first; wires are tested against their start→end chord.
    pub fn items_at(&self, pos: Pos2) -> Vec<SceneItem> {
        let mut items: Vec<SceneItem> = self
            .nodes_front_to_back()
            .filter(|node| node.hit_bounds().contains(pos))
            .map(|node| SceneItem::Node(node.id()))
            .collect();

        let tolerance_sq = WIRE_HIT_TOLERANCE * WIRE_HIT_TOLERANCE;
        for slot in self.connections.iter().rev() {
            if slot.deleted || !slot.connection.is_complete() {
                continue;
            }
            let (a, b) = slot.connection.anchors();
            if dist_sq_to_segment(pos, a, b) <= tolerance_sq {
                items.push(SceneItem::Connection(slot.connection.id()));
            }
        }
        items
    }

    /// Frontmost live node whose padded bounds contain the point.
    pub fn node_at(&self, pos: Pos2) -> Option<NodeId> {
        self.nodes_front_to_back()
            .find(|node| node.hit_bounds().contains(pos))
            .map(|node| node.id())
    }

    /// Port at a scene position: nodes whose padded bounds contain the point
    /// are enumerated front-to-back, inputs tested before outputs on each; a
    /// candidate node without a matching port falls through to the one below.
    pub fn port_at(&self, pos: Pos2) -> Option<PortId> {
        for node in self.nodes_front_to_back() {
            if !node.hit_bounds().contains(pos) {
                continue;
            }
            if let Some((direction, slot)) = node.port_hit(node.to_local(pos)) {
                return Some(PortId::new(node.id(), direction, slot));
            }
        }
        None
    }

    // ── Selection ──

    pub fn selected_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes().filter(|node| node.selected)
    }

    pub fn clear_selection(&mut self) {
        for slot in self.nodes.iter_mut().filter(|slot| !slot.deleted) {
            slot.node.selected = false;
        }
    }

    /// Shift toggles this node's selection without touching others; a plain
    /// click clears every other selection unless this node is already the
    /// sole selection.
    fn apply_selection(&mut self, id: NodeId, shift: bool) {
        if shift {
            if let Some(node) = self.node_mut(id) {
                node.selected = !node.selected;
            }
            return;
        }
        let sole_selection =
            self.node(id).is_some_and(|n| n.selected) && self.selected_nodes().count() == 1;
        if !sole_selection {
            self.clear_selection();
            if let Some(node) = self.node_mut(id) {
                node.selected = true;
            }
        }
    }

    // ── Connection creation state machine ──

    /// True while a wire is being drawn.
    pub fn is_connecting(&self) -> bool {
        self.draft.is_some()
    }

    /// The pending wire being drawn, for the painter's transient pass.
    pub fn draft_wire(&self) -> Option<&Connection> {
        let draft = self.draft?;
        self.connection_any_state(draft.wire)
    }

    /// The port the cursor is resting on while idle, for hover highlighting.
    pub fn hovered_port(&self) -> Option<PortId> {
        self.hovered_port
    }

    /// Starts drawing a wire from `start`, which must be an existing output
    /// port. The pending connection is anchored there with its free endpoint
    /// seeded at the same spot.
    pub fn start_connection(&mut self, start: PortId) -> GraphResult<ConnectionId> {
        if self.port(start).is_none() {
            return Err(GraphError::UnknownPort(start));
        }
        if let Some(stale) = self.draft.take() {
            // A down can only follow an up, so a live draft here means the
            // host dropped an event; discard rather than leak.
            self.discard_draft(stale);
        }

        let start_pos = self.port_scene_position(start);
        let id = ConnectionId(self.connections.len() as u32);
        let connection = Connection::pending(id, start, start_pos);
        self.connections.push(ConnectionSlot {
            connection,
            deleted: false,
        });
        if let Some(port) = self.port_mut(start) {
            port.attach(id);
        }
        self.draft = Some(DraftWire { start, wire: id });
        tracing::debug!("drafting connection {} from {:?}", id, start);
        Ok(id)
    }

    /// Binds `port` as the end of connection `id`, detaching any previously
    /// bound end first, and marks the connection complete.
    fn set_end_port(&mut self, id: ConnectionId, port: PortId) {
        let Some(conn) = self.connection_any_state(id) else {
            return;
        };
        if let Some(old) = conn.end() {
            if let Some(old_port) = self.port_mut(old) {
                old_port.detach(id);
            }
        }
        self.connections[id.index()].connection.bind_end(port);
        if let Some(end_port) = self.port_mut(port) {
            end_port.attach(id);
        }
        self.refresh_connection_geometry(id);
    }

    /// Whether the policy permits completing the draft onto `target`.
    fn policy_permits(&self, start: PortId, target: PortId) -> bool {
        if !self.policy.allow_fan_in {
            let occupied = self.port(target).is_some_and(Port::is_connected);
            if occupied {
                return false;
            }
        }
        if !self.policy.allow_duplicates {
            let duplicate = self
                .connections()
                .any(|c| c.start() == Some(start) && c.end() == Some(target));
            if duplicate {
                return false;
            }
        }
        true
    }

    /// Resolves a release at `pos` while connecting: completes onto an input
    /// port of a different node, discards otherwise.
    fn finish_connection(&mut self, pos: Pos2) {
        let Some(draft) = self.draft.take() else {
            return;
        };

        let target = self.port_at(pos).filter(|&p| {
            p.direction() == PortDirection::Input
                && p.node() != draft.start.node()
                && self.policy_permits(draft.start, p)
        });

        match target {
            Some(port) => {
                self.set_end_port(draft.wire, port);
                tracing::debug!(
                    "completed connection {} from {:?} to {:?}",
                    draft.wire,
                    draft.start,
                    port
                );
            }
            None => self.discard_draft(draft),
        }
    }

    /// Throws the pending wire away: detaches it from its start port and
    /// retires the slot. It was never part of the permanent set.
    fn discard_draft(&mut self, draft: DraftWire) {
        if let Some(port) = self.port_mut(draft.start) {
            port.detach(draft.wire);
        }
        if let Some(slot) = self.connections.get_mut(draft.wire.index()) {
            slot.connection.clear_endpoints();
            slot.deleted = true;
        }
        if self.draft.is_some_and(|d| d.wire == draft.wire) {
            self.draft = None;
        }
        tracing::debug!("discarded connection draft {}", draft.wire);
    }

    // ── Pointer entry points ──

    /// Classifies a press and dispatches. Returns true when the scene
    /// consumed the event; false on empty canvas (after clearing the
    /// selection unless shift is held) so the host can pan or rubber-band.
    pub fn pointer_down(&mut self, pos: Pos2, button: PointerButton, modifiers: Modifiers) -> bool {
        if button != PointerButton::Primary {
            return false;
        }

        let mut action = None;
        for node in self.nodes_front_to_back() {
            if !node.hit_bounds().contains(pos) {
                continue;
            }
            let local = node.to_local(pos);
            let in_body = node.bounds().contains(pos);

            if in_body && node.activation_rect().contains(local) {
                action = Some(DownAction::Toggle(node.id()));
                break;
            }
            if let Some((direction, slot)) = node.port_hit(local) {
                let port = PortId::new(node.id(), direction, slot);
                action = Some(match direction {
                    PortDirection::Output => DownAction::StartWire(port),
                    PortDirection::Input => DownAction::ConsumeInput,
                });
                break;
            }
            if in_body {
                action = Some(DownAction::Body(node.id()));
                break;
            }
            // Only the padding ring was hit; the node below may still claim
            // the point.
        }

        match action {
            Some(DownAction::Toggle(id)) => {
                if let Some(node) = self.node_mut(id) {
                    node.toggle_active();
                }
                true
            }
            Some(DownAction::StartWire(port)) => {
                // Starting a wire explicitly suppresses dragging.
                let _ = self.start_connection(port);
                true
            }
            // Inputs never initiate a wire; the press is consumed so the
            // node does not start dragging either.
            Some(DownAction::ConsumeInput) => true,
            Some(DownAction::Body(id)) => {
                self.apply_selection(id, modifiers.shift);
                if let Some(position) = self.node(id).map(|node| node.position) {
                    self.drag = Some(DragState {
                        node: id,
                        grab_offset: pos - position,
                    });
                }
                true
            }
            None => {
                if !modifiers.shift {
                    self.clear_selection();
                }
                false
            }
        }
    }

    /// Advances whichever interaction is live: the draft wire's free
    /// endpoint, a node drag (propagating to attached wire geometry), or
    /// hover tracking when idle.
    pub fn pointer_move(&mut self, pos: Pos2) -> bool {
        if let Some(draft) = self.draft {
            if let Some(slot) = self.connections.get_mut(draft.wire.index()) {
                slot.connection.set_free_end(pos);
            }
            self.refresh_connection_geometry(draft.wire);
            return true;
        }

        if let Some(drag) = self.drag {
            if let Some(node) = self.node_mut(drag.node) {
                node.position = pos - drag.grab_offset;
            }
            self.refresh_node_connections(drag.node);
            return true;
        }

        self.hovered_port = self.port_at(pos);
        false
    }

    /// Finalizes or discards a draft wire, or ends a drag.
    pub fn pointer_up(&mut self, pos: Pos2, button: PointerButton) -> bool {
        if button != PointerButton::Primary {
            return false;
        }
        if self.draft.is_some() {
            self.finish_connection(pos);
            return true;
        }
        if self.drag.is_some() {
            self.drag = None;
            return true;
        }
        false
    }
}

impl Default for GraphScene {
    fn default() -> Self {
        Self::new()
    }
}

fn dist_sq_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq <= f32::EPSILON {
        return a.distance_sq(p);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let projection = a + ab * t;
    projection.distance_sq(p)
}
