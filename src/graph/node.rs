//! Node entity: port ownership, layout and local-space hit-testing.
//!
//! A node owns its ordered input and output port sequences. Layout is fully
//! deterministic: width is fixed, height derives from the port count, and
//! every port's relative position is recomputed whenever a port sequence
//! changes. Ports sit on the left (inputs) and right (outputs) edges, so
//! hit-testing against the node uses a padded bounding rectangle that keeps
//! the edge-mounted circles reachable.

use std::fmt;

use egui::{pos2, vec2, Pos2, Rect, Vec2};

use crate::graph::id::NodeId;
use crate::graph::port::{Port, PortDirection};
use crate::runtime::{NodeRuntime, NullRuntime};

/// Fixed node body width, in canvas units.
pub const NODE_WIDTH: f32 = 180.0;
/// Height of the title header strip.
pub const HEADER_HEIGHT: f32 = 40.0;
/// A node body never shrinks below this height.
pub const MIN_NODE_HEIGHT: f32 = 120.0;
/// Vertical distance between adjacent port slots.
pub const PORT_SPACING: f32 = 30.0;
/// Side length of the square run/stop control.
pub const RUN_BUTTON_SIZE: f32 = 20.0;
/// Inset of the run/stop control from the bottom-right corner.
pub const RUN_BUTTON_MARGIN: f32 = 10.0;
/// Padding ring around the body used for hit-testing, so port circles
/// centered on the body edge stay inside the tested rectangle.
pub const BOUNDS_PADDING: f32 = 10.0;

/// A processing node on the canvas.
pub struct Node {
    id: NodeId,
    pub title: String,
    pub position: Pos2,
    width: f32,
    height: f32,
    inputs: Vec<Port>,
    outputs: Vec<Port>,
    pub selected: bool,
    running: bool,
    runtime: Box<dyn NodeRuntime>,
}

impl Node {
    /// Creates a node with no ports and a no-op runtime. The catalog factory
    /// is the usual entry point; it populates the fixed port set immediately
    /// after construction.
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_runtime(title, Box::new(NullRuntime))
    }

    pub fn with_runtime(title: impl Into<String>, runtime: Box<dyn NodeRuntime>) -> Self {
        Self {
            id: NodeId::INVALID,
            title: title.into(),
            position: Pos2::ZERO,
            width: NODE_WIDTH,
            height: MIN_NODE_HEIGHT,
            inputs: Vec::new(),
            outputs: Vec::new(),
            selected: false,
            running: false,
            runtime,
        }
    }

    /// This node's handle in the owning scene, or [`NodeId::INVALID`] before
    /// the node has been added to one.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: NodeId) {
        self.id = id;
    }

    // ── Ports ──

    /// Appends an input port and recomputes the layout. Port names are not
    /// validated: reusing a name replaces the existing port in place (same
    /// slot, fresh empty attachment list) — last write wins.
    pub fn add_input_port(&mut self, name: impl Into<String>) {
        Self::put_port(&mut self.inputs, name.into(), PortDirection::Input);
        self.recompute_layout();
    }

    /// Appends an output port and recomputes the layout. Same name handling
    /// as [`Node::add_input_port`].
    pub fn add_output_port(&mut self, name: impl Into<String>) {
        Self::put_port(&mut self.outputs, name.into(), PortDirection::Output);
        self.recompute_layout();
    }

    fn put_port(ports: &mut Vec<Port>, name: String, direction: PortDirection) {
        match ports.iter().position(|p| p.name == name) {
            Some(slot) => ports[slot] = Port::new(name, direction),
            None => ports.push(Port::new(name, direction)),
        }
    }

    pub fn inputs(&self) -> &[Port] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Port] {
        &self.outputs
    }

    pub fn port(&self, direction: PortDirection, slot: u16) -> Option<&Port> {
        match direction {
            PortDirection::Input => self.inputs.get(slot as usize),
            PortDirection::Output => self.outputs.get(slot as usize),
        }
    }

    pub(crate) fn port_mut(&mut self, direction: PortDirection, slot: u16) -> Option<&mut Port> {
        match direction {
            PortDirection::Input => self.inputs.get_mut(slot as usize),
            PortDirection::Output => self.outputs.get_mut(slot as usize),
        }
    }

    /// Finds the port slot by name within one direction.
    pub fn port_slot(&self, direction: PortDirection, name: &str) -> Option<u16> {
        let ports = match direction {
            PortDirection::Input => &self.inputs,
            PortDirection::Output => &self.outputs,
        };
        ports.iter().position(|p| p.name == name).map(|i| i as u16)
    }

    // ── Layout ──

    /// Recomputes port positions and the derived height. Inputs sit on the
    /// left edge, outputs on the right, one slot per spacing step below the
    /// header.
    fn recompute_layout(&mut self) {
        for (i, port) in self.inputs.iter_mut().enumerate() {
            port.relative_pos = pos2(0.0, HEADER_HEIGHT + (i + 1) as f32 * PORT_SPACING);
        }
        for (i, port) in self.outputs.iter_mut().enumerate() {
            port.relative_pos = pos2(self.width, HEADER_HEIGHT + (i + 1) as f32 * PORT_SPACING);
        }

        let num_ports = self.inputs.len().max(self.outputs.len());
        self.height =
            MIN_NODE_HEIGHT.max(HEADER_HEIGHT + (num_ports + 1) as f32 * PORT_SPACING);
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// The node body rectangle in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_min_size(self.position, vec2(self.width, self.height))
    }

    /// Body rectangle grown by [`BOUNDS_PADDING`]; candidate test for any
    /// pointer interaction with this node.
    pub fn hit_bounds(&self) -> Rect {
        self.bounds().expand(BOUNDS_PADDING)
    }

    /// Maps a canvas-space point into this node's local frame.
    pub fn to_local(&self, canvas_point: Pos2) -> Pos2 {
        canvas_point - self.position.to_vec2()
    }

    /// A port's position in canvas coordinates.
    pub fn port_canvas_pos(&self, port: &Port) -> Pos2 {
        self.position + port.relative_pos.to_vec2()
    }

    // ── Hit-testing ──

    /// First port whose hit circle contains `local`, testing inputs in
    /// insertion order, then outputs. Layout guarantees the circles do not
    /// overlap, so the result is well-defined.
    pub fn port_hit(&self, local: Pos2) -> Option<(PortDirection, u16)> {
        for (i, port) in self.inputs.iter().enumerate() {
            if port.contains_point(local) {
                return Some((PortDirection::Input, i as u16));
            }
        }
        for (i, port) in self.outputs.iter().enumerate() {
            if port.contains_point(local) {
                return Some((PortDirection::Output, i as u16));
            }
        }
        None
    }

    /// The run/stop control rectangle, anchored to the bottom-right corner,
    /// in local coordinates.
    pub fn activation_rect(&self) -> Rect {
        Rect::from_min_size(
            pos2(
                self.width - RUN_BUTTON_SIZE - RUN_BUTTON_MARGIN,
                self.height - RUN_BUTTON_SIZE - RUN_BUTTON_MARGIN,
            ),
            Vec2::splat(RUN_BUTTON_SIZE),
        )
    }

    // ── Activation ──

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Flips the running flag and dispatches the matching runtime callback.
    pub fn toggle_active(&mut self) {
        self.running = !self.running;
        if self.running {
            self.runtime.on_start();
        } else {
            self.runtime.on_stop();
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("position", &self.position)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .field("selected", &self.selected)
            .field("running", &self.running)
            .finish()
    }
}
