//! Test data builders for creating scene objects

use egui::{pos2, Pos2};
use nodeflow_rs::graph::{GraphScene, Node, NodeId, PortDirection, PortId};

/// Builder for creating test nodes with arbitrary port sets.
pub struct NodeBuilder {
    title: String,
    inputs: Vec<String>,
    outputs: Vec<String>,
}

impl NodeBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    pub fn input(mut self, name: &str) -> Self {
        self.inputs.push(name.to_string());
        self
    }

    pub fn output(mut self, name: &str) -> Self {
        self.outputs.push(name.to_string());
        self
    }

    pub fn build(self) -> Node {
        let mut node = Node::new(self.title);
        for name in &self.inputs {
            node.add_input_port(name);
        }
        for name in &self.outputs {
            node.add_output_port(name);
        }
        node
    }
}

/// Looks up a port handle by direction and name on a scene node.
pub fn port_named(
    scene: &GraphScene,
    node: NodeId,
    direction: PortDirection,
    name: &str,
) -> PortId {
    let slot = scene
        .node(node)
        .and_then(|n| n.port_slot(direction, name))
        .unwrap_or_else(|| panic!("no {:?} port named {:?}", direction, name));
    PortId::new(node, direction, slot)
}

/// Canvas position of a named port.
pub fn port_pos(scene: &GraphScene, node: NodeId, direction: PortDirection, name: &str) -> Pos2 {
    scene.port_scene_position(port_named(scene, node, direction, name))
}

/// A two-node scene wired for connection tests: a source with a "cmd_vel"
/// output at `(100, 100)` and a sink with a "cmd_vel" input at `(400, 100)`.
pub fn source_and_sink() -> (GraphScene, NodeId, NodeId) {
    let mut scene = GraphScene::new();
    let source = scene.add_node(
        NodeBuilder::new("Source").output("cmd_vel").build(),
        pos2(100.0, 100.0),
    );
    let sink = scene.add_node(
        NodeBuilder::new("Sink").input("cmd_vel").build(),
        pos2(400.0, 100.0),
    );
    (scene, source, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = NodeBuilder::new("test")
            .input("scan")
            .output("map")
            .build();

        assert_eq!(node.title, "test");
        assert_eq!(node.inputs().len(), 1);
        assert_eq!(node.outputs().len(), 1);
    }
}
