//! Node-kind catalog for dynamic node creation.
//!
//! This module is the external configuration the editing core treats as
//! opaque: which kinds of nodes exist, how the spawn menu groups them, and
//! which named ports each kind exposes. [`NodeKind::spawn`] is the node
//! factory — it returns a node pre-populated with its fixed port set, ready
//! to be added to a scene.

use serde::{Deserialize, Serialize};

use crate::graph::Node;
use crate::runtime::LaunchStub;

/// Kinds of nodes that can be instantiated from the spawn menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    // Teleoperation
    /// Keyboard-based teleoperation publishing velocity commands.
    KeyboardTeleop,
    /// Joystick-based teleoperation, subscribing to joystick state.
    JoystickTeleop,

    // Navigation & mapping
    /// Nav2 navigation stack.
    Nav2,
    /// SLAM Toolbox mapping.
    SlamToolbox,

    // Robot control
    /// ros2_control controller manager.
    Ros2Controllers,
    /// Priority multiplexer for several velocity-command sources.
    TwistMux,
}

/// Spawn-menu grouping for node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeCategory {
    Teleoperation,
    Navigation,
    RobotControl,
}

impl NodeCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeCategory::Teleoperation => "Teleoperation",
            NodeCategory::Navigation => "Navigation & Mapping",
            NodeCategory::RobotControl => "Robot Control",
        }
    }
}

impl NodeKind {
    /// Get the display name for this node kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeKind::KeyboardTeleop => "Keyboard Teleop",
            NodeKind::JoystickTeleop => "Joystick Teleop",
            NodeKind::Nav2 => "Nav2",
            NodeKind::SlamToolbox => "SLAM Toolbox",
            NodeKind::Ros2Controllers => "ROS2 Controllers",
            NodeKind::TwistMux => "Twist Mux",
        }
    }

    /// Get all available node kinds, in menu order.
    pub fn all() -> &'static [NodeKind] {
        &[
            NodeKind::KeyboardTeleop,
            NodeKind::JoystickTeleop,
            NodeKind::Nav2,
            NodeKind::SlamToolbox,
            NodeKind::Ros2Controllers,
            NodeKind::TwistMux,
        ]
    }

    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::KeyboardTeleop | NodeKind::JoystickTeleop => NodeCategory::Teleoperation,
            NodeKind::Nav2 | NodeKind::SlamToolbox => NodeCategory::Navigation,
            NodeKind::Ros2Controllers | NodeKind::TwistMux => NodeCategory::RobotControl,
        }
    }

    /// Named input ports, in slot order.
    pub fn input_ports(&self) -> &'static [&'static str] {
        match self {
            NodeKind::KeyboardTeleop => &[],
            NodeKind::JoystickTeleop => &["joy"],
            NodeKind::Nav2 => &["scan", "odom", "goal_pose"],
            NodeKind::SlamToolbox => &["scan", "odom"],
            NodeKind::Ros2Controllers => &["joint_states", "cmd_vel"],
            NodeKind::TwistMux => &["cmd_vel1", "cmd_vel2", "cmd_vel3"],
        }
    }

    /// Named output ports, in slot order.
    pub fn output_ports(&self) -> &'static [&'static str] {
        match self {
            NodeKind::KeyboardTeleop => &["cmd_vel"],
            NodeKind::JoystickTeleop => &["cmd_vel"],
            NodeKind::Nav2 => &["cmd_vel", "path"],
            NodeKind::SlamToolbox => &["map", "tf"],
            NodeKind::Ros2Controllers => &["joint_commands"],
            NodeKind::TwistMux => &["cmd_vel"],
        }
    }

    /// Get a short description of what this node does.
    pub fn description(&self) -> &'static str {
        match self {
            NodeKind::KeyboardTeleop => "Publishes velocity commands from keyboard input.",
            NodeKind::JoystickTeleop => "Publishes velocity commands from joystick state.",
            NodeKind::Nav2 => "Plans paths and drives the robot toward a goal pose.",
            NodeKind::SlamToolbox => "Builds a map and localizes against it while driving.",
            NodeKind::Ros2Controllers => "Turns velocity commands into joint commands.",
            NodeKind::TwistMux => "Picks one of several velocity-command sources by priority.",
        }
    }

    /// The node factory: a node of this kind with its fixed port set already
    /// populated and a logging stub runtime attached.
    pub fn spawn(&self) -> Node {
        let mut node = Node::with_runtime(
            self.display_name(),
            Box::new(LaunchStub::new(self.display_name())),
        );
        for name in self.input_ports() {
            node.add_input_port(*name);
        }
        for name in self.output_ports() {
            node.add_output_port(*name);
        }
        node
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
