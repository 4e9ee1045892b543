//! Opaque start/stop behaviors attached to nodes.
//!
//! The activation toggle on a node dispatches into a [`NodeRuntime`]; what
//! actually happens on start/stop (launching a process, bringing up a ROS
//! launch file, nothing at all) is outside the editing core.

/// Callback pair invoked when a node's active flag flips.
#[cfg_attr(test, mockall::automock)]
pub trait NodeRuntime: Send {
    /// Called when the node transitions to running.
    fn on_start(&mut self) {}

    /// Called when the node transitions back to stopped.
    fn on_stop(&mut self) {}
}

/// Runtime that does nothing. Default for nodes constructed directly.
#[derive(Debug, Default)]
pub struct NullRuntime;

impl NodeRuntime for NullRuntime {}

/// Stand-in runtime that logs the transitions. The catalog attaches one of
/// these to every spawned node until real launch plumbing exists.
#[derive(Debug)]
pub struct LaunchStub {
    label: String,
}

impl LaunchStub {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl NodeRuntime for LaunchStub {
    fn on_start(&mut self) {
        tracing::info!("Starting node: {}", self.label);
    }

    fn on_stop(&mut self) {
        tracing::info!("Stopping node: {}", self.label);
    }
}
