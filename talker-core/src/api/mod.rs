//! Abstract API traits for middleware backends.
//!
//! The talker is written against these traits so that it can run on top of
//! any backend (Zenoh, a test double, ...).
//!
//! # Traits
//!
//! - [`RosContext`] - Factory for creating nodes, owner of the shutdown token
//! - [`RosNode`] - Creates publishers and clocks
//! - [`RosPublisher`] - Publishes messages to a topic
//! - [`RosClock`] - Reads the current time
//!
//! # Example
//!
//! ```ignore
//! use talker_core::api::*;
//!
//! fn setup<C: RosContext>(ctx: &Arc<C>) -> talker_core::Result<()> {
//!     let node = ctx.create_node("talker", NodeOptions::anonymous())?;
//!     let publisher = node.create_publisher::<String>("chatter", None)?;
//!     Ok(())
//! }
//! ```

use crate::{Result, TypeSupport, qos::Profile, shutdown::ShutdownToken};
use std::{borrow::Cow, sync::Arc, time::Duration};

// ============================================================================
// Node options
// ============================================================================

/// Options used when creating a node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeOptions {
    /// Namespace of the node. `None` means the root namespace.
    pub namespace: Option<String>,
    /// Append a unique suffix to the node name.
    pub anonymous: bool,
}

impl NodeOptions {
    /// Options for an anonymous node in the root namespace.
    pub fn anonymous() -> Self {
        Self {
            namespace: None,
            anonymous: true,
        }
    }

    /// Set the namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

// ============================================================================
// Context Trait
// ============================================================================

/// A context that can create nodes.
///
/// The context represents a connection to the middleware. It owns the
/// shutdown token every loop running on it should observe.
pub trait RosContext: Send + Sync + Sized {
    /// The node type created by this context.
    type Node: RosNode;

    /// Create a new node.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is invalid or node creation fails.
    fn create_node(self: &Arc<Self>, name: &str, options: NodeOptions)
    -> Result<Arc<Self::Node>>;

    /// Get the domain ID.
    fn domain_id(&self) -> u32;

    /// Token fired when this context shuts down.
    fn shutdown_token(&self) -> ShutdownToken;
}

// ============================================================================
// Node Trait
// ============================================================================

/// A node that can create publishers and clocks.
pub trait RosNode: Send + Sync + Sized {
    /// The publisher type created by this node.
    type Publisher<T: TypeSupport>: RosPublisher<T>;

    /// The clock type created by this node.
    type Clock: RosClock;

    /// Get the node name.
    fn name(&self) -> Cow<'_, str>;

    /// Get the node namespace.
    fn namespace(&self) -> Cow<'_, str>;

    /// Get the fully qualified node name (namespace + name).
    fn fully_qualified_name(&self) -> Cow<'_, str>;

    /// Create a publisher.
    ///
    /// # Arguments
    ///
    /// * `topic_name` - Topic name (relative, absolute or private)
    /// * `qos` - Optional QoS profile (uses default if None)
    fn create_publisher<T: TypeSupport>(
        self: &Arc<Self>,
        topic_name: &str,
        qos: Option<Profile>,
    ) -> Result<Self::Publisher<T>>;

    /// Create a clock.
    fn create_clock(&self) -> Result<Self::Clock>;
}

// ============================================================================
// Publisher Trait
// ============================================================================

/// A publisher that can send messages to a topic.
pub trait RosPublisher<T: TypeSupport>: Send + Sync {
    /// Get the fully qualified topic name.
    fn topic_name(&self) -> &str;

    /// Publish a message.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the publish operation fails,
    /// and [`Error::Interrupted`](crate::Error::Interrupted) if the context
    /// was shut down.
    fn send(&self, msg: &T) -> Result<()>;
}

// ============================================================================
// Clock Trait
// ============================================================================

/// A source of time.
pub trait RosClock: Send {
    /// Time since the UNIX epoch.
    fn now(&mut self) -> Result<Duration>;
}
