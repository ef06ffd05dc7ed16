//! ROS2 Node.
//!
//! A [`Node`] announces itself with a liveliness token and creates the
//! publishers and clocks the talker needs.

use crate::{
    context::Context,
    error::Result,
    keyexpr::liveliness_node_keyexpr,
    topic::publisher::Publisher,
};
use std::{
    borrow::Cow,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};
use talker_core::{Profile, RosNode, SystemClock, TypeSupport, names};
use tracing::debug;
use zenoh::{Wait, liveliness::LivelinessToken};

/// ROS2 Node.
///
/// # Example
///
/// ```ignore
/// let ctx = Context::new()?;
/// let node = ctx.create_node("talker", NodeOptions::default())?;
/// let publisher = node.create_publisher::<std_msgs::msg::String>("chatter", None)?;
/// ```
pub struct Node {
    /// Parent context.
    context: Arc<Context>,
    /// Node ID within the context.
    node_id: u32,
    /// Node name, anonymous suffix included.
    name: String,
    /// Node namespace. Empty means root.
    namespace: String,
    /// Next entity ID counter.
    next_entity_id: AtomicU32,
    /// Liveliness token for this node.
    _liveliness_token: LivelinessToken,
}

impl Node {
    pub(crate) fn new(
        context: Arc<Context>,
        node_id: u32,
        name: &str,
        namespace: &str,
    ) -> Result<Arc<Self>> {
        let token_key = liveliness_node_keyexpr(
            context.domain_id(),
            context.session_id(),
            node_id,
            namespace,
            name,
        );

        let token = context
            .session()
            .liveliness()
            .declare_token(&token_key)
            .wait()?;
        debug!(node = name, token = %token_key, "node declared");

        Ok(Arc::new(Node {
            context,
            node_id,
            name: name.to_string(),
            namespace: namespace.to_string(),
            // rmw_zenoh starts entity IDs at 10
            next_entity_id: AtomicU32::new(10),
            _liveliness_token: token,
        }))
    }

    /// Get the node name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the node namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Get the fully qualified node name.
    pub fn fully_qualified_name(&self) -> String {
        names::build_node_fqn(&self.namespace, &self.name)
    }

    /// Get the parent context.
    pub fn context(&self) -> &Arc<Context> {
        &self.context
    }

    /// Get the node ID.
    pub fn node_id(&self) -> u32 {
        self.node_id
    }

    pub(crate) fn allocate_entity_id(&self) -> u32 {
        self.next_entity_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Create a publisher.
    ///
    /// The topic name is expanded to its fully qualified form:
    /// - Absolute names (starting with `/`) are used as-is
    /// - Relative names are prefixed with the node's namespace
    /// - Private names (starting with `~`) are prefixed with the node's FQN
    pub fn create_publisher<T: TypeSupport>(
        self: &Arc<Self>,
        topic_name: &str,
        qos: Option<Profile>,
    ) -> Result<Publisher<T>> {
        let fq_topic_name = names::expand_topic_name(&self.namespace, &self.name, topic_name)?;
        Publisher::new(Arc::clone(self), &fq_topic_name, qos.unwrap_or_default())
    }
}

// ============================================================================
// RosNode trait implementation
// ============================================================================

impl RosNode for Node {
    type Publisher<T: TypeSupport> = Publisher<T>;
    type Clock = SystemClock;

    fn name(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.name)
    }

    fn namespace(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.namespace)
    }

    fn fully_qualified_name(&self) -> Cow<'_, str> {
        Cow::Owned(Node::fully_qualified_name(self))
    }

    fn create_publisher<T: TypeSupport>(
        self: &Arc<Self>,
        topic_name: &str,
        qos: Option<Profile>,
    ) -> talker_core::Result<Publisher<T>> {
        Node::create_publisher(self, topic_name, qos).map_err(Into::into)
    }

    fn create_clock(&self) -> talker_core::Result<SystemClock> {
        Ok(SystemClock::new())
    }
}
