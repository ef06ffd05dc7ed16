//! Topic publisher.
//!
//! # Reference
//!
//! See [rmw_zenoh design - Publishers](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md#publishers)

use crate::{
    attachment::{Attachment, GID_SIZE, generate_gid},
    error::Result,
    keyexpr::{EntityInfo, EntityKind, liveliness_entity_keyexpr, topic_keyexpr},
    node::Node,
    qos::QosMapping,
};
use std::{
    marker::PhantomData,
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
};
use talker_core::{Profile, RosPublisher, ShutdownToken, TypeSupport};
use tracing::{debug, trace};
use zenoh::{Wait, bytes::ZBytes, key_expr::KeyExpr, liveliness::LivelinessToken};

/// Topic publisher.
pub struct Publisher<T> {
    /// Keeps the parent node, and its liveliness token, alive.
    _node: Arc<Node>,
    /// Fully qualified topic name.
    fq_topic_name: String,
    /// Zenoh publisher.
    zenoh_publisher: zenoh::pubsub::Publisher<'static>,
    /// Publisher GID.
    gid: [u8; GID_SIZE],
    /// Sequence number counter.
    sequence_number: AtomicI64,
    /// Context shutdown token.
    shutdown: ShutdownToken,
    /// Liveliness token.
    _liveliness_token: LivelinessToken,
    _phantom: PhantomData<T>,
}

impl<T: TypeSupport> Publisher<T> {
    pub(crate) fn new(node: Arc<Node>, fq_topic_name: &str, qos: Profile) -> Result<Self> {
        QosMapping::validate(&qos);

        let context = Arc::clone(node.context());
        let type_name = T::type_name();
        let type_hash = T::type_hash();

        let key_expr_str = topic_keyexpr(context.domain_id(), fq_topic_name, type_name, type_hash);
        let key_expr = KeyExpr::try_from(key_expr_str)?;

        let zenoh_publisher = context
            .session()
            .declare_publisher(key_expr)
            .congestion_control(QosMapping::congestion_control(&qos))
            .wait()?;

        let gid = generate_gid();
        let info = EntityInfo {
            domain_id: context.domain_id(),
            session_id: context.session_id(),
            node_id: node.node_id(),
            entity_id: node.allocate_entity_id(),
            namespace: node.namespace(),
            node_name: node.name(),
            fq_name: fq_topic_name,
            type_name,
            type_hash,
        };
        let token_key = liveliness_entity_keyexpr(&info, EntityKind::Publisher, &qos);
        let liveliness_token = context
            .session()
            .liveliness()
            .declare_token(&token_key)
            .wait()?;

        debug!(
            topic = fq_topic_name,
            key_expr = %zenoh_publisher.key_expr(),
            depth = QosMapping::effective_depth(&qos),
            "publisher declared"
        );

        Ok(Publisher {
            fq_topic_name: fq_topic_name.to_string(),
            zenoh_publisher,
            gid,
            sequence_number: AtomicI64::new(0),
            shutdown: context.shutdown_token(),
            _liveliness_token: liveliness_token,
            _phantom: PhantomData,
            _node: node,
        })
    }

    /// Get the fully qualified topic name.
    pub fn topic_name(&self) -> &str {
        &self.fq_topic_name
    }

    /// Get the Zenoh key expression samples are put on.
    pub fn key_expr(&self) -> &str {
        self.zenoh_publisher.key_expr().as_str()
    }

    /// Get the publisher GID.
    pub fn gid(&self) -> &[u8; GID_SIZE] {
        &self.gid
    }

    /// Publish a message.
    ///
    /// # Errors
    ///
    /// Returns `Interrupted` once the context was shut down, or an error if
    /// serialization or the Zenoh put fails.
    pub fn send(&self, msg: &T) -> Result<()> {
        if self.shutdown.is_shutdown() {
            return Err(talker_core::Error::Interrupted.into());
        }

        let payload = msg.to_bytes()?;
        let seq = self.sequence_number.fetch_add(1, Ordering::Relaxed);
        let attachment = Attachment::new(seq, self.gid).to_bytes();

        self.zenoh_publisher
            .put(payload)
            .attachment(ZBytes::from(attachment.to_vec()))
            .wait()?;
        trace!(topic = %self.fq_topic_name, seq, "sample sent");

        Ok(())
    }
}

// ============================================================================
// RosPublisher trait implementation
// ============================================================================

impl<T: TypeSupport> RosPublisher<T> for Publisher<T> {
    fn topic_name(&self) -> &str {
        &self.fq_topic_name
    }

    fn send(&self, msg: &T) -> talker_core::Result<()> {
        Publisher::send(self, msg).map_err(Into::into)
    }
}
