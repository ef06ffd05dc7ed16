//! Zenoh context (session) management.
//!
//! A [`Context`] wraps a Zenoh session and is the factory for nodes. It also
//! owns the [`ShutdownToken`] every talker running on it observes.
//!
//! # Reference
//!
//! See [rmw_zenoh design - Contexts](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md#contexts)

use crate::{
    error::{Error, Result},
    node::Node,
};
use std::{
    env,
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
};
use talker_core::{NodeOptions, RosContext, ShutdownToken, names};
use tracing::{debug, info};
use zenoh::{Session, Wait};

/// Environment variable for custom Zenoh session config.
pub const ZENOH_SESSION_CONFIG_URI: &str = "ZENOH_SESSION_CONFIG_URI";

/// Environment variable for ROS domain ID.
pub const ROS_DOMAIN_ID: &str = "ROS_DOMAIN_ID";

/// Default Zenoh router endpoint.
pub const DEFAULT_ROUTER_ENDPOINT: &str = "tcp/localhost:7447";

/// ROS2 context wrapping a Zenoh session.
///
/// All nodes created from a context share its session.
///
/// # Example
///
/// ```ignore
/// let ctx = Context::new()?;
/// let node = ctx.create_node("talker", NodeOptions::anonymous())?;
/// ```
pub struct Context {
    /// Zenoh session.
    session: Session,
    /// ROS domain ID.
    domain_id: u32,
    /// Session ID as hex string.
    session_id: String,
    /// Next node ID counter.
    next_node_id: AtomicU32,
    /// Fired by [`Context::shutdown`].
    shutdown: ShutdownToken,
}

impl Context {
    /// Create a new context with default configuration.
    ///
    /// This will:
    /// 1. Read `ROS_DOMAIN_ID` from environment (default: 0)
    /// 2. Read `ZENOH_SESSION_CONFIG_URI` for custom config (optional)
    /// 3. Otherwise open a Zenoh session connecting to localhost:7447
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the Zenoh session
    /// cannot be opened.
    pub fn new() -> Result<Arc<Self>> {
        let domain_id = env::var(ROS_DOMAIN_ID)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);

        Self::with_domain_id(domain_id)
    }

    /// Create a new context with a specific domain ID.
    pub fn with_domain_id(domain_id: u32) -> Result<Arc<Self>> {
        let config = match env::var(ZENOH_SESSION_CONFIG_URI) {
            Ok(config_uri) => zenoh::Config::from_file(&config_uri).map_err(|e| {
                Error::InvalidConfig(format!("failed to load {config_uri}: {e}"))
            })?,
            Err(_) => {
                let mut config = zenoh::Config::default();
                config
                    .insert_json5(
                        "connect/endpoints",
                        &format!(r#"["{DEFAULT_ROUTER_ENDPOINT}"]"#),
                    )
                    .map_err(|e| {
                        Error::InvalidConfig(format!("failed to set endpoints: {e}"))
                    })?;
                config
            }
        };

        Self::with_config(domain_id, config)
    }

    /// Create a new context with custom Zenoh configuration.
    pub fn with_config(domain_id: u32, config: zenoh::Config) -> Result<Arc<Self>> {
        let session = zenoh::open(config).wait()?;
        let session_id = session.zid().to_string();
        info!(domain_id, session_id = %session_id, "zenoh session opened");

        Ok(Arc::new(Context {
            session,
            domain_id,
            session_id,
            next_node_id: AtomicU32::new(0),
            shutdown: ShutdownToken::new(),
        }))
    }

    /// Get the ROS domain ID.
    pub fn domain_id(&self) -> u32 {
        self.domain_id
    }

    /// Get the Zenoh session ID as a hex string.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Get a reference to the Zenoh session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Token fired by [`Context::shutdown`].
    pub fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }

    /// Request shutdown. Loops sleeping on this context wake up, and
    /// publishers refuse to send from now on.
    pub fn shutdown(&self) {
        debug!(session_id = %self.session_id, "context shutdown requested");
        self.shutdown.shutdown();
    }

    /// Returns `true` once [`Context::shutdown`] has been called.
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.is_shutdown()
    }

    /// Create a new node.
    ///
    /// # Errors
    ///
    /// Returns an error if the name or namespace is invalid, or the node's
    /// liveliness token cannot be declared.
    pub fn create_node(self: &Arc<Self>, name: &str, options: NodeOptions) -> Result<Arc<Node>> {
        names::validate_node_name(name)?;

        let namespace = options.namespace.unwrap_or_default();
        if !namespace.is_empty() {
            names::validate_namespace(&namespace)?;
        }

        let name = if options.anonymous {
            let name = names::anonymous_name(name);
            names::validate_node_name(&name)?;
            name
        } else {
            name.to_string()
        };

        let node_id = self.next_node_id.fetch_add(1, Ordering::SeqCst);
        Node::new(Arc::clone(self), node_id, &name, &namespace)
    }
}

// ============================================================================
// RosContext trait implementation
// ============================================================================

impl RosContext for Context {
    type Node = Node;

    fn create_node(
        self: &Arc<Self>,
        name: &str,
        options: NodeOptions,
    ) -> talker_core::Result<Arc<Node>> {
        Context::create_node(self, name, options).map_err(Into::into)
    }

    fn domain_id(&self) -> u32 {
        self.domain_id
    }

    fn shutdown_token(&self) -> ShutdownToken {
        self.shutdown.clone()
    }
}
