//! Zenoh backend for the hello world talker.
//!
//! Implements the `talker-core` API traits on top of Zenoh, compatible with
//! `rmw_zenoh_cpp`: a `ros2 topic echo /chatter` running on the Zenoh RMW
//! receives what the talker publishes.
//!
//! # Architecture
//!
//! The implementation follows the [rmw_zenoh design](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md):
//!
//! - Each [`Context`] maps to a Zenoh session
//! - [`Node`]s are logical groupings with liveliness tokens
//! - [`Publisher`]s use Zenoh pub/sub with a per-sample attachment
//!
//! # Example
//!
//! ```ignore
//! use talker_core::{NodeOptions, Talker, TalkerConfig};
//! use talker_zenoh::Context;
//!
//! let ctx = Context::new()?;
//! let config = TalkerConfig::default();
//! let node = ctx.create_node(&config.node_name, config.node_options())?;
//! let summary = Talker::new(&node, &config, ctx.shutdown_token())?.run()?;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod attachment;
mod context;
mod error;
mod keyexpr;
mod node;
mod qos;

pub mod topic;

// Re-exports
pub use attachment::{ATTACHMENT_SIZE, Attachment, GID_SIZE};
pub use context::{Context, DEFAULT_ROUTER_ENDPOINT, ROS_DOMAIN_ID, ZENOH_SESSION_CONFIG_URI};
pub use error::{Error, Result};
pub use keyexpr::{LIVELINESS_PREFIX, qos_to_keyexpr, topic_keyexpr};
pub use node::Node;
pub use qos::QosMapping;
pub use topic::publisher::Publisher;
