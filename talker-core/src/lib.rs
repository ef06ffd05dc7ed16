//! Core traits and types for the hello world talker.
//!
//! This crate holds everything the talker needs without depending on a
//! specific middleware: the API traits a backend implements, the
//! `std_msgs/String` message, the rate limiter, the shutdown token and the
//! periodic publisher loop itself.

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod api;
pub mod cdr;
pub mod error;
#[cfg(feature = "logging")]
pub mod logger;
pub mod msg;
pub mod names;
pub mod qos;
pub mod rate;
pub mod shutdown;
pub mod talker;
pub mod time;

// Re-export commonly used error types
pub use error::{DynError, Error, Result};

// Re-export API traits
pub use api::{NodeOptions, RosClock, RosContext, RosNode, RosPublisher};

pub use msg::TypeSupport;
pub use qos::{DurabilityPolicy, HistoryPolicy, Profile, ReliabilityPolicy};
pub use rate::Rate;
pub use shutdown::ShutdownToken;
pub use talker::{RunSummary, StopReason, Talker, TalkerConfig};
pub use time::SystemClock;
