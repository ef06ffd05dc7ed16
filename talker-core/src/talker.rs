//! Periodic publisher loop.
//!
//! A [`Talker`] owns one publisher and one clock taken from a node. Each
//! iteration it stamps a `"hello world <seconds>"` string, logs it, publishes
//! it and sleeps until the next tick. The loop ends when its
//! [`ShutdownToken`] fires.

use crate::{
    api::{NodeOptions, RosClock, RosNode, RosPublisher},
    error::{Error, Result},
    msg::std_msgs::msg::String as StringMsg,
    qos::Profile,
    rate::Rate,
    shutdown::ShutdownToken,
};
use serde::Deserialize;
use std::sync::Arc;

/// Default node name.
pub const DEFAULT_NODE_NAME: &str = "talker";

/// Default topic.
pub const DEFAULT_TOPIC: &str = "chatter";

/// Default publisher queue depth.
pub const DEFAULT_QUEUE_DEPTH: usize = 10;

/// Default publishing frequency in Hz.
pub const DEFAULT_RATE_HZ: f64 = 10.0;

/// Default message prefix, followed by the timestamp.
pub const DEFAULT_PREFIX: &str = "hello world ";

/// Talker settings. Missing fields take their default value when deserialized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TalkerConfig {
    /// Base node name.
    pub node_name: String,
    /// Make the node name unique.
    pub anonymous: bool,
    /// Topic to publish on.
    pub topic: String,
    /// Publisher queue depth.
    pub queue_depth: usize,
    /// Publishing frequency in Hz.
    pub rate_hz: f64,
    /// Text placed before the timestamp.
    pub prefix: String,
}

impl Default for TalkerConfig {
    fn default() -> Self {
        Self {
            node_name: DEFAULT_NODE_NAME.to_string(),
            anonymous: true,
            topic: DEFAULT_TOPIC.to_string(),
            queue_depth: DEFAULT_QUEUE_DEPTH,
            rate_hz: DEFAULT_RATE_HZ,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }
}

impl TalkerConfig {
    /// Node options matching this configuration.
    pub fn node_options(&self) -> NodeOptions {
        NodeOptions {
            namespace: None,
            anonymous: self.anonymous,
        }
    }

    /// Publisher QoS matching this configuration.
    pub fn qos(&self) -> Profile {
        Profile::keep_last(self.queue_depth)
    }
}

/// Why a talker stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Shutdown was observed at an iteration boundary.
    ShutdownRequested,
    /// Shutdown fired while sleeping or publishing.
    Interrupted,
}

/// Outcome of [`Talker::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of messages published.
    pub published: u64,
    /// Why the loop ended.
    pub reason: StopReason,
}

/// Periodic string publisher.
pub struct Talker<N: RosNode> {
    publisher: N::Publisher<StringMsg>,
    clock: N::Clock,
    rate: Rate,
    shutdown: ShutdownToken,
    prefix: String,
    published: u64,
}

impl<N: RosNode> Talker<N> {
    /// Create the publisher and the clock used by the loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the rate is invalid or the node fails to create
    /// the publisher or the clock.
    pub fn new(node: &Arc<N>, config: &TalkerConfig, shutdown: ShutdownToken) -> Result<Self> {
        let rate = Rate::new(config.rate_hz)?;
        let publisher = node.create_publisher::<StringMsg>(&config.topic, Some(config.qos()))?;
        let clock = node.create_clock()?;

        tracing::info!(
            node = %node.fully_qualified_name(),
            topic = publisher.topic_name(),
            rate_hz = config.rate_hz,
            "talker ready"
        );

        Ok(Self {
            publisher,
            clock,
            rate,
            shutdown,
            prefix: config.prefix.clone(),
            published: 0,
        })
    }

    /// Fully qualified topic name.
    pub fn topic_name(&self) -> &str {
        self.publisher.topic_name()
    }

    /// Messages published so far.
    pub fn published(&self) -> u64 {
        self.published
    }

    /// Build, log and publish one message.
    pub fn step(&mut self) -> Result<StringMsg> {
        let stamp = self.clock.now()?;
        let msg = StringMsg::new(format!("{}{}", self.prefix, stamp.as_secs_f64()));
        tracing::info!("{}", msg.data);
        self.publisher.send(&msg)?;
        self.published += 1;
        Ok(msg)
    }

    /// Publish at the configured rate until shutdown.
    ///
    /// A shutdown that interrupts a sleep or a publish is a normal stop and
    /// is reported in the summary, not as an error.
    ///
    /// # Errors
    ///
    /// Returns any other error raised by the clock or the publisher.
    pub fn run(mut self) -> Result<RunSummary> {
        let reason = match self.run_loop() {
            Ok(()) => StopReason::ShutdownRequested,
            Err(Error::Interrupted) => StopReason::Interrupted,
            Err(e) => {
                tracing::error!(published = self.published, "talker failed: {e}");
                return Err(e);
            }
        };

        tracing::info!(published = self.published, ?reason, "talker stopped");
        Ok(RunSummary {
            published: self.published,
            reason,
        })
    }

    fn run_loop(&mut self) -> Result<()> {
        self.rate.reset();
        while !self.shutdown.is_shutdown() {
            self.step()?;
            self.rate.sleep(&self.shutdown)?;
        }
        Ok(())
    }
}
