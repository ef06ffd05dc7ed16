//! Quality of Service (QoS) policies and profiles.

/// QoS history policy - how samples are stored.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HistoryPolicy {
    /// Implementation default for history policy.
    SystemDefault,

    /// Only store up to a maximum number of samples, dropping oldest once max is exceeded.
    KeepLast,

    /// Store all samples, subject to resource limits.
    KeepAll,
}

/// QoS reliability policy - how messages are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReliabilityPolicy {
    /// Implementation specific default.
    SystemDefault,

    /// Guarantee that samples are delivered, may retry multiple times.
    Reliable,

    /// Attempt to deliver samples, but some may be lost if the network is not robust.
    BestEffort,
}

/// QoS durability policy - how samples persist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurabilityPolicy {
    /// Implementation specific default.
    SystemDefault,

    /// The publisher is responsible for persisting samples for "late-joining" subscribers.
    TransientLocal,

    /// Samples are not persistent.
    Volatile,
}

/// A QoS profile for publishers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Keep last: only store up to `depth` samples.
    /// Keep all: store all samples, subject to the configured resource limits.
    pub history: HistoryPolicy,

    /// Size of the message queue.
    pub depth: usize,

    /// Reliability QoS policy setting.
    pub reliability: ReliabilityPolicy,

    /// Durability QoS policy setting.
    pub durability: DurabilityPolicy,
}

impl Default for Profile {
    /// Keep last 10, reliable, volatile.
    fn default() -> Self {
        Self::keep_last(10)
    }
}

impl Profile {
    /// Reliable, volatile profile keeping the last `depth` samples.
    pub const fn keep_last(depth: usize) -> Self {
        Self {
            history: HistoryPolicy::KeepLast,
            depth,
            reliability: ReliabilityPolicy::Reliable,
            durability: DurabilityPolicy::Volatile,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_queue_size_ten() {
        let profile = Profile::default();
        assert_eq!(profile.history, HistoryPolicy::KeepLast);
        assert_eq!(profile.depth, 10);
        assert_eq!(profile.reliability, ReliabilityPolicy::Reliable);
        assert_eq!(profile.durability, DurabilityPolicy::Volatile);
    }
}
