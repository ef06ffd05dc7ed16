//! QoS mapping from talker-core to Zenoh.
//!
//! Follows the [rmw_zenoh design](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md#quality-of-service):
//!
//! | ROS2 QoS | Zenoh Behavior |
//! |----------|----------------|
//! | `KeepAll` + `Reliable` | `CongestionControl::Block` |
//! | anything else | `CongestionControl::Drop` |
//! | depth `0` | defaults to `42` |
//!
//! Transient local durability is not supported by this backend; volatile is used.

use talker_core::qos::{DurabilityPolicy, HistoryPolicy, Profile, ReliabilityPolicy};
use zenoh::qos::CongestionControl;

/// Default depth when QoS depth is 0 (as in rmw_zenoh).
pub const DEFAULT_DEPTH: usize = 42;

/// QoS mapping utilities.
pub struct QosMapping;

impl QosMapping {
    /// Get the effective queue depth.
    pub fn effective_depth(profile: &Profile) -> usize {
        if profile.depth == 0 {
            DEFAULT_DEPTH
        } else {
            profile.depth
        }
    }

    /// Returns `true` if reliability is `Reliable` or `SystemDefault`.
    pub fn is_reliable(profile: &Profile) -> bool {
        matches!(
            profile.reliability,
            ReliabilityPolicy::Reliable | ReliabilityPolicy::SystemDefault
        )
    }

    /// Get the Zenoh congestion control mode for a publisher.
    pub fn congestion_control(profile: &Profile) -> CongestionControl {
        if matches!(profile.history, HistoryPolicy::KeepAll) && Self::is_reliable(profile) {
            CongestionControl::Block
        } else {
            CongestionControl::Drop
        }
    }

    /// Log warnings for settings this backend does not honour.
    pub fn validate(profile: &Profile) {
        if matches!(profile.durability, DurabilityPolicy::TransientLocal) {
            tracing::warn!("QoS durability TransientLocal is not supported, using Volatile");
        }
    }
}
