//! Key expression builders for Zenoh.
//!
//! Key expressions follow the conventions of `rmw_zenoh_cpp` so that other
//! ROS2 nodes running on the Zenoh RMW see our topics.
//!
//! # Reference
//!
//! See [rmw_zenoh design - Topic and Service name mapping](https://github.com/ros2/rmw_zenoh/blob/rolling/docs/design.md#topic-and-service-name-mapping-to-zenoh-key-expressions)

use talker_core::qos::{DurabilityPolicy, HistoryPolicy, Profile, ReliabilityPolicy};

/// Prefix for ROS2 liveliness tokens (hermetic namespace).
pub const LIVELINESS_PREFIX: &str = "@ros2_lv";

/// Entity kinds for liveliness tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Node entity
    Node,
    /// Message publisher
    Publisher,
}

impl EntityKind {
    /// Returns the two-character code for this entity kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "NN",
            Self::Publisher => "MP",
        }
    }
}

/// Build a topic key expression.
///
/// Format: `<domain_id>/<fully_qualified_name>/<type_name>/<type_hash>`
/// with the leading `/` of the name removed.
pub fn topic_keyexpr(domain_id: u32, fq_name: &str, type_name: &str, type_hash: &str) -> String {
    let name = fq_name.strip_prefix('/').unwrap_or(fq_name);
    format!("{domain_id}/{name}/{type_name}/{type_hash}")
}

/// Build a liveliness token key expression for a node.
///
/// Format: `@ros2_lv/<domain_id>/<session_id>/<node_id>/<node_id>/NN/<enclave>/<namespace>/<node_name>`
pub fn liveliness_node_keyexpr(
    domain_id: u32,
    session_id: &str,
    node_id: u32,
    namespace: &str,
    node_name: &str,
) -> String {
    format!(
        "{LIVELINESS_PREFIX}/{domain_id}/{session_id}/{node_id}/{node_id}/{}/{}/{}/{node_name}",
        EntityKind::Node.as_str(),
        mangle_name(""),
        mangle_name(namespace),
    )
}

/// Identity of a publisher as announced through its liveliness token.
#[derive(Debug, Clone, Copy)]
pub struct EntityInfo<'a> {
    /// ROS domain ID.
    pub domain_id: u32,
    /// Zenoh session ID (hex string).
    pub session_id: &'a str,
    /// Node ID within the context.
    pub node_id: u32,
    /// Entity ID within the node.
    pub entity_id: u32,
    /// Node namespace.
    pub namespace: &'a str,
    /// Node name.
    pub node_name: &'a str,
    /// Fully qualified topic name.
    pub fq_name: &'a str,
    /// DDS type name.
    pub type_name: &'a str,
    /// RIHS01 type hash.
    pub type_hash: &'a str,
}

/// Build a liveliness token key expression for an entity.
///
/// Format: `@ros2_lv/<domain_id>/<session_id>/<node_id>/<entity_id>/<kind>/<enclave>/<namespace>/<node_name>/<topic>/<type_name>/<type_hash>/<qos>`
pub fn liveliness_entity_keyexpr(info: &EntityInfo<'_>, kind: EntityKind, qos: &Profile) -> String {
    format!(
        "{LIVELINESS_PREFIX}/{}/{}/{}/{}/{}/{}/{}/{}/{}/{}/{}/{}",
        info.domain_id,
        info.session_id,
        info.node_id,
        info.entity_id,
        kind.as_str(),
        mangle_name(""),
        mangle_name(info.namespace),
        info.node_name,
        mangle_name(info.fq_name),
        info.type_name,
        info.type_hash,
        qos_to_keyexpr(qos),
    )
}

/// Mangle a name by replacing `/` with `%`. Empty names become `%`.
pub fn mangle_name(name: &str) -> String {
    if name.is_empty() {
        "%".to_string()
    } else {
        name.replace('/', "%")
    }
}

/// Encode a QoS profile to the compact form used in liveliness tokens.
///
/// Format: `<Reliability>:<Durability>:<History>,<Depth>:<Deadline>:<Lifespan>:<Liveliness>`
///
/// Values equal to the `rmw_zenoh_cpp` defaults (reliable, volatile, keep
/// last, depth 42, infinite deadline/lifespan/lease, automatic liveliness)
/// are left empty.
pub fn qos_to_keyexpr(qos: &Profile) -> String {
    const DEFAULT_DEPTH: usize = 42;

    let reliability = match qos.reliability {
        ReliabilityPolicy::SystemDefault => "0",
        ReliabilityPolicy::Reliable => "",
        ReliabilityPolicy::BestEffort => "2",
    };
    let durability = match qos.durability {
        DurabilityPolicy::SystemDefault => "0",
        DurabilityPolicy::TransientLocal => "1",
        DurabilityPolicy::Volatile => "",
    };
    let history = match qos.history {
        HistoryPolicy::SystemDefault => "0",
        HistoryPolicy::KeepLast => "",
        HistoryPolicy::KeepAll => "2",
    };
    let depth = if qos.depth == DEFAULT_DEPTH {
        String::new()
    } else {
        qos.depth.to_string()
    };

    // Deadline, lifespan and liveliness are always at their defaults.
    format!("{reliability}:{durability}:{history},{depth}:,:,:,,")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mangle_name() {
        assert_eq!(mangle_name("/robot1/cmd_vel"), "%robot1%cmd_vel");
        assert_eq!(mangle_name(""), "%");
        assert_eq!(mangle_name("simple"), "simple");
    }

    #[test]
    fn test_topic_keyexpr() {
        assert_eq!(
            topic_keyexpr(0, "/chatter", "std_msgs::msg::dds_::String_", "RIHS01_abc"),
            "0/chatter/std_msgs::msg::dds_::String_/RIHS01_abc"
        );
        assert_eq!(
            topic_keyexpr(7, "/robot1/chatter", "T", "H"),
            "7/robot1/chatter/T/H"
        );
    }

    #[test]
    fn test_liveliness_node_keyexpr() {
        assert_eq!(
            liveliness_node_keyexpr(0, "abcd", 3, "", "talker"),
            "@ros2_lv/0/abcd/3/3/NN/%/%/talker"
        );
        assert_eq!(
            liveliness_node_keyexpr(1, "abcd", 0, "/robot1", "talker"),
            "@ros2_lv/1/abcd/0/0/NN/%/%robot1/talker"
        );
    }

    #[test]
    fn test_liveliness_entity_keyexpr() {
        let info = EntityInfo {
            domain_id: 0,
            session_id: "abcd",
            node_id: 0,
            entity_id: 10,
            namespace: "",
            node_name: "talker",
            fq_name: "/chatter",
            type_name: "std_msgs::msg::dds_::String_",
            type_hash: "RIHS01_abc",
        };
        assert_eq!(
            liveliness_entity_keyexpr(&info, EntityKind::Publisher, &Profile::keep_last(10)),
            "@ros2_lv/0/abcd/0/10/MP/%/%/talker/%chatter/std_msgs::msg::dds_::String_/RIHS01_abc/::,10:,:,:,,"
        );
    }

    #[test]
    fn test_qos_to_keyexpr() {
        assert_eq!(qos_to_keyexpr(&Profile::keep_last(42)), "::,:,:,:,,");
        let mut profile = Profile::keep_last(5);
        profile.reliability = ReliabilityPolicy::BestEffort;
        assert_eq!(qos_to_keyexpr(&profile), "2::,5:,:,:,,");

        let mut profile = Profile::keep_last(1);
        profile.durability = DurabilityPolicy::TransientLocal;
        assert_eq!(qos_to_keyexpr(&profile), ":1:,1:,:,:,,");
    }
}
