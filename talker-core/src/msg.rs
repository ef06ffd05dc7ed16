//! Message type support and the message types published by the talker.

use crate::error::Result;

/// Type support for messages that can travel on a topic.
pub trait TypeSupport: Send + Sync + Sized + 'static {
    /// DDS type name, e.g. `std_msgs::msg::dds_::String_`.
    fn type_name() -> &'static str;

    /// RIHS01 type hash of the message definition.
    fn type_hash() -> &'static str;

    /// Serialize to a CDR buffer, encapsulation header included.
    fn to_bytes(&self) -> Result<Vec<u8>>;

    /// Deserialize from a CDR buffer, encapsulation header included.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;
}

/// `std_msgs` package.
pub mod std_msgs {
    /// `std_msgs/msg` messages.
    pub mod msg {
        use crate::{cdr, error::Result, msg::TypeSupport};
        use serde::{Deserialize, Serialize};

        /// `std_msgs/msg/String`.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        pub struct String {
            /// Payload.
            pub data: std::string::String,
        }

        impl String {
            /// Create a message holding `data`.
            pub fn new(data: impl Into<std::string::String>) -> Self {
                Self { data: data.into() }
            }
        }

        impl TypeSupport for String {
            fn type_name() -> &'static str {
                "std_msgs::msg::dds_::String_"
            }

            fn type_hash() -> &'static str {
                "RIHS01_df668c740482bbd48fb39d76a70dfd4bd59db1288021743503259e948f6b1a18"
            }

            fn to_bytes(&self) -> Result<Vec<u8>> {
                cdr::serialize(self)
            }

            fn from_bytes(bytes: &[u8]) -> Result<Self> {
                cdr::deserialize(bytes)
            }
        }
    }
}
