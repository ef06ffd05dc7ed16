//! ROS2 naming rules for nodes, namespaces and topics.
//!
//! # Rules
//!
//! - Names must not be empty
//! - Tokens contain alphanumeric characters and underscores only
//! - Tokens must not start with a digit
//! - Names must not contain repeated underscores (`__`)
//! - Topic names may contain `/` separators and start with `~` (private name),
//!   in which case the tilde must be alone or followed by `/`
//! - Topic names must not end with `/` nor contain `//`
//! - Namespaces are absolute (start with `/`); `/` alone is the root namespace
//!
//! See [ROS2 Topic and Service Names](https://design.ros2.org/articles/topic_and_service_names.html).

use crate::error::{Error, Result};
use std::time::{SystemTime, UNIX_EPOCH};

/// Represents what kind of name is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    /// A topic name.
    Topic,
    /// A node base name (no namespace).
    Node,
    /// A namespace.
    Namespace,
}

impl std::fmt::Display for NameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Topic => write!(f, "topic"),
            Self::Node => write!(f, "node"),
            Self::Namespace => write!(f, "namespace"),
        }
    }
}

/// Check if a character is valid inside a name token.
#[inline]
#[must_use]
pub fn is_valid_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Check if a character is valid for topic names (includes `/`).
#[inline]
#[must_use]
pub fn is_valid_topic_char(c: char) -> bool {
    is_valid_name_char(c) || c == '/'
}

/// Validate a topic name.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name breaks any of the module rules.
pub fn validate_topic_name(name: &str) -> Result<()> {
    validate_name_impl(name, NameKind::Topic)
}

/// Validate a node base name.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the name breaks any of the module rules.
pub fn validate_node_name(name: &str) -> Result<()> {
    validate_name_impl(name, NameKind::Node)
}

/// Validate an absolute namespace.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] if the namespace breaks any of the module rules.
pub fn validate_namespace(namespace: &str) -> Result<()> {
    validate_name_impl(namespace, NameKind::Namespace)
}

fn validate_name_impl(name: &str, kind: NameKind) -> Result<()> {
    let invalid = |reason: String| {
        Err(Error::InvalidName {
            kind,
            name: name.to_string(),
            reason,
        })
    };

    if name.is_empty() {
        return invalid("name must not be empty".into());
    }

    let body = match kind {
        NameKind::Node => {
            if let Some(c) = name.chars().find(|c| !is_valid_name_char(*c)) {
                return invalid(format!("invalid character '{c}'"));
            }
            name
        }
        NameKind::Namespace => {
            if !name.starts_with('/') {
                return invalid("namespace must be absolute".into());
            }
            if name == "/" {
                return Ok(());
            }
            name
        }
        NameKind::Topic => match name.strip_prefix('~') {
            Some(rest) if !rest.is_empty() && !rest.starts_with('/') => {
                return invalid("'~' must be followed by '/'".into());
            }
            Some(rest) => rest,
            None => name,
        },
    };

    if let Some(c) = body.chars().find(|c| !is_valid_topic_char(*c)) {
        return invalid(format!("invalid character '{c}'"));
    }
    if body.contains("//") {
        return invalid("must not contain repeated '/'".into());
    }
    if body.ends_with('/') {
        return invalid("must not end with '/'".into());
    }
    if body
        .split('/')
        .any(|token| token.starts_with(|c: char| c.is_ascii_digit()))
    {
        return invalid("must not start with a digit".into());
    }
    if name.contains("__") {
        return invalid("must not contain repeated '_'".into());
    }

    Ok(())
}

/// Check if a name is absolute (starts with `/`).
#[inline]
#[must_use]
pub fn is_absolute_name(name: &str) -> bool {
    name.starts_with('/')
}

/// Check if a name is private (starts with `~`).
#[inline]
#[must_use]
pub fn is_private_name(name: &str) -> bool {
    name.starts_with('~')
}

/// Build the fully qualified node name from namespace and node name.
#[must_use]
pub fn build_node_fqn(namespace: &str, node_name: &str) -> String {
    if namespace.is_empty() || namespace == "/" {
        format!("/{node_name}")
    } else {
        format!("{namespace}/{node_name}")
    }
}

/// Expand a topic name to its fully qualified form.
///
/// - absolute names are returned as-is
/// - `~` is replaced with the node FQN
/// - relative names are prefixed with the namespace
///
/// An empty namespace is treated as the root namespace.
pub fn expand_topic_name(namespace: &str, node_name: &str, topic_name: &str) -> Result<String> {
    let namespace = if namespace.is_empty() { "/" } else { namespace };
    validate_namespace(namespace)?;
    validate_node_name(node_name)?;
    validate_topic_name(topic_name)?;

    let expanded = if is_absolute_name(topic_name) {
        topic_name.to_string()
    } else if is_private_name(topic_name) {
        let node_fqn = build_node_fqn(namespace, node_name);
        format!("{node_fqn}{}", &topic_name[1..])
    } else if namespace == "/" {
        format!("/{topic_name}")
    } else {
        format!("{namespace}/{topic_name}")
    };

    validate_topic_name(&expanded)?;
    Ok(expanded)
}

/// Make a node name unique by appending `_<pid>_<milliseconds since epoch>`.
///
/// A base already ending in `_` gets no second one, so a valid base stays
/// valid.
///
/// Lets several instances of the same program run side by side.
#[must_use]
pub fn anonymous_name(base: &str) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    let sep = if base.ends_with('_') { "" } else { "_" };
    format!("{base}{sep}{}_{millis}", std::process::id())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_topic_names() {
        for name in ["chatter", "/chatter", "~", "~/private", "a/b_c", "_hidden", "Foo1"] {
            assert!(validate_topic_name(name).is_ok(), "{name} should be valid");
        }
    }

    #[test]
    fn test_invalid_topic_names() {
        for name in [
            "", "1abc", "/1abc", "foo//bar", "foo/", "foo__bar", "~foo", "foo bar", "a/~",
        ] {
            assert!(validate_topic_name(name).is_err(), "{name} should be invalid");
        }
    }

    #[test]
    fn test_node_names() {
        assert!(validate_node_name("talker").is_ok());
        assert!(validate_node_name("talker_42").is_ok());
        assert!(validate_node_name("").is_err());
        assert!(validate_node_name("my/node").is_err());
        assert!(validate_node_name("~node").is_err());
        assert!(validate_node_name("9lives").is_err());
        assert!(validate_node_name("a__b").is_err());
    }

    #[test]
    fn test_namespaces() {
        assert!(validate_namespace("/").is_ok());
        assert!(validate_namespace("/robot1").is_ok());
        assert!(validate_namespace("/robot1/arm").is_ok());
        assert!(validate_namespace("robot1").is_err());
        assert!(validate_namespace("/robot1/").is_err());
    }

    #[test]
    fn test_expand_topic_name() {
        assert_eq!(expand_topic_name("", "talker", "chatter").unwrap(), "/chatter");
        assert_eq!(
            expand_topic_name("/robot1", "talker", "chatter").unwrap(),
            "/robot1/chatter"
        );
        assert_eq!(
            expand_topic_name("/robot1", "talker", "/chatter").unwrap(),
            "/chatter"
        );
        assert_eq!(
            expand_topic_name("/robot1", "talker", "~/chatter").unwrap(),
            "/robot1/talker/chatter"
        );
        assert_eq!(expand_topic_name("/", "talker", "~").unwrap(), "/talker");
    }

    #[test]
    fn test_build_node_fqn() {
        assert_eq!(build_node_fqn("/", "talker"), "/talker");
        assert_eq!(build_node_fqn("", "talker"), "/talker");
        assert_eq!(build_node_fqn("/ns", "talker"), "/ns/talker");
    }

    #[test]
    fn test_anonymous_name_is_valid_and_prefixed() {
        let name = anonymous_name("talker");
        assert!(name.starts_with(&format!("talker_{}_", std::process::id())));
        assert!(validate_node_name(&name).is_ok());
    }

    #[test]
    fn test_anonymous_name_after_trailing_underscore() {
        let name = anonymous_name("talker_");
        assert!(name.starts_with(&format!("talker_{}_", std::process::id())));
        assert!(!name.contains("__"));
        assert!(validate_node_name(&name).is_ok());
    }
}
