//! Topic entities.

pub mod publisher;
