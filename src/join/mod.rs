//! Reconstructing the Food–Compound relationship from Content groups
//!
//! `aggregate` reduces a group of measurements to min/max/avg with the
//! zero-mean rule, `engine` looks up both ends of each pair and attaches
//! the resulting compound document to its food.

pub mod aggregate;
pub mod engine;

pub use aggregate::{parse_content, summarize};
pub use engine::join_contents;
