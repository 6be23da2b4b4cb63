//! Text utilities shared by the recognition strategies.

pub mod normalize;

pub use normalize::{canonicalize, contains_marker};
