//! Signal classification interfaces.

pub mod classifier;

pub use classifier::*;
