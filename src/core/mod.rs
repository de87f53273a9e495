//! Core application primitives (report assembly, HTTP surface)

pub mod http;
pub mod report;

pub use http::*;
pub use report::*;
