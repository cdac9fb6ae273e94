//! Error plumbing shared by the autocode crates.

pub mod error;

pub use error::FromMessage;
