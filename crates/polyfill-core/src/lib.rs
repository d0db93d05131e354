//! # polyfill-core
//!
//! Core types and traits for versioned wire-message polyfills.
//!
//! This crate provides the foundational types shared by the dispatcher and
//! by protocol crates that register polyfillers:
//! - Protocol versions and message titles
//! - The `Polyfiller` capability trait
//! - Translation direction
//! - Error types

pub mod error;
pub mod message;
pub mod polyfiller;
pub mod version;

pub use error::{PolyfillError, Result};
pub use message::MessageTitle;
pub use polyfiller::{Direction, Polyfiller};
pub use version::ProtocolVersion;
