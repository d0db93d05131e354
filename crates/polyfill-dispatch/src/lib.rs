//! # polyfill-dispatch
//!
//! Version-gated dispatch of wire-message polyfills.
//!
//! This crate provides:
//! - `PolyfillRegistry`, the ordered version → constructor map
//! - `Dispatcher`, which selects and chains polyfillers for a caller version
//! - `MessageTranslator`, an async seam for message pipelines

pub mod dispatcher;
pub mod registry;
pub mod translator;

pub use dispatcher::Dispatcher;
pub use registry::{PolyfillConstructor, PolyfillRegistry, Selected};
pub use translator::MessageTranslator;

pub use polyfill_core::{Direction, MessageTitle, PolyfillError, Polyfiller, ProtocolVersion, Result};
