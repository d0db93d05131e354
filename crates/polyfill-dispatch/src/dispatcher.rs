//! Version-gated dispatcher
//!
//! For a caller at version `C`, every polyfiller registered at a version
//! `>= C` is instantiated and applied in ascending version order, each
//! step's output feeding the next. Steps whose polyfiller does not handle
//! the message title pass the buffer through untouched.

use polyfill_core::{Direction, MessageTitle, ProtocolVersion, Result};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, trace, warn};

use crate::registry::{PolyfillRegistry, Selected};

/// Applies registered polyfillers to message payloads
///
/// Cloning is cheap; clones share the same read-only registry.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Arc<PolyfillRegistry>,
}

impl Dispatcher {
    /// Create a dispatcher that owns `registry` from now on
    pub fn new(registry: PolyfillRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// The registry this dispatcher reads from
    pub fn registry(&self) -> &PolyfillRegistry {
        &self.registry
    }

    /// Registered versions, ascending
    pub fn versions(&self) -> Vec<ProtocolVersion> {
        self.registry.versions()
    }

    /// Select the polyfillers a caller at `caller` still needs, ascending
    /// by version. An empty result is not an error.
    pub fn select(&self, caller: ProtocolVersion) -> Vec<Selected> {
        let selected = self.registry.instantiate_from(caller);
        debug!(
            caller = %caller,
            count = selected.len(),
            "Selected polyfillers"
        );
        selected
    }

    /// Translate a payload received from a peer at `version`.
    ///
    /// Returns `Ok(None)` when no selected polyfiller handles `title`.
    pub fn translate_incoming(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        self.translate(Direction::Incoming, version, title, payload)
    }

    /// Translate a payload bound for a peer at `version`.
    ///
    /// Returns `Ok(None)` when no selected polyfiller handles `title`.
    pub fn translate_outgoing(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        self.translate(Direction::Outgoing, version, title, payload)
    }

    /// Run the selected chain in `direction`.
    ///
    /// The first failing step aborts the chain and its error is returned
    /// as-is; no partially transformed buffer escapes.
    pub fn translate(
        &self,
        direction: Direction,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        let mut current: Option<Vec<u8>> = None;

        for step in self.select(version) {
            let polyfiller = step.polyfiller.as_ref();
            if !polyfiller.handles(title) {
                trace!(
                    version = %step.version,
                    polyfiller = polyfiller.name(),
                    %title,
                    "Passing through"
                );
                continue;
            }

            let input = current.as_deref().unwrap_or(payload);
            let output = polyfiller
                .transform(direction, title, input)
                .inspect_err(|err| {
                    warn!(
                        version = %step.version,
                        polyfiller = polyfiller.name(),
                        %title,
                        %direction,
                        "Polyfiller rejected payload: {}",
                        err
                    );
                })?;

            debug!(
                version = %step.version,
                polyfiller = polyfiller.name(),
                %title,
                %direction,
                bytes_in = input.len(),
                bytes_out = output.len(),
                "Applied polyfiller"
            );
            current = Some(output);
        }

        Ok(current)
    }

    /// Like [`translate`](Self::translate), but hands back the original
    /// payload when nothing applies
    pub fn translate_or_passthrough<'a>(
        &self,
        direction: Direction,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &'a [u8],
    ) -> Result<Cow<'a, [u8]>> {
        Ok(match self.translate(direction, version, title, payload)? {
            Some(translated) => Cow::Owned(translated),
            None => Cow::Borrowed(payload),
        })
    }
}

impl From<PolyfillRegistry> for Dispatcher {
    fn from(registry: PolyfillRegistry) -> Self {
        Self::new(registry)
    }
}
