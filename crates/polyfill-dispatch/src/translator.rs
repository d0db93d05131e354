//! Async translation seam
//!
//! Message pipelines built on tokio hold a `dyn MessageTranslator` rather
//! than a concrete dispatcher. Translation itself never blocks, so the
//! futures complete on first poll; timeouts and cancellation belong to the
//! transport that calls in.

use async_trait::async_trait;
use polyfill_core::{Direction, MessageTitle, ProtocolVersion, Result};
use std::sync::Arc;

use crate::dispatcher::Dispatcher;

/// Trait for translating message payloads between protocol revisions
#[async_trait]
pub trait MessageTranslator: Send + Sync {
    /// Translate a payload received from a peer at `version`
    async fn translate_incoming(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>>;

    /// Translate a payload bound for a peer at `version`
    async fn translate_outgoing(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>>;
}

#[async_trait]
impl MessageTranslator for Dispatcher {
    async fn translate_incoming(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        self.translate(Direction::Incoming, version, title, payload)
    }

    async fn translate_outgoing(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        self.translate(Direction::Outgoing, version, title, payload)
    }
}

#[async_trait]
impl<T: MessageTranslator + ?Sized> MessageTranslator for Arc<T> {
    async fn translate_incoming(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        (**self).translate_incoming(version, title, payload).await
    }

    async fn translate_outgoing(
        &self,
        version: ProtocolVersion,
        title: &MessageTitle,
        payload: &[u8],
    ) -> Result<Option<Vec<u8>>> {
        (**self).translate_outgoing(version, title, payload).await
    }
}
