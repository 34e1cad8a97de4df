/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Collaborator contracts for the messaging transport.
//!
//! Nothing in this crate moves bytes over a wire. A [`ConnectionFactory`]
//! implementation supplies send/receive primitives and the core only decides
//! which listener gets registered where.

use crate::delivery_mode::DeliveryMode;
use crate::destination::DestinationName;
use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tracing::warn;

/// Status codes carried by [`TransportError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TransportCode {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    FailedPrecondition,
    Unavailable,
    Internal,
}

/// Failure surfaced by a transport collaborator or by a listener container.
///
/// The core never translates these; they reach the caller unchanged.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportError {
    code: TransportCode,
    message: String,
}

impl TransportError {
    pub fn fail_with_code(code: TransportCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code(&self) -> TransportCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl Error for TransportError {}

/// A message as seen by listeners and processors.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    id: String,
    properties: HashMap<String, String>,
    payload: Vec<u8>,
}

impl Message {
    /// Creates a message with a fresh v4 id.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().hyphenated().to_string(),
            properties: HashMap::new(),
            payload: payload.into(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Callback a transport drives for every message delivered to a registration.
#[async_trait]
pub trait MessageListener: Send + Sync {
    async fn on_receive(&self, message: Message);

    async fn on_error(&self, err: TransportError) {
        warn!(err = %err, "transport reported an error to a listener");
    }
}

/// The transport collaborator a listener container consumes from.
///
/// Listeners are identified by `Arc` identity: unregistering must pass the
/// same `Arc` that was registered.
#[async_trait]
pub trait ConnectionFactory: Send + Sync {
    async fn send(
        &self,
        destination: &DestinationName,
        delivery_mode: DeliveryMode,
        message: Message,
    ) -> Result<(), TransportError>;

    async fn register_listener(
        &self,
        destination: &DestinationName,
        delivery_mode: DeliveryMode,
        listener: Arc<dyn MessageListener>,
    ) -> Result<(), TransportError>;

    async fn unregister_listener(
        &self,
        destination: &DestinationName,
        delivery_mode: DeliveryMode,
        listener: Arc<dyn MessageListener>,
    ) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::{Message, TransportCode, TransportError};

    #[test]
    fn transport_error_display_includes_code_and_message() {
        let err = TransportError::fail_with_code(TransportCode::Unavailable, "broker down");

        assert_eq!(err.code(), TransportCode::Unavailable);
        assert_eq!(err.to_string(), "Unavailable: broker down");
    }

    #[test]
    fn messages_get_distinct_ids_and_keep_properties() {
        let first = Message::new("a").with_property("region", "eu");
        let second = Message::new("a");

        assert_ne!(first.id(), second.id());
        assert_eq!(first.property("region"), Some("eu"));
        assert_eq!(second.property("region"), None);
        assert_eq!(first.payload(), b"a");
    }
}
