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

use crate::delivery_mode::DeliveryMode;
use crate::destination::DestinationName;
use crate::transport::Message;
use async_trait::async_trait;

/// Error type processors report back to the listener container.
pub type ProcessError = Box<dyn std::error::Error + Send + Sync>;

/// One received message together with where it was consumed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Exchange {
    endpoint_uri: String,
    destination_name: DestinationName,
    delivery_mode: DeliveryMode,
    message: Message,
}

impl Exchange {
    pub fn new(
        endpoint_uri: impl Into<String>,
        destination_name: DestinationName,
        delivery_mode: DeliveryMode,
        message: Message,
    ) -> Self {
        Self {
            endpoint_uri: endpoint_uri.into(),
            destination_name,
            delivery_mode,
            message,
        }
    }

    pub fn endpoint_uri(&self) -> &str {
        &self.endpoint_uri
    }

    pub fn destination_name(&self) -> &DestinationName {
        &self.destination_name
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }
}

/// Consumer callback bound to an endpoint while it is active.
///
/// A returned error is logged by the container; consumption continues.
#[async_trait]
pub trait Processor: Send + Sync {
    async fn process(&self, exchange: Exchange) -> Result<(), ProcessError>;
}
