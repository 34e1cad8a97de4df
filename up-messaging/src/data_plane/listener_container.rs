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

//! Listener container contract shared by every container kind.

use crate::data_plane::selector::MessageSelector;
use crate::delivery_mode::DeliveryMode;
use crate::destination::DestinationName;
use crate::processor::Processor;
use crate::transport::{ConnectionFactory, TransportCode, TransportError};
use async_trait::async_trait;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Destination-facing fields the provisioner copies onto a container.
///
/// Destination name, delivery mode and connection factory must agree with the
/// endpoint's template; nothing here cross-checks them.
#[derive(Clone, Default)]
pub struct ContainerConfig {
    pub destination_name: DestinationName,
    pub delivery_mode: DeliveryMode,
    pub connection_factory: Option<Arc<dyn ConnectionFactory>>,
    pub selector: Option<MessageSelector>,
}

impl ContainerConfig {
    /// Returns the connection factory or the error a container reports at start.
    pub fn require_connection_factory(
        &self,
    ) -> Result<Arc<dyn ConnectionFactory>, TransportError> {
        self.connection_factory.clone().ok_or_else(|| {
            TransportError::fail_with_code(
                TransportCode::FailedPrecondition,
                format!(
                    "no connection factory configured for destination `{}`",
                    self.destination_name
                ),
            )
        })
    }
}

impl Debug for ContainerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerConfig")
            .field("destination_name", &self.destination_name)
            .field("delivery_mode", &self.delivery_mode)
            .field("has_connection_factory", &self.connection_factory.is_some())
            .field("selector", &self.selector)
            .finish()
    }
}

/// A long-running consumer harness bound to one destination.
///
/// Setters are only called while the container is being provisioned, before it is
/// shared. `start` registers with the connection factory and routes every received
/// message to the processor; `stop` undoes that and must be a no-op when the
/// container is not running. A stopped container can be started again.
#[async_trait]
pub trait ListenerContainer: Send + Sync {
    /// Short name of the container implementation, used in logs.
    fn kind(&self) -> &'static str;

    fn config(&self) -> &ContainerConfig;

    fn config_mut(&mut self) -> &mut ContainerConfig;

    fn set_destination_name(&mut self, destination_name: DestinationName) {
        self.config_mut().destination_name = destination_name;
    }

    fn set_delivery_mode(&mut self, delivery_mode: DeliveryMode) {
        self.config_mut().delivery_mode = delivery_mode;
    }

    fn set_pub_sub_domain(&mut self, pub_sub_domain: bool) {
        self.set_delivery_mode(DeliveryMode::from_pub_sub_domain(pub_sub_domain));
    }

    fn set_connection_factory(&mut self, connection_factory: Option<Arc<dyn ConnectionFactory>>) {
        self.config_mut().connection_factory = connection_factory;
    }

    fn set_selector(&mut self, selector: Option<MessageSelector>) {
        self.config_mut().selector = selector;
    }

    fn destination_name(&self) -> &DestinationName {
        &self.config().destination_name
    }

    fn delivery_mode(&self) -> DeliveryMode {
        self.config().delivery_mode
    }

    async fn start(
        &self,
        endpoint_uri: &str,
        processor: Arc<dyn Processor>,
    ) -> Result<(), TransportError>;

    async fn stop(&self) -> Result<(), TransportError>;

    async fn is_running(&self) -> bool;
}

pub(crate) fn already_running(config: &ContainerConfig) -> TransportError {
    TransportError::fail_with_code(
        TransportCode::AlreadyExists,
        format!(
            "listener container for destination `{}` is already running",
            config.destination_name
        ),
    )
}
