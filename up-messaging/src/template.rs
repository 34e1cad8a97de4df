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

//! Shared messaging configuration and the per-endpoint values derived from it.

use crate::data_plane::selector::MessageSelector;
use crate::delivery_mode::DeliveryMode;
use crate::destination::DestinationName;
use crate::transport::ConnectionFactory;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

const DEFAULT_CONCURRENT_CONSUMERS: usize = 1;
const DEFAULT_MESSAGE_QUEUE_SIZE: usize = 64;

/// Consumer sizing applied to listener containers.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ListenerSettings {
    /// Number of competing consumer tasks a pooled container runs.
    pub concurrent_consumers: usize,
    /// Bound of the queue between the transport callback and the consumers.
    pub message_queue_size: usize,
}

impl Default for ListenerSettings {
    fn default() -> Self {
        Self {
            concurrent_consumers: DEFAULT_CONCURRENT_CONSUMERS,
            message_queue_size: DEFAULT_MESSAGE_QUEUE_SIZE,
        }
    }
}

/// Messaging configuration shared by every endpoint a component creates.
///
/// Endpoint creation never writes to it. [`MessagingTemplate::for_destination`] derives
/// a fresh value bound to one destination instead.
#[derive(Clone, Default)]
pub struct MessagingTemplate {
    connection_factory: Option<Arc<dyn ConnectionFactory>>,
    delivery_mode: DeliveryMode,
    default_destination_name: Option<DestinationName>,
    listener_settings: ListenerSettings,
}

impl MessagingTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connection_factory(connection_factory: Arc<dyn ConnectionFactory>) -> Self {
        Self {
            connection_factory: Some(connection_factory),
            ..Default::default()
        }
    }

    pub fn with_listener_settings(mut self, listener_settings: ListenerSettings) -> Self {
        self.listener_settings = listener_settings;
        self
    }

    pub fn set_connection_factory(&mut self, connection_factory: Arc<dyn ConnectionFactory>) {
        self.connection_factory = Some(connection_factory);
    }

    pub fn set_listener_settings(&mut self, listener_settings: ListenerSettings) {
        self.listener_settings = listener_settings;
    }

    pub fn connection_factory(&self) -> Option<&Arc<dyn ConnectionFactory>> {
        self.connection_factory.as_ref()
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    pub fn is_pub_sub_domain(&self) -> bool {
        self.delivery_mode.is_pub_sub_domain()
    }

    pub fn default_destination_name(&self) -> Option<&DestinationName> {
        self.default_destination_name.as_ref()
    }

    pub fn listener_settings(&self) -> ListenerSettings {
        self.listener_settings
    }

    /// Returns a copy of this template bound to one destination and delivery mode.
    pub fn for_destination(
        &self,
        destination_name: DestinationName,
        delivery_mode: DeliveryMode,
    ) -> Self {
        Self {
            connection_factory: self.connection_factory.clone(),
            delivery_mode,
            default_destination_name: Some(destination_name),
            listener_settings: self.listener_settings,
        }
    }

    /// Builds the immutable provisioning input for one endpoint.
    pub fn listener_config(
        &self,
        destination_name: DestinationName,
        delivery_mode: DeliveryMode,
    ) -> ListenerConfig {
        ListenerConfig {
            destination_name,
            delivery_mode,
            connection_factory: self.connection_factory.clone(),
            listener_settings: self.listener_settings,
            selector: None,
        }
    }
}

impl Debug for MessagingTemplate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingTemplate")
            .field("has_connection_factory", &self.connection_factory.is_some())
            .field("delivery_mode", &self.delivery_mode)
            .field("default_destination_name", &self.default_destination_name)
            .field("listener_settings", &self.listener_settings)
            .finish()
    }
}

/// Everything the provisioner copies onto a new listener container.
#[derive(Clone)]
pub struct ListenerConfig {
    destination_name: DestinationName,
    delivery_mode: DeliveryMode,
    connection_factory: Option<Arc<dyn ConnectionFactory>>,
    listener_settings: ListenerSettings,
    selector: Option<MessageSelector>,
}

impl ListenerConfig {
    pub fn with_listener_settings(mut self, listener_settings: ListenerSettings) -> Self {
        self.listener_settings = listener_settings;
        self
    }

    pub fn with_selector(mut self, selector: Option<MessageSelector>) -> Self {
        self.selector = selector;
        self
    }

    pub fn destination_name(&self) -> &DestinationName {
        &self.destination_name
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    pub fn connection_factory(&self) -> Option<&Arc<dyn ConnectionFactory>> {
        self.connection_factory.as_ref()
    }

    pub fn listener_settings(&self) -> &ListenerSettings {
        &self.listener_settings
    }

    pub fn selector(&self) -> Option<&MessageSelector> {
        self.selector.as_ref()
    }
}

impl Debug for ListenerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerConfig")
            .field("destination_name", &self.destination_name)
            .field("delivery_mode", &self.delivery_mode)
            .field("has_connection_factory", &self.connection_factory.is_some())
            .field("listener_settings", &self.listener_settings)
            .field("selector", &self.selector)
            .finish()
    }
}
