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

//! Listener container selection and configuration.

use crate::data_plane::listener_container::ListenerContainer;
use crate::data_plane::pooled_container::PooledListenerContainer;
use crate::data_plane::simple_container::SimpleListenerContainer;
use crate::observability::events;
use crate::template::{ListenerConfig, ListenerSettings};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::debug;

const COMPONENT: &str = "provisioner";

/// Chooses which listener container implementation backs a new endpoint.
///
/// Closures of the shape `Fn(&ListenerSettings) -> Box<dyn ListenerContainer>` are
/// strategies too, so a custom container kind needs no new type.
pub trait ContainerStrategy: Send + Sync {
    fn create_container(&self, listener_settings: &ListenerSettings) -> Box<dyn ListenerContainer>;
}

impl<F> ContainerStrategy for F
where
    F: Fn(&ListenerSettings) -> Box<dyn ListenerContainer> + Send + Sync,
{
    fn create_container(&self, listener_settings: &ListenerSettings) -> Box<dyn ListenerContainer> {
        self(listener_settings)
    }
}

/// Built-in container kinds.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ContainerKind {
    /// Consumer pool on a dedicated runtime thread.
    #[default]
    Pooled,
    /// Inline dispatch on the transport's delivery callback.
    Simple,
}

impl ContainerStrategy for ContainerKind {
    fn create_container(&self, listener_settings: &ListenerSettings) -> Box<dyn ListenerContainer> {
        match self {
            ContainerKind::Pooled => Box::new(PooledListenerContainer::new(*listener_settings)),
            ContainerKind::Simple => Box::new(SimpleListenerContainer::new()),
        }
    }
}

/// Creates listener containers and copies per-endpoint configuration onto them.
pub struct ListenerProvisioner {
    strategy: Arc<dyn ContainerStrategy>,
}

impl ListenerProvisioner {
    pub fn new(strategy: impl ContainerStrategy + 'static) -> Self {
        Self {
            strategy: Arc::new(strategy),
        }
    }

    /// Builds a container for `config`.
    ///
    /// Fields are copied verbatim. A missing connection factory is not reported here;
    /// the container rejects it when started.
    pub fn provision(&self, config: &ListenerConfig) -> Arc<dyn ListenerContainer> {
        let mut container = self.strategy.create_container(config.listener_settings());
        container.set_destination_name(config.destination_name().clone());
        container.set_delivery_mode(config.delivery_mode());
        container.set_connection_factory(config.connection_factory().cloned());
        container.set_selector(config.selector().cloned());

        debug!(
            event = events::CONTAINER_PROVISIONED,
            component = COMPONENT,
            container_kind = container.kind(),
            destination = config.destination_name().as_str(),
            delivery_mode = config.delivery_mode().as_str(),
            "provisioned listener container"
        );

        Arc::from(container)
    }
}

impl Default for ListenerProvisioner {
    fn default() -> Self {
        Self::new(ContainerKind::default())
    }
}

impl Debug for ListenerProvisioner {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerProvisioner").finish_non_exhaustive()
    }
}
