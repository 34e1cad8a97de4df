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

use crate::address::Address;
use crate::data_plane::listener_container::ListenerContainer;
use crate::delivery_mode::DeliveryMode;
use crate::destination::DestinationName;
use crate::host::HostContainer;
use crate::template::MessagingTemplate;
use crate::transport::{Message, TransportCode, TransportError};
use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, Weak};

/// Whether an endpoint's listener container is currently dispatching to a processor.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum EndpointState {
    #[default]
    Inactive,
    Active,
}

impl Display for EndpointState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointState::Inactive => write!(f, "inactive"),
            EndpointState::Active => write!(f, "active"),
        }
    }
}

///
/// [`Endpoint`] binds a parsed [`Address`] to a resolved [`DestinationName`], a
/// [`DeliveryMode`] and the listener container provisioned for it.
///
/// Endpoints are created by
/// [`MessagingComponent::create_endpoint`][crate::MessagingComponent::create_endpoint]
/// and are immutable afterwards; only the container's running state changes, through
/// the component's `activate` and `deactivate`. Clones share the same container.
///
/// # Examples
///
/// ```
/// use up_messaging::{DeliveryMode, EndpointState, HostContainer, MessagingComponent};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let host = HostContainer::new("orders-service");
/// let component = MessagingComponent::for_host(host);
///
/// let endpoint = component.create_endpoint("jms://queue/orders").unwrap();
/// assert_eq!(endpoint.destination_name().as_str(), "orders");
/// assert_eq!(endpoint.delivery_mode(), DeliveryMode::PointToPoint);
/// assert_eq!(endpoint.state().await, EndpointState::Inactive);
/// # });
/// ```
#[derive(Clone)]
pub struct Endpoint {
    address: Address,
    destination_name: DestinationName,
    delivery_mode: DeliveryMode,
    template: Arc<MessagingTemplate>,
    listener_container: Arc<dyn ListenerContainer>,
    host: Weak<HostContainer>,
}

impl Endpoint {
    pub(crate) fn new(
        address: Address,
        template: MessagingTemplate,
        listener_container: Arc<dyn ListenerContainer>,
        host: &Arc<HostContainer>,
    ) -> Self {
        Self {
            address,
            destination_name: listener_container.destination_name().clone(),
            delivery_mode: listener_container.delivery_mode(),
            template: Arc::new(template),
            listener_container,
            host: Arc::downgrade(host),
        }
    }

    pub fn uri(&self) -> &str {
        self.address.uri()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn destination_name(&self) -> &DestinationName {
        &self.destination_name
    }

    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    pub fn is_pub_sub_domain(&self) -> bool {
        self.delivery_mode.is_pub_sub_domain()
    }

    /// The template bound to this endpoint's destination.
    pub fn template(&self) -> &MessagingTemplate {
        &self.template
    }

    pub fn listener_container(&self) -> &Arc<dyn ListenerContainer> {
        &self.listener_container
    }

    /// The owning host, if it is still alive.
    pub fn host(&self) -> Option<Arc<HostContainer>> {
        self.host.upgrade()
    }

    pub fn is_hosted_by(&self, host: &Arc<HostContainer>) -> bool {
        self.host
            .upgrade()
            .is_some_and(|owner| Arc::ptr_eq(&owner, host))
    }

    pub async fn state(&self) -> EndpointState {
        if self.listener_container.is_running().await {
            EndpointState::Active
        } else {
            EndpointState::Inactive
        }
    }

    /// Sends `message` to this endpoint's destination through the template's
    /// connection factory. Transport failures are returned unchanged.
    pub async fn send(&self, message: Message) -> Result<(), TransportError> {
        let connection_factory = self.template.connection_factory().ok_or_else(|| {
            TransportError::fail_with_code(
                TransportCode::FailedPrecondition,
                format!("no connection factory configured for endpoint `{}`", self.uri()),
            )
        })?;

        connection_factory
            .send(&self.destination_name, self.delivery_mode, message)
            .await
    }
}

impl Debug for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Endpoint")
            .field("uri", &self.address.uri())
            .field("destination_name", &self.destination_name)
            .field("delivery_mode", &self.delivery_mode)
            .field("container_kind", &self.listener_container.kind())
            .finish()
    }
}
