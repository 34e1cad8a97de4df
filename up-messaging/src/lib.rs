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

//! # up-messaging
//!
//! `up-messaging` turns endpoint uris such as `jms://queue/orders` into live messaging
//! endpoints over a pluggable [`ConnectionFactory`].
//!
//! Typical usage is API-first and centered on [`MessagingComponent`] and [`Endpoint`].
//! Internal modules are organized by layer: the control plane classifies addresses,
//! provisions listener containers and drives activation, while the data plane owns the
//! containers that dispatch received messages to a [`Processor`].
//!
//! ## Destination classification
//!
//! The path of an endpoint uri selects the delivery mode. `queue/` paths are
//! point-to-point, `topic/` paths are publish/subscribe, and any other path is used
//! verbatim as a point-to-point destination. The prefix is removed before the
//! [`DestinationResolver`] maps the remainder to a [`DestinationName`].
//!
//! ```
//! use up_messaging::{DeliveryMode, EndpointError, HostContainer, MessagingComponent};
//!
//! let component = MessagingComponent::for_host(HostContainer::new("quick-start"));
//!
//! let queue = component.create_endpoint("jms://queue/orders").unwrap();
//! assert_eq!(queue.destination_name().as_str(), "orders");
//! assert_eq!(queue.delivery_mode(), DeliveryMode::PointToPoint);
//!
//! let topic = component.create_endpoint("jms://topic/prices").unwrap();
//! assert_eq!(topic.destination_name().as_str(), "prices");
//! assert_eq!(topic.delivery_mode(), DeliveryMode::PublishSubscribe);
//!
//! let detached = MessagingComponent::new();
//! assert_eq!(
//!     detached.create_endpoint("jms://queue/orders").unwrap_err(),
//!     EndpointError::MissingDependency("host")
//! );
//! ```
//!
//! Deployments that depend on the historical classification, where `topic/` paths
//! were treated as point-to-point, can opt into it with
//! [`TopicClassification::LegacyPointToPoint`].
//!
//! ## Endpoint options
//!
//! The uri query accepts `concurrentConsumers` (consumer tasks of a pooled container)
//! and `selector` (`key = 'value'` clauses joined by `AND`). Any other option is
//! rejected with [`EndpointError::UnknownOption`].
//!
//! ## Lifecycle contract
//!
//! An endpoint starts inactive. [`MessagingComponent::activate`] starts its listener
//! container with a processor bound; [`MessagingComponent::deactivate`] stops it and
//! is a no-op on an inactive endpoint. Endpoints can be re-activated any number of
//! times.

mod address;
mod component;
mod control_plane;
mod data_plane;
mod delivery_mode;
mod destination;
mod endpoint;
mod error;
mod host;
#[doc(hidden)]
pub mod observability;
mod processor;
mod runtime;
mod template;
mod transport;

pub use address::Address;
pub use component::MessagingComponent;
pub use control_plane::classification::{TopicClassification, QUEUE_PREFIX, TOPIC_PREFIX};
pub use control_plane::provisioner::{ContainerKind, ContainerStrategy, ListenerProvisioner};
pub use data_plane::listener_container::{ContainerConfig, ListenerContainer};
pub use data_plane::pooled_container::PooledListenerContainer;
pub use data_plane::selector::{MessageSelector, SelectorError};
pub use data_plane::simple_container::SimpleListenerContainer;
pub use delivery_mode::DeliveryMode;
pub use destination::{DestinationName, DestinationResolver, DirectoryResolver, IdentityResolver};
pub use endpoint::{Endpoint, EndpointState};
pub use error::{EndpointError, LifecycleError};
pub use host::HostContainer;
pub use processor::{Exchange, ProcessError, Processor};
pub use template::{ListenerConfig, ListenerSettings, MessagingTemplate};
pub use transport::{
    ConnectionFactory, Message, MessageListener, TransportCode, TransportError,
};
