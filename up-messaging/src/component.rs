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
use crate::control_plane::activation::EndpointLifecycle;
use crate::control_plane::classification::{classify, TopicClassification};
use crate::control_plane::provisioner::ListenerProvisioner;
use crate::data_plane::selector::MessageSelector;
use crate::destination::{DestinationResolver, IdentityResolver};
use crate::endpoint::Endpoint;
use crate::error::{EndpointError, LifecycleError};
use crate::host::HostContainer;
use crate::observability::{events, fields};
use crate::processor::Processor;
use crate::template::{ListenerSettings, MessagingTemplate};
use crate::transport::ConnectionFactory;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "messaging_component";
const CONCURRENT_CONSUMERS_OPTION: &str = "concurrentConsumers";
const SELECTOR_OPTION: &str = "selector";

///
/// [`MessagingComponent`] turns endpoint uris into [`Endpoint`]s and manages their
/// activation.
///
/// A component is attached to one [`HostContainer`] and owns the shared
/// [`MessagingTemplate`]. Endpoint creation only reads the template, so any number of
/// endpoints can be created concurrently from one component.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use async_trait::async_trait;
/// use up_messaging::{
///     ConnectionFactory, DeliveryMode, DestinationName, EndpointState, Exchange,
///     HostContainer, Message, MessageListener, MessagingComponent, ProcessError, Processor,
///     TransportError,
/// };
///
/// # struct NullFactory;
/// #
/// # #[async_trait]
/// # impl ConnectionFactory for NullFactory {
/// #     async fn send(
/// #         &self,
/// #         _destination: &DestinationName,
/// #         _delivery_mode: DeliveryMode,
/// #         _message: Message,
/// #     ) -> Result<(), TransportError> {
/// #         Ok(())
/// #     }
/// #
/// #     async fn register_listener(
/// #         &self,
/// #         _destination: &DestinationName,
/// #         _delivery_mode: DeliveryMode,
/// #         _listener: Arc<dyn MessageListener>,
/// #     ) -> Result<(), TransportError> {
/// #         Ok(())
/// #     }
/// #
/// #     async fn unregister_listener(
/// #         &self,
/// #         _destination: &DestinationName,
/// #         _delivery_mode: DeliveryMode,
/// #         _listener: Arc<dyn MessageListener>,
/// #     ) -> Result<(), TransportError> {
/// #         Ok(())
/// #     }
/// # }
/// #
/// struct PrintProcessor;
///
/// #[async_trait]
/// impl Processor for PrintProcessor {
///     async fn process(&self, exchange: Exchange) -> Result<(), ProcessError> {
///         let bytes = exchange.message().payload().len();
///         println!("{bytes} bytes from {}", exchange.endpoint_uri());
///         Ok(())
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let component = MessagingComponent::for_host(HostContainer::new("prices-service"))
///     .with_connection_factory(Arc::new(NullFactory));
///
/// let endpoint = component.create_endpoint("jms://topic/prices").unwrap();
/// assert_eq!(endpoint.delivery_mode(), DeliveryMode::PublishSubscribe);
///
/// component.activate(&endpoint, Arc::new(PrintProcessor)).await.unwrap();
/// assert_eq!(endpoint.state().await, EndpointState::Active);
/// component.deactivate(&endpoint).await.unwrap();
/// component.deactivate(&endpoint).await.unwrap();
/// assert_eq!(endpoint.state().await, EndpointState::Inactive);
/// # });
/// ```
pub struct MessagingComponent {
    host: Option<Arc<HostContainer>>,
    template: MessagingTemplate,
    destination_resolver: Arc<dyn DestinationResolver>,
    provisioner: ListenerProvisioner,
    topic_classification: TopicClassification,
}

impl Default for MessagingComponent {
    fn default() -> Self {
        Self {
            host: None,
            template: MessagingTemplate::default(),
            destination_resolver: Arc::new(IdentityResolver),
            provisioner: ListenerProvisioner::default(),
            topic_classification: TopicClassification::default(),
        }
    }
}

impl MessagingComponent {
    /// Creates a component that is not yet attached to a host.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_host(host: Arc<HostContainer>) -> Self {
        Self {
            host: Some(host),
            ..Default::default()
        }
    }

    pub fn set_host(&mut self, host: Arc<HostContainer>) {
        self.host = Some(host);
    }

    pub fn with_template(mut self, template: MessagingTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_connection_factory(
        mut self,
        connection_factory: Arc<dyn ConnectionFactory>,
    ) -> Self {
        self.template.set_connection_factory(connection_factory);
        self
    }

    pub fn with_listener_settings(mut self, listener_settings: ListenerSettings) -> Self {
        self.template.set_listener_settings(listener_settings);
        self
    }

    pub fn with_destination_resolver(
        mut self,
        destination_resolver: impl DestinationResolver + 'static,
    ) -> Self {
        self.destination_resolver = Arc::new(destination_resolver);
        self
    }

    pub fn with_provisioner(mut self, provisioner: ListenerProvisioner) -> Self {
        self.provisioner = provisioner;
        self
    }

    pub fn with_topic_classification(mut self, topic_classification: TopicClassification) -> Self {
        self.topic_classification = topic_classification;
        self
    }

    pub fn host(&self) -> Option<&Arc<HostContainer>> {
        self.host.as_ref()
    }

    pub fn template(&self) -> &MessagingTemplate {
        &self.template
    }

    pub fn topic_classification(&self) -> TopicClassification {
        self.topic_classification
    }

    /// Creates an endpoint from `uri`, classifying the path found in the uri itself.
    pub fn create_endpoint(&self, uri: &str) -> Result<Endpoint, EndpointError> {
        let address = Address::parse(uri);
        let path = address.path().to_string();
        self.build_endpoint(address, &path)
    }

    /// Creates an endpoint for `uri` using `path` for classification.
    ///
    /// Fails with [`EndpointError::MissingDependency`] when no host is attached. That
    /// check runs before anything else.
    pub fn create_endpoint_with_path(
        &self,
        uri: &str,
        path: &str,
    ) -> Result<Endpoint, EndpointError> {
        self.build_endpoint(Address::parse(uri), path)
    }

    fn build_endpoint(&self, address: Address, path: &str) -> Result<Endpoint, EndpointError> {
        let Some(host) = self.host.as_ref() else {
            warn!(
                event = events::ENDPOINT_CREATE_FAILED,
                component = COMPONENT,
                endpoint_uri = address.uri(),
                reason = "missing_host",
                "cannot create endpoint without a host container"
            );
            return Err(EndpointError::MissingDependency("host"));
        };

        debug!(
            event = events::ENDPOINT_CREATE_START,
            component = COMPONENT,
            endpoint_uri = address.uri(),
            host = host.name(),
            "creating endpoint"
        );

        let (delivery_mode, unresolved_name) = classify(path, self.topic_classification);
        let destination_name = self.destination_resolver.resolve(unresolved_name);

        debug!(
            event = events::ENDPOINT_CLASSIFIED,
            component = COMPONENT,
            endpoint_uri = address.uri(),
            destination = destination_name.as_str(),
            delivery_mode = delivery_mode.as_str(),
            "classified endpoint path"
        );

        let (listener_settings, selector) =
            self.endpoint_options(&address).inspect_err(|err| {
                warn!(
                    event = events::ENDPOINT_CREATE_FAILED,
                    component = COMPONENT,
                    endpoint_uri = address.uri(),
                    err = %err,
                    "invalid endpoint options"
                );
            })?;

        let listener_config = self
            .template
            .listener_config(destination_name.clone(), delivery_mode)
            .with_listener_settings(listener_settings)
            .with_selector(selector);
        let listener_container = self.provisioner.provision(&listener_config);
        let template = self
            .template
            .for_destination(destination_name, delivery_mode)
            .with_listener_settings(listener_settings);

        let endpoint = Endpoint::new(address, template, listener_container, host);

        info!(
            event = events::ENDPOINT_CREATE_OK,
            component = COMPONENT,
            endpoint_uri = endpoint.uri(),
            destination = endpoint.destination_name().as_str(),
            delivery_mode = endpoint.delivery_mode().as_str(),
            container_kind = endpoint.listener_container().kind(),
            selector = fields::format_selector(listener_config.selector()),
            "created endpoint"
        );
        Ok(endpoint)
    }

    fn endpoint_options(
        &self,
        address: &Address,
    ) -> Result<(ListenerSettings, Option<MessageSelector>), EndpointError> {
        let mut listener_settings = self.template.listener_settings();
        let mut selector = None;

        for (name, value) in address.options() {
            match name.as_str() {
                CONCURRENT_CONSUMERS_OPTION => {
                    listener_settings.concurrent_consumers = parse_concurrent_consumers(value)?;
                }
                SELECTOR_OPTION => {
                    let parsed =
                        MessageSelector::parse(value).map_err(|err| EndpointError::InvalidOption {
                            name: name.clone(),
                            value: value.clone(),
                            reason: err.to_string(),
                        })?;
                    selector = Some(parsed);
                }
                _ => return Err(EndpointError::UnknownOption(name.clone())),
            }
        }

        Ok((listener_settings, selector))
    }

    /// Binds `processor` to the endpoint and starts its listener container.
    pub async fn activate(
        &self,
        endpoint: &Endpoint,
        processor: Arc<dyn Processor>,
    ) -> Result<(), LifecycleError> {
        EndpointLifecycle::new(self.host.as_ref())
            .activate(endpoint, processor)
            .await
    }

    /// Stops the endpoint's listener container. Calling it on an inactive endpoint
    /// is a no-op.
    pub async fn deactivate(&self, endpoint: &Endpoint) -> Result<(), LifecycleError> {
        EndpointLifecycle::new(self.host.as_ref())
            .deactivate(endpoint)
            .await
    }
}

fn parse_concurrent_consumers(value: &str) -> Result<usize, EndpointError> {
    match value.parse::<usize>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(EndpointError::InvalidOption {
            name: CONCURRENT_CONSUMERS_OPTION.to_string(),
            value: value.to_string(),
            reason: "must be a positive integer".to_string(),
        }),
    }
}

impl Debug for MessagingComponent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagingComponent")
            .field("host", &self.host)
            .field("template", &self.template)
            .field("topic_classification", &self.topic_classification)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::MessagingComponent;
    use crate::control_plane::classification::TopicClassification;
    use crate::control_plane::provisioner::{ContainerKind, ListenerProvisioner};
    use crate::destination::{DestinationName, DirectoryResolver};
    use crate::error::EndpointError;
    use crate::host::HostContainer;
    use crate::DeliveryMode;

    fn component() -> MessagingComponent {
        MessagingComponent::for_host(HostContainer::new("svc"))
    }

    #[test]
    fn missing_host_fails_for_every_path() {
        let component = MessagingComponent::new();

        for uri in ["jms://queue/orders", "jms://topic/prices", "jms://orders", ""] {
            assert_eq!(
                component.create_endpoint(uri).expect_err("no host attached"),
                EndpointError::MissingDependency("host")
            );
        }
        assert_eq!(
            component
                .create_endpoint_with_path("jms://whatever?bogus=1", "queue/orders")
                .expect_err("host check runs before option parsing"),
            EndpointError::MissingDependency("host")
        );
    }

    #[test]
    fn classification_scenarios() {
        let component = component();

        let queue = component.create_endpoint("jms://queue/orders").expect("queue");
        let topic = component.create_endpoint("jms://topic/prices").expect("topic");
        let plain = component.create_endpoint("jms://orders").expect("plain");

        assert_eq!(queue.destination_name().as_str(), "orders");
        assert_eq!(queue.delivery_mode(), DeliveryMode::PointToPoint);
        assert_eq!(topic.destination_name().as_str(), "prices");
        assert_eq!(topic.delivery_mode(), DeliveryMode::PublishSubscribe);
        assert_eq!(plain.destination_name().as_str(), "orders");
        assert_eq!(plain.delivery_mode(), DeliveryMode::PointToPoint);
    }

    #[test]
    fn legacy_topic_classification_is_opt_in() {
        let component =
            component().with_topic_classification(TopicClassification::LegacyPointToPoint);

        let topic = component.create_endpoint("jms://topic/prices").expect("topic");

        assert_eq!(topic.destination_name().as_str(), "prices");
        assert_eq!(topic.delivery_mode(), DeliveryMode::PointToPoint);
    }

    #[test]
    fn explicit_path_overrides_uri_path() {
        let endpoint = component()
            .create_endpoint_with_path("jms://anything", "topic/prices")
            .expect("endpoint");

        assert_eq!(endpoint.uri(), "jms://anything");
        assert_eq!(endpoint.destination_name().as_str(), "prices");
        assert_eq!(endpoint.delivery_mode(), DeliveryMode::PublishSubscribe);
    }

    #[test]
    fn resolver_sees_the_stripped_name() {
        let component = component().with_destination_resolver(
            DirectoryResolver::default().with_entry("orders", "prod.orders"),
        );

        let mapped = component.create_endpoint("jms://queue/orders").expect("mapped");
        let unmapped = component.create_endpoint("jms://queue/returns").expect("unmapped");

        assert_eq!(mapped.destination_name().as_str(), "prod.orders");
        assert_eq!(unmapped.destination_name().as_str(), "returns");
    }

    #[test]
    fn closure_resolver_is_accepted() {
        let component = component()
            .with_destination_resolver(|path: &str| DestinationName::new(path.to_uppercase()));

        let endpoint = component.create_endpoint("jms://topic/prices").expect("endpoint");

        assert_eq!(endpoint.destination_name().as_str(), "PRICES");
    }

    #[test]
    fn endpoint_options_reach_the_container() {
        let endpoint = component()
            .create_endpoint("jms://queue/orders?concurrentConsumers=4&selector=region = 'eu'")
            .expect("endpoint");

        assert_eq!(endpoint.template().listener_settings().concurrent_consumers, 4);
        assert_eq!(
            endpoint
                .listener_container()
                .config()
                .selector
                .as_ref()
                .map(|selector| selector.expression()),
            Some("region = 'eu'")
        );
    }

    #[test]
    fn bad_and_unknown_options_are_rejected() {
        let component = component();

        assert!(matches!(
            component.create_endpoint("jms://queue/orders?concurrentConsumers=0"),
            Err(EndpointError::InvalidOption { .. })
        ));
        assert!(matches!(
            component.create_endpoint("jms://queue/orders?selector=region"),
            Err(EndpointError::InvalidOption { .. })
        ));
        assert_eq!(
            component
                .create_endpoint("jms://queue/orders?acknowledgeMode=auto")
                .expect_err("unknown option"),
            EndpointError::UnknownOption("acknowledgeMode".to_string())
        );
    }

    #[test]
    fn creating_endpoints_leaves_the_shared_template_untouched() {
        let component =
            component().with_provisioner(ListenerProvisioner::new(ContainerKind::Simple));

        let endpoint = component.create_endpoint("jms://topic/prices").expect("endpoint");

        assert_eq!(endpoint.listener_container().kind(), "simple");
        assert!(!component.template().is_pub_sub_domain());
        assert!(component.template().default_destination_name().is_none());
        assert!(endpoint.template().is_pub_sub_domain());
    }
}
