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

use in_memory_broker::InMemoryConnectionFactory;
use std::sync::Arc;
use std::time::Duration;
use up_messaging::{
    ContainerKind, Endpoint, EndpointState, HostContainer, ListenerProvisioner, MessagingComponent,
    Processor,
};

pub(crate) const DELIVERY_TIMEOUT: Duration = Duration::from_secs(5);
/// How long to keep watching for deliveries that must not happen.
#[allow(dead_code)]
pub(crate) const QUIET_PERIOD: Duration = Duration::from_millis(100);

pub(crate) fn make_component(
    kind: ContainerKind,
) -> (MessagingComponent, Arc<InMemoryConnectionFactory>) {
    let broker = InMemoryConnectionFactory::new();
    let component = MessagingComponent::for_host(HostContainer::new("integration-host"))
        .with_connection_factory(broker.clone())
        .with_provisioner(ListenerProvisioner::new(kind));
    (component, broker)
}

pub(crate) fn create_endpoint_ok(component: &MessagingComponent, uri: &str) -> Endpoint {
    component
        .create_endpoint(uri)
        .unwrap_or_else(|err| panic!("creating {uri} should succeed: {err}"))
}

pub(crate) async fn assert_activate_ok(
    component: &MessagingComponent,
    endpoint: &Endpoint,
    processor: Arc<dyn Processor>,
) {
    component
        .activate(endpoint, processor)
        .await
        .expect("activation should succeed");
    assert_eq!(endpoint.state().await, EndpointState::Active);
}

#[allow(dead_code)]
pub(crate) async fn assert_deactivate_ok(component: &MessagingComponent, endpoint: &Endpoint) {
    component
        .deactivate(endpoint)
        .await
        .expect("deactivation should succeed");
    assert_eq!(endpoint.state().await, EndpointState::Inactive);
}
