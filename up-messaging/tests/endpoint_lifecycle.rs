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

mod support;

use integration_test_utils::RecordingProcessor;
use std::sync::Arc;
use up_messaging::{
    ContainerKind, DeliveryMode, EndpointState, HostContainer, LifecycleError, Message,
    MessagingComponent, TransportCode,
};

#[tokio::test(flavor = "multi_thread")]
async fn activate_then_deactivate_twice_ends_inactive() {
    integration_test_utils::init_logging();
    let (component, broker) = support::make_component(ContainerKind::Pooled);
    let endpoint = support::create_endpoint_ok(&component, "jms://queue/orders");

    for _ in 0..2 {
        support::assert_activate_ok(&component, &endpoint, Arc::new(RecordingProcessor::new()))
            .await;
        assert_eq!(
            broker
                .listener_count(endpoint.destination_name(), DeliveryMode::PointToPoint)
                .await,
            1
        );
        support::assert_deactivate_ok(&component, &endpoint).await;
        support::assert_deactivate_ok(&component, &endpoint).await;
    }

    assert_eq!(endpoint.state().await, EndpointState::Inactive);
    assert_eq!(
        broker
            .listener_count(endpoint.destination_name(), DeliveryMode::PointToPoint)
            .await,
        0
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn deactivating_a_never_activated_endpoint_is_a_noop() {
    integration_test_utils::init_logging();
    let (component, _broker) = support::make_component(ContainerKind::Simple);
    let endpoint = support::create_endpoint_ok(&component, "jms://topic/prices");

    support::assert_deactivate_ok(&component, &endpoint).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn activating_an_active_endpoint_is_rejected_without_side_effects() {
    integration_test_utils::init_logging();
    let (component, broker) = support::make_component(ContainerKind::Pooled);
    let endpoint = support::create_endpoint_ok(&component, "jms://queue/orders");
    let clone = endpoint.clone();

    support::assert_activate_ok(&component, &endpoint, Arc::new(RecordingProcessor::new())).await;
    let err = component
        .activate(&clone, Arc::new(RecordingProcessor::new()))
        .await
        .expect_err("clones share the running container");

    assert!(matches!(err, LifecycleError::AlreadyActive { .. }));
    assert_eq!(
        broker
            .listener_count(endpoint.destination_name(), DeliveryMode::PointToPoint)
            .await,
        1
    );
    support::assert_deactivate_ok(&component, &clone).await;
    assert_eq!(endpoint.state().await, EndpointState::Inactive);
}

#[tokio::test(flavor = "multi_thread")]
async fn endpoints_of_another_host_are_rejected() {
    integration_test_utils::init_logging();
    let (component, _broker) = support::make_component(ContainerKind::Pooled);
    let other = MessagingComponent::for_host(HostContainer::new("integration-host"));
    let endpoint = support::create_endpoint_ok(&component, "jms://queue/orders");

    let activate = other
        .activate(&endpoint, Arc::new(RecordingProcessor::new()))
        .await
        .expect_err("foreign activate");
    let deactivate = MessagingComponent::new()
        .deactivate(&endpoint)
        .await
        .expect_err("detached deactivate");

    assert!(matches!(activate, LifecycleError::ForeignEndpoint { .. }));
    assert!(matches!(
        deactivate,
        LifecycleError::MissingDependency("host")
    ));
    assert_eq!(endpoint.state().await, EndpointState::Inactive);
}

#[tokio::test(flavor = "multi_thread")]
async fn transport_failures_propagate_unchanged() {
    integration_test_utils::init_logging();
    let (component, broker) = support::make_component(ContainerKind::Pooled);
    let endpoint = support::create_endpoint_ok(&component, "jms://queue/orders");

    broker.set_available(false);
    let err = component
        .activate(&endpoint, Arc::new(RecordingProcessor::new()))
        .await
        .expect_err("broker is down");
    match err {
        LifecycleError::Transport(status) => assert_eq!(status.code(), TransportCode::Unavailable),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(endpoint.state().await, EndpointState::Inactive);
    let send = endpoint
        .send(Message::new("x"))
        .await
        .expect_err("send fails while down");
    assert_eq!(send.code(), TransportCode::Unavailable);

    broker.set_available(true);
    support::assert_activate_ok(&component, &endpoint, Arc::new(RecordingProcessor::new())).await;

    broker.set_available(false);
    let err = component
        .deactivate(&endpoint)
        .await
        .expect_err("unregister fails while down");
    assert!(matches!(err, LifecycleError::Transport(_)));
    assert_eq!(endpoint.state().await, EndpointState::Inactive);

    broker.set_available(true);
    let processor = RecordingProcessor::new();
    support::assert_activate_ok(&component, &endpoint, Arc::new(processor.clone())).await;
    assert_eq!(
        broker
            .listener_count(endpoint.destination_name(), DeliveryMode::PointToPoint)
            .await,
        1
    );
    for payload in ["m0", "m1", "m2", "m3"] {
        endpoint
            .send(Message::new(payload))
            .await
            .expect("send should succeed");
    }

    assert!(processor.wait_for_count(4, support::DELIVERY_TIMEOUT).await);
    let mut payloads = processor.payloads().await;
    payloads.sort();
    assert_eq!(payloads, vec!["m0", "m1", "m2", "m3"]);
    support::assert_deactivate_ok(&component, &endpoint).await;
}
