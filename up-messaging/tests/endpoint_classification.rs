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

use up_messaging::{
    DeliveryMode, DirectoryResolver, EndpointError, HostContainer, MessagingComponent,
    TopicClassification,
};

#[test]
fn queue_topic_and_plain_paths_classify_as_documented() {
    integration_test_utils::init_logging();
    let component = MessagingComponent::for_host(HostContainer::new("classification"));

    let cases = [
        ("jms://queue/orders", "orders", DeliveryMode::PointToPoint),
        ("jms://topic/prices", "prices", DeliveryMode::PublishSubscribe),
        ("jms://orders", "orders", DeliveryMode::PointToPoint),
        ("queue/returns", "returns", DeliveryMode::PointToPoint),
        ("jms://topic/", "", DeliveryMode::PublishSubscribe),
    ];

    for (uri, destination, delivery_mode) in cases {
        let endpoint = component.create_endpoint(uri).expect("endpoint");
        assert_eq!(endpoint.destination_name().as_str(), destination, "{uri}");
        assert_eq!(endpoint.delivery_mode(), delivery_mode, "{uri}");
        assert_eq!(endpoint.is_pub_sub_domain(), delivery_mode.is_pub_sub_domain());
    }
}

#[test]
fn legacy_topic_classification_pins_point_to_point() {
    let component = MessagingComponent::for_host(HostContainer::new("legacy"))
        .with_topic_classification(TopicClassification::LegacyPointToPoint);

    let endpoint = component.create_endpoint("jms://topic/prices").expect("endpoint");

    assert_eq!(endpoint.destination_name().as_str(), "prices");
    assert_eq!(endpoint.delivery_mode(), DeliveryMode::PointToPoint);
}

#[test]
fn missing_host_is_reported_for_any_path() {
    let mut component = MessagingComponent::new();

    for uri in ["jms://queue/orders", "jms://topic/prices", "orders", "jms://?selector=x"] {
        assert_eq!(
            component.create_endpoint(uri).expect_err("host is required"),
            EndpointError::MissingDependency("host")
        );
    }

    component.set_host(HostContainer::new("late"));
    assert!(component.create_endpoint("jms://queue/orders").is_ok());
}

#[test]
fn directory_resolver_maps_stripped_names() {
    let component = MessagingComponent::for_host(HostContainer::new("directory"))
        .with_destination_resolver(
            DirectoryResolver::default()
                .with_entry("orders", "prod.orders.v1")
                .with_entry("prices", "prod.prices.v2"),
        );

    let queue = component.create_endpoint("jms://queue/orders").expect("queue");
    let topic = component.create_endpoint("jms://topic/prices").expect("topic");
    let unmapped = component.create_endpoint("jms://queue/audit").expect("unmapped");

    assert_eq!(queue.destination_name().as_str(), "prod.orders.v1");
    assert_eq!(topic.destination_name().as_str(), "prod.prices.v2");
    assert_eq!(unmapped.destination_name().as_str(), "audit");
}

#[test]
fn endpoints_can_be_created_concurrently_from_one_component() {
    let component = MessagingComponent::for_host(HostContainer::new("concurrent"));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|index| {
                let component = &component;
                scope.spawn(move || {
                    let uri = if index % 2 == 0 {
                        format!("jms://queue/q{index}")
                    } else {
                        format!("jms://topic/t{index}")
                    };
                    component.create_endpoint(&uri).expect("endpoint")
                })
            })
            .collect();

        for (index, handle) in handles.into_iter().enumerate() {
            let endpoint = handle.join().expect("creator thread");
            if index % 2 == 0 {
                assert_eq!(endpoint.destination_name().as_str(), format!("q{index}"));
                assert_eq!(endpoint.delivery_mode(), DeliveryMode::PointToPoint);
            } else {
                assert_eq!(endpoint.destination_name().as_str(), format!("t{index}"));
                assert_eq!(endpoint.delivery_mode(), DeliveryMode::PublishSubscribe);
            }
        }
    });

    assert!(!component.template().is_pub_sub_domain());
}
