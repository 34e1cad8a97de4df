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

//! Destination classification from an address path.

use crate::delivery_mode::DeliveryMode;

/// Path prefix marking a point-to-point destination.
pub const QUEUE_PREFIX: &str = "queue/";
/// Path prefix marking a publish/subscribe destination.
pub const TOPIC_PREFIX: &str = "topic/";

/// How `topic/` paths are classified.
///
/// `LegacyPointToPoint` keeps the historical behaviour in which topic paths were
/// given the same delivery mode as queue paths. Deployments relying on it must opt in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum TopicClassification {
    #[default]
    Standard,
    LegacyPointToPoint,
}

impl TopicClassification {
    fn delivery_mode(self) -> DeliveryMode {
        match self {
            TopicClassification::Standard => DeliveryMode::PublishSubscribe,
            TopicClassification::LegacyPointToPoint => DeliveryMode::PointToPoint,
        }
    }
}

/// Splits `path` into its delivery mode and the unresolved destination name.
///
/// Prefixes are matched case-sensitively, `queue/` before `topic/`, and only one
/// prefix is ever stripped. Paths with neither prefix are point-to-point and are
/// returned unchanged.
pub(crate) fn classify(path: &str, topics: TopicClassification) -> (DeliveryMode, &str) {
    if let Some(name) = path.strip_prefix(QUEUE_PREFIX) {
        (DeliveryMode::PointToPoint, name)
    } else if let Some(name) = path.strip_prefix(TOPIC_PREFIX) {
        (topics.delivery_mode(), name)
    } else {
        (DeliveryMode::PointToPoint, path)
    }
}
