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

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use up_messaging::{ContainerKind, ListenerSettings, TopicClassification};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub(crate) component: ComponentConfig,
    #[serde(default)]
    pub(crate) directory: HashMap<String, String>,
    pub(crate) endpoints: Vec<EndpointConfig>,
    #[serde(default)]
    pub(crate) startup_messages: Vec<StartupMessage>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    pub(crate) host_name: String,
    #[serde(default)]
    pub(crate) container_kind: ContainerKindConfig,
    #[serde(default)]
    pub(crate) topic_classification: TopicClassificationConfig,
    pub(crate) concurrent_consumers: usize,
    pub(crate) message_queue_size: usize,
}

impl ComponentConfig {
    pub(crate) fn listener_settings(&self) -> ListenerSettings {
        ListenerSettings {
            concurrent_consumers: self.concurrent_consumers,
            message_queue_size: self.message_queue_size,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKindConfig {
    #[default]
    Pooled,
    Simple,
}

impl From<ContainerKindConfig> for ContainerKind {
    fn from(kind: ContainerKindConfig) -> Self {
        match kind {
            ContainerKindConfig::Pooled => ContainerKind::Pooled,
            ContainerKindConfig::Simple => ContainerKind::Simple,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TopicClassificationConfig {
    #[default]
    Standard,
    LegacyPointToPoint,
}

impl From<TopicClassificationConfig> for TopicClassification {
    fn from(classification: TopicClassificationConfig) -> Self {
        match classification {
            TopicClassificationConfig::Standard => TopicClassification::Standard,
            TopicClassificationConfig::LegacyPointToPoint => {
                TopicClassification::LegacyPointToPoint
            }
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EndpointConfig {
    pub(crate) uri: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct StartupMessage {
    pub(crate) uri: String,
    pub(crate) payload: String,
    #[serde(default)]
    pub(crate) properties: HashMap<String, String>,
}
