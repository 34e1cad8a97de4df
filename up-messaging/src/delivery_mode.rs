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

use std::fmt::{Display, Formatter};

/// How messages sent to a destination reach its consumers.
///
/// Exactly one mode holds per [`Endpoint`][crate::Endpoint].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DeliveryMode {
    /// Queue semantics: each message is handed to exactly one consumer.
    #[default]
    PointToPoint,
    /// Topic semantics: every active subscriber receives its own copy.
    PublishSubscribe,
}

impl DeliveryMode {
    /// Builds a mode from the classic `pub_sub_domain` flag.
    pub fn from_pub_sub_domain(pub_sub_domain: bool) -> Self {
        if pub_sub_domain {
            DeliveryMode::PublishSubscribe
        } else {
            DeliveryMode::PointToPoint
        }
    }

    /// Returns `true` for [`DeliveryMode::PublishSubscribe`].
    pub fn is_pub_sub_domain(&self) -> bool {
        matches!(self, DeliveryMode::PublishSubscribe)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryMode::PointToPoint => "point_to_point",
            DeliveryMode::PublishSubscribe => "publish_subscribe",
        }
    }
}

impl Display for DeliveryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
