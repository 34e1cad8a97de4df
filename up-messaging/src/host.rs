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

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

///
/// [`HostContainer`] is the application-level owner every endpoint lives under.
///
/// A [`MessagingComponent`][crate::MessagingComponent] must be attached to exactly one host
/// before it can create endpoints. Endpoints keep only a weak back-reference to their host,
/// used to reject lifecycle calls made through a component attached elsewhere.
///
/// # Examples
///
/// ```
/// use up_messaging::HostContainer;
///
/// let host = HostContainer::new("orders-service");
/// assert_eq!(host.name(), "orders-service");
/// assert_ne!(host.id(), HostContainer::new("orders-service").id());
/// ```
pub struct HostContainer {
    name: String,
    id: String,
}

impl HostContainer {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            id: uuid::Uuid::new_v4().hyphenated().to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Debug for HostContainer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostContainer")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish()
    }
}
