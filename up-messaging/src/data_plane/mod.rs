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

//! Data-plane layer.
//!
//! Owns listener containers and the dispatch listeners they register with a
//! connection factory. Received messages are filtered by the endpoint's selector and
//! handed to the bound processor, either through a pooled consumer queue or inline on
//! the delivery callback.

pub(crate) mod dispatch_listener;
pub(crate) mod listener_container;
pub(crate) mod pooled_container;
pub(crate) mod selector;
pub(crate) mod simple_container;
