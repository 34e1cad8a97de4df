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

//! Control-plane layer.
//!
//! Owns destination classification, listener container provisioning and the
//! endpoint activation lifecycle. Classification produces an immutable per-endpoint
//! configuration, so nothing in this layer writes to the component's shared template.

pub(crate) mod activation;
pub(crate) mod classification;
pub(crate) mod provisioner;
