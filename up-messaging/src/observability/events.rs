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

//! Canonical structured event names used across `up-messaging`.

// Endpoint factory events.
pub const ENDPOINT_CREATE_START: &str = "endpoint_create_start";
pub const ENDPOINT_CREATE_OK: &str = "endpoint_create_ok";
pub const ENDPOINT_CREATE_FAILED: &str = "endpoint_create_failed";
pub const ENDPOINT_CLASSIFIED: &str = "endpoint_classified";
pub const CONTAINER_PROVISIONED: &str = "container_provisioned";

// Lifecycle events.
pub const ENDPOINT_ACTIVATE_START: &str = "endpoint_activate_start";
pub const ENDPOINT_ACTIVATE_OK: &str = "endpoint_activate_ok";
pub const ENDPOINT_ACTIVATE_FAILED: &str = "endpoint_activate_failed";
pub const ENDPOINT_DEACTIVATE_START: &str = "endpoint_deactivate_start";
pub const ENDPOINT_DEACTIVATE_OK: &str = "endpoint_deactivate_ok";
pub const ENDPOINT_DEACTIVATE_NOOP: &str = "endpoint_deactivate_noop";
pub const ENDPOINT_DEACTIVATE_FAILED: &str = "endpoint_deactivate_failed";

// Listener container events.
pub const CONTAINER_START_OK: &str = "container_start_ok";
pub const CONTAINER_START_FAILED: &str = "container_start_failed";
pub const CONTAINER_STOP_OK: &str = "container_stop_ok";
pub const CONTAINER_STOP_FAILED: &str = "container_stop_failed";
pub const CONTAINER_STALE_UNREGISTER_OK: &str = "container_stale_unregister_ok";
pub const CONTAINER_STALE_UNREGISTER_FAILED: &str = "container_stale_unregister_failed";

// Dispatch events.
pub const DISPATCH_RECEIVE: &str = "dispatch_receive";
pub const DISPATCH_SKIP_SELECTOR: &str = "dispatch_skip_selector";
pub const DISPATCH_ENQUEUE_FAILED: &str = "dispatch_enqueue_failed";
pub const DISPATCH_PROCESS_OK: &str = "dispatch_process_ok";
pub const DISPATCH_PROCESS_FAILED: &str = "dispatch_process_failed";
pub const DISPATCH_TRANSPORT_ERROR: &str = "dispatch_transport_error";
pub const CONSUMER_QUEUE_CLOSED: &str = "consumer_queue_closed";

// Runtime events.
pub const RUNTIME_SPAWN_OK: &str = "runtime_spawn_ok";
pub const RUNTIME_SPAWN_FAILED: &str = "runtime_spawn_failed";
pub const RUNTIME_BUILD_FAILED: &str = "runtime_build_failed";
pub const RUNTIME_JOIN_FAILED: &str = "runtime_join_failed";
