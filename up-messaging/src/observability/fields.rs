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

//! Canonical structured field values and format helpers.

use crate::data_plane::selector::MessageSelector;

pub const NONE: &str = "none";
pub const REASON_QUEUE_CLOSED: &str = "queue_closed";
pub const REASON_NOT_ACTIVE: &str = "not_active";
pub const REASON_SELECTOR_MISMATCH: &str = "selector_mismatch";
pub const DEFAULT_WORKER_THREAD: &str = "unknown-thread";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WorkerContext {
    pub worker_id: String,
    pub worker_thread: String,
}

impl WorkerContext {
    pub fn new(worker_id: impl Into<String>, worker_thread: Option<&str>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: thread_name_or_default(worker_thread),
        }
    }

    pub fn with_current_thread(worker_id: impl Into<String>) -> Self {
        Self {
            worker_id: worker_id.into(),
            worker_thread: current_thread_name_or_default(),
        }
    }
}

pub fn thread_name_or_default(thread_name: Option<&str>) -> String {
    thread_name.unwrap_or(DEFAULT_WORKER_THREAD).to_string()
}

pub fn current_thread_name_or_default() -> String {
    thread_name_or_default(std::thread::current().name())
}

pub fn format_selector(selector: Option<&MessageSelector>) -> &str {
    selector.map(MessageSelector::expression).unwrap_or(NONE)
}
