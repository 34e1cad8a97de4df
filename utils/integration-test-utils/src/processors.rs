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

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};
use tracing::debug;
use up_messaging::{Exchange, ProcessError, Processor};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Clone, Default)]
pub struct RecordingProcessor {
    exchanges: Arc<Mutex<Vec<Exchange>>>,
}

impl RecordingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn exchanges(&self) -> Vec<Exchange> {
        self.exchanges.lock().await.clone()
    }

    pub async fn payloads(&self) -> Vec<String> {
        self.exchanges
            .lock()
            .await
            .iter()
            .map(|exchange| String::from_utf8_lossy(exchange.message().payload()).into_owned())
            .collect()
    }

    pub async fn count(&self) -> usize {
        self.exchanges.lock().await.len()
    }

    /// Polls until at least `expected` exchanges arrived. Returns `false` on timeout.
    pub async fn wait_for_count(&self, expected: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        loop {
            if self.count().await >= expected {
                return true;
            }
            if Instant::now() >= deadline {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl Processor for RecordingProcessor {
    async fn process(&self, exchange: Exchange) -> Result<(), ProcessError> {
        debug!(
            endpoint_uri = exchange.endpoint_uri(),
            msg_id = exchange.message().id(),
            "recording exchange"
        );
        self.exchanges.lock().await.push(exchange);
        Ok(())
    }
}

/// Fails every exchange while counting attempts.
#[derive(Clone, Default)]
pub struct FailingProcessor {
    attempts: Arc<AtomicUsize>,
}

impl FailingProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub async fn wait_for_attempts(&self, expected: usize, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.attempts() < expected {
            if Instant::now() >= deadline {
                return false;
            }
            sleep(POLL_INTERVAL).await;
        }
        true
    }
}

#[async_trait]
impl Processor for FailingProcessor {
    async fn process(&self, exchange: Exchange) -> Result<(), ProcessError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(format!("rejected message {}", exchange.message().id()).into())
    }
}
