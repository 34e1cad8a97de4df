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

//! In-process [`ConnectionFactory`] used by integration tests and the demo binary.
//!
//! Point-to-point destinations hand each message to exactly one registered listener,
//! rotating between listeners; messages sent while nobody listens are kept and handed
//! to the first listener that registers. Publish/subscribe destinations deliver a copy
//! to every registered listener and drop messages nobody is subscribed to.

use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;
use up_messaging::{
    ConnectionFactory, DeliveryMode, DestinationName, Message, MessageListener, TransportCode,
    TransportError,
};

const COMPONENT: &str = "in_memory_broker";

type DestinationKey = (DestinationName, DeliveryMode);

#[derive(Default)]
struct DestinationState {
    listeners: Vec<Arc<dyn MessageListener>>,
    next_consumer: usize,
    backlog: VecDeque<Message>,
}

fn same_listener(a: &Arc<dyn MessageListener>, b: &Arc<dyn MessageListener>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

#[derive(Default)]
pub struct InMemoryConnectionFactory {
    destinations: Mutex<HashMap<DestinationKey, DestinationState>>,
    unavailable: AtomicBool,
}

impl InMemoryConnectionFactory {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// While unavailable, every operation fails with [`TransportCode::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.unavailable.store(!available, Ordering::SeqCst);
    }

    pub async fn listener_count(
        &self,
        destination: &DestinationName,
        delivery_mode: DeliveryMode,
    ) -> usize {
        self.destinations
            .lock()
            .await
            .get(&(destination.clone(), delivery_mode))
            .map_or(0, |state| state.listeners.len())
    }

    /// Messages waiting on a point-to-point destination with no listener.
    pub async fn backlog_len(&self, destination: &DestinationName) -> usize {
        self.destinations
            .lock()
            .await
            .get(&(destination.clone(), DeliveryMode::PointToPoint))
            .map_or(0, |state| state.backlog.len())
    }

    fn check_available(&self) -> Result<(), TransportError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(TransportError::fail_with_code(
                TransportCode::Unavailable,
                "in-memory broker is unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ConnectionFactory for InMemoryConnectionFactory {
    async fn send(
        &self,
        destination: &DestinationName,
        delivery_mode: DeliveryMode,
        message: Message,
    ) -> Result<(), TransportError> {
        self.check_available()?;

        let recipients = {
            let mut destinations = self.destinations.lock().await;
            let state = destinations
                .entry((destination.clone(), delivery_mode))
                .or_default();

            match delivery_mode {
                DeliveryMode::PointToPoint if state.listeners.is_empty() => {
                    state.backlog.push_back(message);
                    debug!(
                        component = COMPONENT,
                        destination = destination.as_str(),
                        backlog = state.backlog.len(),
                        "no consumer; message kept in backlog"
                    );
                    return Ok(());
                }
                DeliveryMode::PointToPoint => {
                    let index = state.next_consumer % state.listeners.len();
                    state.next_consumer = index + 1;
                    vec![state.listeners[index].clone()]
                }
                DeliveryMode::PublishSubscribe => state.listeners.clone(),
            }
        };

        debug!(
            component = COMPONENT,
            destination = destination.as_str(),
            delivery_mode = delivery_mode.as_str(),
            recipients = recipients.len(),
            msg_id = message.id(),
            "delivering message"
        );

        join_all(
            recipients
                .iter()
                .map(|listener| listener.on_receive(message.clone())),
        )
        .await;
        Ok(())
    }

    async fn register_listener(
        &self,
        destination: &DestinationName,
        delivery_mode: DeliveryMode,
        listener: Arc<dyn MessageListener>,
    ) -> Result<(), TransportError> {
        self.check_available()?;

        let backlog = {
            let mut destinations = self.destinations.lock().await;
            let state = destinations
                .entry((destination.clone(), delivery_mode))
                .or_default();

            if state
                .listeners
                .iter()
                .any(|registered| same_listener(registered, &listener))
            {
                return Err(TransportError::fail_with_code(
                    TransportCode::AlreadyExists,
                    format!("listener already registered for `{destination}`"),
                ));
            }
            state.listeners.push(listener.clone());
            std::mem::take(&mut state.backlog)
        };

        debug!(
            component = COMPONENT,
            destination = destination.as_str(),
            delivery_mode = delivery_mode.as_str(),
            backlog = backlog.len(),
            "registered listener"
        );

        for message in backlog {
            listener.on_receive(message).await;
        }
        Ok(())
    }

    async fn unregister_listener(
        &self,
        destination: &DestinationName,
        delivery_mode: DeliveryMode,
        listener: Arc<dyn MessageListener>,
    ) -> Result<(), TransportError> {
        self.check_available()?;

        let mut destinations = self.destinations.lock().await;
        let not_found = || {
            TransportError::fail_with_code(
                TransportCode::NotFound,
                format!("no such listener registered for `{destination}`"),
            )
        };
        let state = destinations
            .get_mut(&(destination.clone(), delivery_mode))
            .ok_or_else(not_found)?;
        let position = state
            .listeners
            .iter()
            .position(|registered| same_listener(registered, &listener))
            .ok_or_else(not_found)?;
        state.listeners.remove(position);

        debug!(
            component = COMPONENT,
            destination = destination.as_str(),
            delivery_mode = delivery_mode.as_str(),
            "unregistered listener"
        );
        Ok(())
    }
}
