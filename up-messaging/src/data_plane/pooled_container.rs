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

//! Default listener container: a pool of competing consumers behind a bounded queue.

use crate::data_plane::dispatch_listener::{
    clear_stale_registration, dispatch_to_processor, DispatchListener, DispatchSink,
    StaleRegistration,
};
use crate::data_plane::listener_container::{already_running, ContainerConfig, ListenerContainer};
use crate::observability::events;
use crate::observability::fields::{self, WorkerContext};
use crate::processor::{Exchange, Processor};
use crate::runtime::worker_runtime::{
    spawn_dispatch_loop, DispatchLoopHandle, DEFAULT_CONSUMER_RUNTIME_THREAD_NAME,
};
use crate::template::ListenerSettings;
use crate::transport::{ConnectionFactory, MessageListener, TransportError};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

const CONSUMER_RUNTIME_THREAD_NAME_PREFIX: &str = "msg-cons-";
const CONSUMER_RUNTIME_THREAD_NAME_MAX_LEN: usize = 15;
const COMPONENT: &str = "pooled_container";
const KIND: &str = "pooled";

struct RunningConsumers {
    worker_id: String,
    connection_factory: Arc<dyn ConnectionFactory>,
    listener: Arc<DispatchListener>,
    dispatch_handle: DispatchLoopHandle,
}

/// Listener container that queues deliveries and processes them on a dedicated
/// runtime thread with `concurrent_consumers` competing consumers.
pub struct PooledListenerContainer {
    config: ContainerConfig,
    listener_settings: ListenerSettings,
    running: Mutex<Option<RunningConsumers>>,
    stale: Mutex<Option<StaleRegistration>>,
}

impl PooledListenerContainer {
    pub fn new(listener_settings: ListenerSettings) -> Self {
        Self {
            config: ContainerConfig::default(),
            listener_settings,
            running: Mutex::new(None),
            stale: Mutex::new(None),
        }
    }

    pub fn listener_settings(&self) -> &ListenerSettings {
        &self.listener_settings
    }

    fn build_runtime_thread_name(worker_id: &str) -> String {
        let suffix_len =
            CONSUMER_RUNTIME_THREAD_NAME_MAX_LEN - CONSUMER_RUNTIME_THREAD_NAME_PREFIX.len();
        let suffix: String = worker_id
            .chars()
            .filter(|ch| ch.is_ascii_hexdigit())
            .take(suffix_len)
            .collect();

        if suffix.len() == suffix_len {
            format!("{CONSUMER_RUNTIME_THREAD_NAME_PREFIX}{suffix}")
        } else {
            DEFAULT_CONSUMER_RUNTIME_THREAD_NAME.to_string()
        }
    }

    /// Drains the queue with `concurrent_consumers` consumers until it closes.
    pub(crate) async fn consume_loop(
        worker_id: String,
        processor: Arc<dyn Processor>,
        receiver: Receiver<Exchange>,
        concurrent_consumers: usize,
    ) {
        let worker_context = WorkerContext::with_current_thread(worker_id);
        let receiver = Mutex::new(receiver);

        let consumers = (0..concurrent_consumers.max(1))
            .map(|_| Self::consume(&worker_context, processor.as_ref(), &receiver));
        join_all(consumers).await;

        info!(
            event = events::CONSUMER_QUEUE_CLOSED,
            component = COMPONENT,
            worker_id = worker_context.worker_id.as_str(),
            worker_thread = worker_context.worker_thread.as_str(),
            reason = fields::REASON_QUEUE_CLOSED,
            "consumer queue closed; stopping consumers"
        );
    }

    async fn consume(
        worker_context: &WorkerContext,
        processor: &dyn Processor,
        receiver: &Mutex<Receiver<Exchange>>,
    ) {
        loop {
            let next = receiver.lock().await.recv().await;
            let Some(exchange) = next else {
                break;
            };

            debug!(
                component = COMPONENT,
                worker_id = worker_context.worker_id.as_str(),
                worker_thread = worker_context.worker_thread.as_str(),
                msg_id = exchange.message().id(),
                "consumer picked up message"
            );
            dispatch_to_processor(processor, exchange, COMPONENT).await;
        }
    }
}

#[async_trait]
impl ListenerContainer for PooledListenerContainer {
    fn kind(&self) -> &'static str {
        KIND
    }

    fn config(&self) -> &ContainerConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ContainerConfig {
        &mut self.config
    }

    async fn start(
        &self,
        endpoint_uri: &str,
        processor: Arc<dyn Processor>,
    ) -> Result<(), TransportError> {
        let mut running = self.running.lock().await;
        if running.is_some() {
            return Err(already_running(&self.config));
        }
        clear_stale_registration(&mut *self.stale.lock().await, &self.config, COMPONENT).await?;

        let connection_factory = self.config.require_connection_factory()?;
        let (sender, receiver) = mpsc::channel(self.listener_settings.message_queue_size.max(1));

        let worker_id = uuid::Uuid::new_v4().hyphenated().to_string();
        let concurrent_consumers = self.listener_settings.concurrent_consumers;
        let worker_id_for_loop = worker_id.clone();
        let dispatch_handle = spawn_dispatch_loop(
            Self::build_runtime_thread_name(&worker_id),
            move || {
                Self::consume_loop(worker_id_for_loop, processor, receiver, concurrent_consumers)
            },
        )?;

        let listener = Arc::new(DispatchListener::new(
            endpoint_uri,
            &self.config,
            DispatchSink::Queue(sender),
        ));
        let registered: Arc<dyn MessageListener> = listener.clone();

        if let Err(err) = connection_factory
            .register_listener(
                &self.config.destination_name,
                self.config.delivery_mode,
                registered,
            )
            .await
        {
            warn!(
                event = events::CONTAINER_START_FAILED,
                component = COMPONENT,
                endpoint_uri,
                destination = self.config.destination_name.as_str(),
                delivery_mode = self.config.delivery_mode.as_str(),
                err = %err,
                "unable to register listener; tearing down consumers"
            );
            listener.close().await;
            let _ = dispatch_handle.join().await;
            return Err(err);
        }

        debug!(
            event = events::CONTAINER_START_OK,
            component = COMPONENT,
            endpoint_uri,
            destination = self.config.destination_name.as_str(),
            delivery_mode = self.config.delivery_mode.as_str(),
            worker_id = worker_id.as_str(),
            worker_thread = dispatch_handle.worker_thread(),
            concurrent_consumers,
            "listener container started"
        );

        *running = Some(RunningConsumers {
            worker_id,
            connection_factory,
            listener,
            dispatch_handle,
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), TransportError> {
        let mut running = self.running.lock().await;
        let Some(consumers) = running.take() else {
            return Ok(());
        };

        let registered: Arc<dyn MessageListener> = consumers.listener.clone();
        let unregistered = consumers
            .connection_factory
            .unregister_listener(
                &self.config.destination_name,
                self.config.delivery_mode,
                registered,
            )
            .await;

        consumers.listener.close().await;
        let joined = consumers.dispatch_handle.join().await;
        if unregistered.is_err() {
            *self.stale.lock().await = Some(StaleRegistration {
                connection_factory: consumers.connection_factory,
                listener: consumers.listener,
            });
        }

        match unregistered.and(joined) {
            Ok(()) => {
                debug!(
                    event = events::CONTAINER_STOP_OK,
                    component = COMPONENT,
                    destination = self.config.destination_name.as_str(),
                    worker_id = consumers.worker_id.as_str(),
                    "listener container stopped"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    event = events::CONTAINER_STOP_FAILED,
                    component = COMPONENT,
                    destination = self.config.destination_name.as_str(),
                    worker_id = consumers.worker_id.as_str(),
                    err = %err,
                    "listener container stopped with errors"
                );
                Err(err)
            }
        }
    }

    async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }
}
