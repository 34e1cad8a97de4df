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

//! Single-threaded listener container that processes on the delivery callback.

use crate::data_plane::dispatch_listener::{
    clear_stale_registration, DispatchListener, DispatchSink, StaleRegistration,
};
use crate::data_plane::listener_container::{already_running, ContainerConfig, ListenerContainer};
use crate::observability::events;
use crate::processor::Processor;
use crate::transport::{ConnectionFactory, MessageListener, TransportError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

const COMPONENT: &str = "simple_container";
const KIND: &str = "simple";

struct RunningListener {
    connection_factory: Arc<dyn ConnectionFactory>,
    listener: Arc<DispatchListener>,
}

/// Listener container without a consumer pool: each delivery is processed before the
/// transport callback returns, so ordering follows the transport's delivery order.
#[derive(Default)]
pub struct SimpleListenerContainer {
    config: ContainerConfig,
    running: Mutex<Option<RunningListener>>,
    stale: Mutex<Option<StaleRegistration>>,
}

impl SimpleListenerContainer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ListenerContainer for SimpleListenerContainer {
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
        let listener = Arc::new(DispatchListener::new(
            endpoint_uri,
            &self.config,
            DispatchSink::Inline(processor),
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
                err = %err,
                "unable to register listener"
            );
            return Err(err);
        }

        debug!(
            event = events::CONTAINER_START_OK,
            component = COMPONENT,
            endpoint_uri,
            destination = self.config.destination_name.as_str(),
            delivery_mode = self.config.delivery_mode.as_str(),
            "listener container started"
        );

        *running = Some(RunningListener {
            connection_factory,
            listener,
        });
        Ok(())
    }

    async fn stop(&self) -> Result<(), TransportError> {
        let mut running = self.running.lock().await;
        let Some(current) = running.take() else {
            return Ok(());
        };

        let registered: Arc<dyn MessageListener> = current.listener.clone();
        let unregistered = current
            .connection_factory
            .unregister_listener(
                &self.config.destination_name,
                self.config.delivery_mode,
                registered,
            )
            .await;
        current.listener.close().await;

        if let Err(err) = &unregistered {
            *self.stale.lock().await = Some(StaleRegistration {
                connection_factory: current.connection_factory,
                listener: current.listener,
            });
            warn!(
                event = events::CONTAINER_STOP_FAILED,
                component = COMPONENT,
                destination = self.config.destination_name.as_str(),
                err = %err,
                "unable to unregister listener"
            );
        } else {
            debug!(
                event = events::CONTAINER_STOP_OK,
                component = COMPONENT,
                destination = self.config.destination_name.as_str(),
                "listener container stopped"
            );
        }
        unregistered
    }

    async fn is_running(&self) -> bool {
        self.running.lock().await.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::SimpleListenerContainer;
    use crate::data_plane::listener_container::ListenerContainer;
    use crate::processor::{Exchange, ProcessError, Processor};
    use crate::transport::{
        ConnectionFactory, Message, MessageListener, TransportCode, TransportError,
    };
    use crate::{DeliveryMode, DestinationName};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct OrderedProcessor {
        payloads: Mutex<Vec<Vec<u8>>>,
    }

    #[async_trait]
    impl Processor for OrderedProcessor {
        async fn process(&self, exchange: Exchange) -> Result<(), ProcessError> {
            self.payloads
                .lock()
                .await
                .push(exchange.message().payload().to_vec());
            Ok(())
        }
    }

    #[derive(Default)]
    struct SingleSlotFactory {
        listener: Mutex<Option<Arc<dyn MessageListener>>>,
        fail_unregister: AtomicBool,
        unregister_calls: AtomicUsize,
    }

    #[async_trait]
    impl ConnectionFactory for SingleSlotFactory {
        async fn send(
            &self,
            _destination: &DestinationName,
            _delivery_mode: DeliveryMode,
            message: Message,
        ) -> Result<(), TransportError> {
            let listener = self.listener.lock().await.clone();
            if let Some(listener) = listener {
                listener.on_receive(message).await;
            }
            Ok(())
        }

        async fn register_listener(
            &self,
            _destination: &DestinationName,
            _delivery_mode: DeliveryMode,
            listener: Arc<dyn MessageListener>,
        ) -> Result<(), TransportError> {
            *self.listener.lock().await = Some(listener);
            Ok(())
        }

        async fn unregister_listener(
            &self,
            _destination: &DestinationName,
            _delivery_mode: DeliveryMode,
            _listener: Arc<dyn MessageListener>,
        ) -> Result<(), TransportError> {
            self.unregister_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_unregister.load(Ordering::SeqCst) {
                return Err(TransportError::fail_with_code(
                    TransportCode::Unavailable,
                    "broker went away",
                ));
            }
            self.listener.lock().await.take();
            Ok(())
        }
    }

    fn container(factory: Arc<dyn ConnectionFactory>) -> SimpleListenerContainer {
        let mut container = SimpleListenerContainer::new();
        container.set_destination_name(DestinationName::new("prices"));
        container.set_pub_sub_domain(true);
        container.set_connection_factory(Some(factory));
        container
    }

    #[tokio::test]
    async fn processes_inline_in_delivery_order() {
        let factory = Arc::new(SingleSlotFactory::default());
        let container = container(factory.clone());
        let processor = Arc::new(OrderedProcessor::default());

        container
            .start("jms://topic/prices", processor.clone())
            .await
            .expect("start should succeed");
        for payload in ["1", "2", "3"] {
            factory
                .send(
                    &DestinationName::new("prices"),
                    DeliveryMode::PublishSubscribe,
                    Message::new(payload),
                )
                .await
                .expect("send should succeed");
        }

        assert_eq!(
            *processor.payloads.lock().await,
            vec![b"1".to_vec(), b"2".to_vec(), b"3".to_vec()]
        );
        assert_eq!(container.delivery_mode(), DeliveryMode::PublishSubscribe);
        assert_eq!(container.kind(), "simple");
    }

    #[tokio::test]
    async fn stop_reports_unregister_failure_but_leaves_container_stopped() {
        let factory = Arc::new(SingleSlotFactory::default());
        factory.fail_unregister.store(true, Ordering::SeqCst);
        let container = container(factory);

        container
            .start("jms://topic/prices", Arc::new(OrderedProcessor::default()))
            .await
            .expect("start should succeed");
        let err = container.stop().await.expect_err("stop should fail");

        assert_eq!(err.code(), TransportCode::Unavailable);
        assert!(!container.is_running().await);
        container.stop().await.expect("stopping again is a no-op");
    }

    #[tokio::test]
    async fn restart_unregisters_listener_left_behind_by_failed_stop() {
        let factory = Arc::new(SingleSlotFactory::default());
        let container = container(factory.clone());

        container
            .start("jms://topic/prices", Arc::new(OrderedProcessor::default()))
            .await
            .expect("start should succeed");
        factory.fail_unregister.store(true, Ordering::SeqCst);
        container.stop().await.expect_err("stop should fail");

        let err = container
            .start("jms://topic/prices", Arc::new(OrderedProcessor::default()))
            .await
            .expect_err("restart should fail while the old listener is registered");
        assert_eq!(err.code(), TransportCode::Unavailable);
        assert!(!container.is_running().await);

        factory.fail_unregister.store(false, Ordering::SeqCst);
        let processor = Arc::new(OrderedProcessor::default());
        container
            .start("jms://topic/prices", processor.clone())
            .await
            .expect("restart should succeed");
        factory
            .send(
                &DestinationName::new("prices"),
                DeliveryMode::PublishSubscribe,
                Message::new("after"),
            )
            .await
            .expect("send should succeed");

        assert_eq!(factory.unregister_calls.load(Ordering::SeqCst), 3);
        assert_eq!(*processor.payloads.lock().await, vec![b"after".to_vec()]);
    }
}
