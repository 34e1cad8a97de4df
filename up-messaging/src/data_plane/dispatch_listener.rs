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

//! Transport listener adapter that turns deliveries into exchanges for a processor.

use crate::data_plane::listener_container::ContainerConfig;
use crate::data_plane::selector::MessageSelector;
use crate::delivery_mode::DeliveryMode;
use crate::destination::DestinationName;
use crate::observability::{events, fields};
use crate::processor::{Exchange, Processor};
use crate::transport::{ConnectionFactory, Message, MessageListener, TransportCode, TransportError};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::Sender;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

const COMPONENT: &str = "dispatch_listener";

/// Where accepted exchanges go.
#[derive(Clone)]
pub(crate) enum DispatchSink {
    /// Hand off to a consumer pool through a bounded queue.
    Queue(Sender<Exchange>),
    /// Run the processor on the transport's delivery callback.
    Inline(Arc<dyn Processor>),
}

/// Listener registered with the connection factory while a container is running.
pub(crate) struct DispatchListener {
    endpoint_uri: String,
    destination_name: DestinationName,
    delivery_mode: DeliveryMode,
    selector: Option<MessageSelector>,
    sink: Mutex<Option<DispatchSink>>,
}

impl DispatchListener {
    pub(crate) fn new(endpoint_uri: &str, config: &ContainerConfig, sink: DispatchSink) -> Self {
        Self {
            endpoint_uri: endpoint_uri.to_string(),
            destination_name: config.destination_name.clone(),
            delivery_mode: config.delivery_mode,
            selector: config.selector.clone(),
            sink: Mutex::new(Some(sink)),
        }
    }

    /// Detaches the sink. Deliveries arriving afterwards are dropped.
    pub(crate) async fn close(&self) {
        self.sink.lock().await.take();
    }
}

/// A closed listener the connection factory refused to unregister.
///
/// It may still receive deliveries, so a container must remove it before
/// registering a replacement for the same destination.
pub(crate) struct StaleRegistration {
    pub(crate) connection_factory: Arc<dyn ConnectionFactory>,
    pub(crate) listener: Arc<DispatchListener>,
}

/// Retries unregistering a stale listener left behind by a failed stop.
///
/// `NotFound` counts as success. The slot is only cleared once the factory no
/// longer holds the listener.
pub(crate) async fn clear_stale_registration(
    stale: &mut Option<StaleRegistration>,
    config: &ContainerConfig,
    component: &'static str,
) -> Result<(), TransportError> {
    let Some(registration) = stale.as_ref() else {
        return Ok(());
    };

    let registered: Arc<dyn MessageListener> = registration.listener.clone();
    let result = registration
        .connection_factory
        .unregister_listener(&config.destination_name, config.delivery_mode, registered)
        .await;

    match result {
        Err(err) if err.code() != TransportCode::NotFound => {
            warn!(
                event = events::CONTAINER_STALE_UNREGISTER_FAILED,
                component,
                destination = config.destination_name.as_str(),
                err = %err,
                "stale listener is still registered"
            );
            Err(err)
        }
        _ => {
            debug!(
                event = events::CONTAINER_STALE_UNREGISTER_OK,
                component,
                destination = config.destination_name.as_str(),
                "removed stale listener"
            );
            stale.take();
            Ok(())
        }
    }
}

#[async_trait]
impl MessageListener for DispatchListener {
    async fn on_receive(&self, message: Message) {
        let endpoint_uri = self.endpoint_uri.as_str();
        let destination = self.destination_name.as_str();

        debug!(
            event = events::DISPATCH_RECEIVE,
            component = COMPONENT,
            endpoint_uri,
            destination,
            delivery_mode = self.delivery_mode.as_str(),
            msg_id = message.id(),
            "received message"
        );

        if let Some(selector) = self.selector.as_ref() {
            if !selector.matches(&message) {
                debug!(
                    event = events::DISPATCH_SKIP_SELECTOR,
                    component = COMPONENT,
                    endpoint_uri,
                    destination,
                    msg_id = message.id(),
                    selector = selector.expression(),
                    reason = fields::REASON_SELECTOR_MISMATCH,
                    "skipping message rejected by selector"
                );
                return;
            }
        }

        let Some(sink) = self.sink.lock().await.clone() else {
            debug!(
                event = events::DISPATCH_ENQUEUE_FAILED,
                component = COMPONENT,
                endpoint_uri,
                destination,
                msg_id = message.id(),
                reason = fields::REASON_NOT_ACTIVE,
                "dropping message delivered after stop"
            );
            return;
        };

        let exchange = Exchange::new(
            endpoint_uri,
            self.destination_name.clone(),
            self.delivery_mode,
            message,
        );

        match sink {
            DispatchSink::Queue(sender) => {
                if let Err(err) = sender.send(exchange).await {
                    error!(
                        event = events::DISPATCH_ENQUEUE_FAILED,
                        component = COMPONENT,
                        endpoint_uri,
                        destination,
                        msg_id = err.0.message().id(),
                        reason = fields::REASON_QUEUE_CLOSED,
                        "unable to hand message to consumer pool"
                    );
                }
            }
            DispatchSink::Inline(processor) => {
                dispatch_to_processor(processor.as_ref(), exchange, COMPONENT).await;
            }
        }
    }

    async fn on_error(&self, err: TransportError) {
        warn!(
            event = events::DISPATCH_TRANSPORT_ERROR,
            component = COMPONENT,
            endpoint_uri = self.endpoint_uri.as_str(),
            destination = self.destination_name.as_str(),
            err = %err,
            "transport reported an error"
        );
    }
}

/// Runs one exchange through the processor and logs the outcome.
pub(crate) async fn dispatch_to_processor(
    processor: &dyn Processor,
    exchange: Exchange,
    component: &'static str,
) {
    let msg_id = exchange.message().id().to_string();
    let endpoint_uri = exchange.endpoint_uri().to_string();

    match processor.process(exchange).await {
        Ok(()) => {
            debug!(
                event = events::DISPATCH_PROCESS_OK,
                component,
                endpoint_uri = endpoint_uri.as_str(),
                msg_id = msg_id.as_str(),
                "processor accepted message"
            );
        }
        Err(err) => {
            warn!(
                event = events::DISPATCH_PROCESS_FAILED,
                component,
                endpoint_uri = endpoint_uri.as_str(),
                msg_id = msg_id.as_str(),
                err = %err,
                "processor failed; continuing with next message"
            );
        }
    }
}
