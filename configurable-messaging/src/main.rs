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

mod config;

use crate::config::Config;
use async_trait::async_trait;
use clap::Parser;
use in_memory_broker::InMemoryConnectionFactory;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use up_messaging::{
    ContainerKind, DirectoryResolver, Endpoint, EndpointError, Exchange, HostContainer,
    LifecycleError, ListenerProvisioner, Message, MessagingComponent, ProcessError, Processor,
    TransportCode, TransportError,
};

#[derive(Parser)]
#[command()]
struct MessagingArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,
}

struct LoggingProcessor;

#[async_trait]
impl Processor for LoggingProcessor {
    async fn process(&self, exchange: Exchange) -> Result<(), ProcessError> {
        info!(
            endpoint_uri = exchange.endpoint_uri(),
            destination = exchange.destination_name().as_str(),
            delivery_mode = exchange.delivery_mode().as_str(),
            msg_id = exchange.message().id(),
            payload = %String::from_utf8_lossy(exchange.message().payload()),
            "received message"
        );
        Ok(())
    }
}

fn endpoint_failure(uri: &str, err: EndpointError) -> TransportError {
    TransportError::fail_with_code(
        TransportCode::InvalidArgument,
        format!("Unable to create endpoint {uri}: {err}"),
    )
}

fn lifecycle_failure(uri: &str, err: LifecycleError) -> TransportError {
    match err {
        LifecycleError::Transport(status) => status,
        other => TransportError::fail_with_code(
            TransportCode::FailedPrecondition,
            format!("Unable to change state of endpoint {uri}: {other}"),
        ),
    }
}

#[tokio::main]
async fn main() -> Result<(), TransportError> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started configurable-messaging");

    let args = MessagingArgs::parse();
    let contents = std::fs::read_to_string(&args.config).map_err(|e| {
        TransportError::fail_with_code(
            TransportCode::NotFound,
            format!("Unable to read config file {}: {e:?}", args.config),
        )
    })?;
    let config: Config = json5::from_str(&contents).map_err(|e| {
        TransportError::fail_with_code(
            TransportCode::Internal,
            format!("Unable to parse config file: {e:?}"),
        )
    })?;

    let broker = InMemoryConnectionFactory::new();
    let host = HostContainer::new(&config.component.host_name);
    let component = MessagingComponent::for_host(host)
        .with_connection_factory(broker.clone())
        .with_listener_settings(config.component.listener_settings())
        .with_destination_resolver(DirectoryResolver::new(config.directory.clone()))
        .with_provisioner(ListenerProvisioner::new(ContainerKind::from(
            config.component.container_kind,
        )))
        .with_topic_classification(config.component.topic_classification.into());

    let mut endpoints: HashMap<String, Endpoint> = HashMap::new();
    for endpoint_config in &config.endpoints {
        let uri = endpoint_config.uri.as_str();
        let endpoint = component
            .create_endpoint(uri)
            .map_err(|err| endpoint_failure(uri, err))?;
        if endpoints.insert(uri.to_string(), endpoint).is_some() {
            return Err(TransportError::fail_with_code(
                TransportCode::InvalidArgument,
                format!("Duplicate endpoint uri found: {uri}"),
            ));
        }
    }

    for (uri, endpoint) in &endpoints {
        component
            .activate(endpoint, Arc::new(LoggingProcessor))
            .await
            .map_err(|err| lifecycle_failure(uri, err))?;
    }

    for startup_message in config.startup_messages {
        let uri = startup_message.uri.as_str();
        let endpoint = match endpoints.get(uri) {
            Some(endpoint) => endpoint.clone(),
            None => component
                .create_endpoint(uri)
                .map_err(|err| endpoint_failure(uri, err))?,
        };
        let message = startup_message.properties.into_iter().fold(
            Message::new(startup_message.payload.into_bytes()),
            |message, (key, value)| message.with_property(key, value),
        );
        if let Err(err) = endpoint.send(message).await {
            warn!(endpoint_uri = uri, err = %err, "unable to send startup message");
        }
    }

    info!(endpoints = endpoints.len(), "endpoints active; waiting for Ctrl-C");
    tokio::signal::ctrl_c().await.map_err(|e| {
        TransportError::fail_with_code(
            TransportCode::Internal,
            format!("Unable to listen for shutdown signal: {e:?}"),
        )
    })?;

    for (uri, endpoint) in &endpoints {
        if let Err(err) = component.deactivate(endpoint).await {
            warn!(endpoint_uri = uri.as_str(), err = %err, "unable to deactivate endpoint");
        }
    }

    info!("Stopped configurable-messaging");
    Ok(())
}
