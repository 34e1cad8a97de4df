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

//! Endpoint activation lifecycle: Inactive <-> Active.

use crate::endpoint::Endpoint;
use crate::error::LifecycleError;
use crate::host::HostContainer;
use crate::observability::events;
use crate::processor::Processor;
use std::sync::Arc;
use tracing::{debug, info, warn};

const COMPONENT: &str = "activation";

/// Validates host ownership and drives an endpoint's listener container.
pub(crate) struct EndpointLifecycle<'a> {
    host: Option<&'a Arc<HostContainer>>,
}

impl<'a> EndpointLifecycle<'a> {
    pub(crate) fn new(host: Option<&'a Arc<HostContainer>>) -> Self {
        Self { host }
    }

    fn check_owner(&self, endpoint: &Endpoint) -> Result<(), LifecycleError> {
        let host = self.host.ok_or(LifecycleError::MissingDependency("host"))?;
        if !endpoint.is_hosted_by(host) {
            return Err(LifecycleError::ForeignEndpoint {
                endpoint_uri: endpoint.uri().to_string(),
            });
        }
        Ok(())
    }

    /// Starts the endpoint's container with `processor` bound as its consumer.
    ///
    /// A failed start leaves the endpoint inactive.
    pub(crate) async fn activate(
        &self,
        endpoint: &Endpoint,
        processor: Arc<dyn Processor>,
    ) -> Result<(), LifecycleError> {
        self.check_owner(endpoint)?;
        let container = endpoint.listener_container();
        let endpoint_uri = endpoint.uri();

        debug!(
            event = events::ENDPOINT_ACTIVATE_START,
            component = COMPONENT,
            endpoint_uri,
            container_kind = container.kind(),
            "activating endpoint"
        );

        if container.is_running().await {
            warn!(
                event = events::ENDPOINT_ACTIVATE_FAILED,
                component = COMPONENT,
                endpoint_uri,
                reason = "already_active",
                "endpoint is already active"
            );
            return Err(LifecycleError::AlreadyActive {
                endpoint_uri: endpoint_uri.to_string(),
            });
        }

        if let Err(err) = container.start(endpoint_uri, processor).await {
            warn!(
                event = events::ENDPOINT_ACTIVATE_FAILED,
                component = COMPONENT,
                endpoint_uri,
                err = %err,
                "unable to start listener container"
            );
            return Err(LifecycleError::Transport(err));
        }

        info!(
            event = events::ENDPOINT_ACTIVATE_OK,
            component = COMPONENT,
            endpoint_uri,
            destination = endpoint.destination_name().as_str(),
            delivery_mode = endpoint.delivery_mode().as_str(),
            "endpoint activated"
        );
        Ok(())
    }

    /// Stops the endpoint's container. Inactive endpoints are left untouched.
    pub(crate) async fn deactivate(&self, endpoint: &Endpoint) -> Result<(), LifecycleError> {
        self.check_owner(endpoint)?;
        let container = endpoint.listener_container();
        let endpoint_uri = endpoint.uri();

        if !container.is_running().await {
            debug!(
                event = events::ENDPOINT_DEACTIVATE_NOOP,
                component = COMPONENT,
                endpoint_uri,
                "endpoint already inactive"
            );
            return Ok(());
        }

        debug!(
            event = events::ENDPOINT_DEACTIVATE_START,
            component = COMPONENT,
            endpoint_uri,
            "deactivating endpoint"
        );

        if let Err(err) = container.stop().await {
            warn!(
                event = events::ENDPOINT_DEACTIVATE_FAILED,
                component = COMPONENT,
                endpoint_uri,
                err = %err,
                "listener container reported an error while stopping"
            );
            return Err(LifecycleError::Transport(err));
        }

        info!(
            event = events::ENDPOINT_DEACTIVATE_OK,
            component = COMPONENT,
            endpoint_uri,
            "endpoint deactivated"
        );
        Ok(())
    }
}
