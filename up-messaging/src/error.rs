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

//! Errors reported by endpoint creation and the activation lifecycle.

use crate::transport::TransportError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failures of [`MessagingComponent::create_endpoint`](crate::MessagingComponent::create_endpoint).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// A required collaborator has not been configured on the component.
    MissingDependency(&'static str),
    /// A recognised endpoint option carries a value that cannot be used.
    InvalidOption {
        name: String,
        value: String,
        reason: String,
    },
    /// The endpoint uri names an option this component does not support.
    UnknownOption(String),
}

impl Display for EndpointError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EndpointError::MissingDependency(dependency) => {
                write!(f, "required dependency `{dependency}` is not configured")
            }
            EndpointError::InvalidOption {
                name,
                value,
                reason,
            } => write!(f, "invalid value `{value}` for option `{name}`: {reason}"),
            EndpointError::UnknownOption(name) => write!(f, "unknown endpoint option `{name}`"),
        }
    }
}

impl Error for EndpointError {}

/// Failures of [`MessagingComponent::activate`](crate::MessagingComponent::activate)
/// and [`MessagingComponent::deactivate`](crate::MessagingComponent::deactivate).
#[derive(Debug, Clone)]
pub enum LifecycleError {
    MissingDependency(&'static str),
    /// The endpoint was created by a component attached to a different host.
    ForeignEndpoint { endpoint_uri: String },
    AlreadyActive { endpoint_uri: String },
    /// Error reported by the connection factory, passed through unchanged.
    Transport(TransportError),
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::MissingDependency(dependency) => {
                write!(f, "required dependency `{dependency}` is not configured")
            }
            LifecycleError::ForeignEndpoint { endpoint_uri } => {
                write!(f, "endpoint `{endpoint_uri}` belongs to a different host")
            }
            LifecycleError::AlreadyActive { endpoint_uri } => {
                write!(f, "endpoint `{endpoint_uri}` is already active")
            }
            LifecycleError::Transport(err) => write!(f, "transport failure: {err}"),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LifecycleError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for LifecycleError {
    fn from(err: TransportError) -> Self {
        LifecycleError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::{EndpointError, LifecycleError};
    use crate::transport::{TransportCode, TransportError};
    use std::error::Error;

    #[test]
    fn endpoint_error_display_names_the_dependency() {
        let error = EndpointError::MissingDependency("host");

        assert_eq!(error.to_string(), "required dependency `host` is not configured");
    }

    #[test]
    fn invalid_option_display_carries_name_value_and_reason() {
        let error = EndpointError::InvalidOption {
            name: "concurrentConsumers".to_string(),
            value: "0".to_string(),
            reason: "must be a positive integer".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "invalid value `0` for option `concurrentConsumers`: must be a positive integer"
        );
    }

    #[test]
    fn lifecycle_transport_error_exposes_source() {
        let error = LifecycleError::from(TransportError::fail_with_code(
            TransportCode::Unavailable,
            "broker down",
        ));

        assert!(error.to_string().starts_with("transport failure:"));
        assert!(error.source().is_some());
        assert!(LifecycleError::MissingDependency("host").source().is_none());
    }
}
