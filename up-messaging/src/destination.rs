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

//! Destination names and the strategies that resolve them.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Transport-meaningful destination name with any classification prefix removed.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct DestinationName(String);

impl DestinationName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DestinationName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DestinationName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DestinationName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for DestinationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Turns the classified remainder of an address path into the name the transport knows.
///
/// Deployments substitute this to back destination names with a directory lookup
/// without touching classification. Plain closures implement it as well:
///
/// ```
/// use up_messaging::{DestinationName, DestinationResolver};
///
/// let resolver = |path: &str| DestinationName::new(format!("prod.{path}"));
/// assert_eq!(resolver.resolve("orders").as_str(), "prod.orders");
/// ```
pub trait DestinationResolver: Send + Sync {
    fn resolve(&self, path: &str) -> DestinationName;
}

impl<F> DestinationResolver for F
where
    F: Fn(&str) -> DestinationName + Send + Sync,
{
    fn resolve(&self, path: &str) -> DestinationName {
        self(path)
    }
}

/// Default resolver: the path is the destination name.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityResolver;

impl DestinationResolver for IdentityResolver {
    fn resolve(&self, path: &str) -> DestinationName {
        DestinationName::new(path)
    }
}

/// Resolves names through a lookup table, falling back to the path itself.
#[derive(Clone, Debug, Default)]
pub struct DirectoryResolver {
    entries: HashMap<String, String>,
}

impl DirectoryResolver {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Adds or replaces one directory entry.
    pub fn with_entry(mut self, path: impl Into<String>, destination: impl Into<String>) -> Self {
        self.entries.insert(path.into(), destination.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DestinationResolver for DirectoryResolver {
    fn resolve(&self, path: &str) -> DestinationName {
        match self.entries.get(path) {
            Some(destination) => DestinationName::new(destination.as_str()),
            None => DestinationName::new(path),
        }
    }
}
