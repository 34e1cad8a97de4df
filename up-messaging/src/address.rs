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

//! Endpoint address parsing.

use std::fmt::{Display, Formatter};

const SCHEME_SEPARATOR: &str = "://";
const QUERY_SEPARATOR: char = '?';
const OPTION_SEPARATOR: char = '&';
const OPTION_ASSIGN: char = '=';

/// A parsed endpoint address of the form `<scheme>://<path>[?<options>]`.
///
/// Parsing never fails. An input without `://` has no scheme and the whole
/// input up to the first `?` is the path. Option values are kept verbatim.
///
/// ```
/// use up_messaging::Address;
///
/// let address = Address::parse("jms://queue/orders?concurrentConsumers=4");
/// assert_eq!(address.scheme(), Some("jms"));
/// assert_eq!(address.path(), "queue/orders");
/// assert_eq!(address.option("concurrentConsumers"), Some("4"));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Address {
    uri: String,
    scheme: Option<String>,
    path: String,
    options: Vec<(String, String)>,
}

impl Address {
    pub fn parse(uri: &str) -> Self {
        let (scheme, remainder) = match uri.split_once(SCHEME_SEPARATOR) {
            Some((scheme, remainder)) => (Some(scheme.to_string()), remainder),
            None => (None, uri),
        };

        let (path, query) = match remainder.split_once(QUERY_SEPARATOR) {
            Some((path, query)) => (path, Some(query)),
            None => (remainder, None),
        };

        Self {
            uri: uri.to_string(),
            scheme,
            path: path.to_string(),
            options: query.map(parse_options).unwrap_or_default(),
        }
    }

    /// The address exactly as it was handed in.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The structural segment used for destination classification.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// All `key=value` options in the order they appeared.
    pub fn options(&self) -> &[(String, String)] {
        &self.options
    }

    /// Returns the last value given for `key`, if any.
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options
            .iter()
            .rev()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

fn parse_options(query: &str) -> Vec<(String, String)> {
    query
        .split(OPTION_SEPARATOR)
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once(OPTION_ASSIGN) {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::Address;

    #[test]
    fn parse_splits_scheme_and_path() {
        let address = Address::parse("jms://topic/prices");

        assert_eq!(address.uri(), "jms://topic/prices");
        assert_eq!(address.scheme(), Some("jms"));
        assert_eq!(address.path(), "topic/prices");
        assert!(address.options().is_empty());
    }

    #[test]
    fn parse_without_scheme_uses_whole_input_as_path() {
        let address = Address::parse("orders");

        assert_eq!(address.scheme(), None);
        assert_eq!(address.path(), "orders");
    }

    #[test]
    fn parse_collects_options_and_keeps_values_verbatim() {
        let address =
            Address::parse("jms://queue/orders?selector=region = 'eu'&concurrentConsumers=2&flag");

        assert_eq!(address.path(), "queue/orders");
        assert_eq!(address.option("selector"), Some("region = 'eu'"));
        assert_eq!(address.option("concurrentConsumers"), Some("2"));
        assert_eq!(address.option("flag"), Some(""));
        assert_eq!(address.option("missing"), None);
    }

    #[test]
    fn repeated_option_resolves_to_last_value() {
        let address = Address::parse("jms://orders?concurrentConsumers=1&concurrentConsumers=3");

        assert_eq!(address.options().len(), 2);
        assert_eq!(address.option("concurrentConsumers"), Some("3"));
    }

    #[test]
    fn empty_query_yields_no_options() {
        let address = Address::parse("jms://orders?");

        assert_eq!(address.path(), "orders");
        assert!(address.options().is_empty());
    }
}
