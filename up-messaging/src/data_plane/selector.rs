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

//! Property-based message selectors evaluated before dispatch.
//!
//! Grammar: one or more `key = 'value'` or `key <> 'value'` clauses joined by `AND`.
//! Inside a quoted value `''` stands for a single quote. A clause on a property the
//! message does not carry never matches.

use crate::transport::Message;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Comparison {
    Equal,
    NotEqual,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Clause {
    property: String,
    comparison: Comparison,
    value: String,
}

impl Clause {
    fn matches(&self, message: &Message) -> bool {
        match (message.property(&self.property), self.comparison) {
            (Some(actual), Comparison::Equal) => actual == self.value,
            (Some(actual), Comparison::NotEqual) => actual != self.value,
            (None, _) => false,
        }
    }
}

/// Parse failure for a selector expression.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectorError {
    selector: String,
    reason: &'static str,
}

impl Display for SelectorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid selector `{}`: {}", self.selector, self.reason)
    }
}

impl Error for SelectorError {}

/// A parsed selector; a message is dispatched only when every clause matches.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MessageSelector {
    expression: String,
    clauses: Vec<Clause>,
}

impl MessageSelector {
    pub fn parse(expression: &str) -> Result<Self, SelectorError> {
        let fail = |reason| SelectorError {
            selector: expression.to_string(),
            reason,
        };

        let mut clauses = Vec::new();
        let mut rest = expression.trim();

        if rest.is_empty() {
            return Err(fail("empty expression"));
        }

        loop {
            let property_len = rest
                .find(|ch: char| !(ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.' | '-')))
                .unwrap_or(rest.len());
            if property_len == 0 {
                return Err(fail("expected a property name"));
            }
            let property = rest[..property_len].to_string();
            rest = rest[property_len..].trim_start();

            let comparison = if let Some(after) = rest.strip_prefix("<>") {
                rest = after;
                Comparison::NotEqual
            } else if let Some(after) = rest.strip_prefix('=') {
                rest = after;
                Comparison::Equal
            } else {
                return Err(fail("expected `=` or `<>`"));
            };
            rest = rest.trim_start();

            let (value, after_value) =
                take_quoted(rest).ok_or_else(|| fail("expected a quoted value"))?;
            clauses.push(Clause {
                property,
                comparison,
                value,
            });
            rest = after_value.trim_start();

            if rest.is_empty() {
                break;
            }

            match rest.get(..3) {
                Some(keyword) if keyword.eq_ignore_ascii_case("and") => {
                    let after_keyword = &rest[3..];
                    if !after_keyword.starts_with(char::is_whitespace) {
                        return Err(fail("expected whitespace after `AND`"));
                    }
                    rest = after_keyword.trim_start();
                }
                _ => return Err(fail("expected `AND` between clauses")),
            }
        }

        Ok(Self {
            expression: expression.to_string(),
            clauses,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn matches(&self, message: &Message) -> bool {
        self.clauses.iter().all(|clause| clause.matches(message))
    }
}

/// Splits `'value'rest` into the unescaped value and the remaining input.
fn take_quoted(input: &str) -> Option<(String, &str)> {
    let body = input.strip_prefix('\'')?;
    let mut value = String::new();
    let mut chars = body.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if ch != '\'' {
            value.push(ch);
            continue;
        }
        if let Some((_, '\'')) = chars.peek() {
            chars.next();
            value.push('\'');
            continue;
        }
        return Some((value, &body[idx + 1..]));
    }

    None
}
