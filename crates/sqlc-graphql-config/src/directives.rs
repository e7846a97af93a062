//! Directive rules
//!
//! A rule attaches one or more GraphQL directives to a type, or to a field of
//! a type. Lookups are case-insensitive and concatenate every matching rule
//! in declaration order.

use serde::{Deserialize, Serialize};

/// Directive rule as written in the options document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectiveRule {
    /// GraphQL type name (`Author`, `Query`, ...)
    #[serde(alias = "type")]
    pub model: String,

    /// Field name; empty applies the rule at type level
    #[serde(skip_serializing_if = "String::is_empty")]
    pub field: String,

    /// Directive text, `@` optional
    pub directive: String,
}

impl DirectiveRule {
    fn applies_to(&self, type_name: &str, field_name: &str) -> bool {
        self.model.eq_ignore_ascii_case(type_name)
            && (self.field.is_empty() || self.field.eq_ignore_ascii_case(field_name))
    }

    fn normalized(&self) -> String {
        let directive = self.directive.trim();
        if directive.starts_with('@') {
            directive.to_string()
        } else {
            format!("@{directive}")
        }
    }
}

/// All configured directive rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveRules {
    rules: Vec<DirectiveRule>,
}

impl DirectiveRules {
    /// Rules in declaration order
    pub fn new(rules: Vec<DirectiveRule>) -> Self {
        Self { rules }
    }

    /// Space-joined directives for `type_name.field_name`.
    ///
    /// Pass an empty `field_name` for a type-level lookup; only rules without
    /// a field then match.
    pub fn directives_for(&self, type_name: &str, field_name: &str) -> Option<String> {
        let found: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| rule.applies_to(type_name, field_name))
            .map(DirectiveRule::normalized)
            .collect();

        if found.is_empty() {
            None
        } else {
            Some(found.join(" "))
        }
    }

    /// No rules configured
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Append `extra` to an optional directive string, space separated
pub fn join_directives(current: Option<String>, extra: Option<String>) -> Option<String> {
    match (current, extra) {
        (Some(current), Some(extra)) => Some(format!("{current} {extra}")),
        (current, None) => current,
        (None, extra) => extra,
    }
}
