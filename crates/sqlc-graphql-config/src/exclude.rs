//! Field exclusion rules (`TypeName.fieldName`)

use crate::error::{ConfigError, ConfigResult};
use std::collections::HashMap;

/// Excluded field names grouped by GraphQL type name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeRules {
    by_type: HashMap<String, Vec<String>>,
}

impl ExcludeRules {
    /// Parse `Type.field` entries; anything other than two segments is an error
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> ConfigResult<Self> {
        let mut by_type: HashMap<String, Vec<String>> = HashMap::new();
        for entry in entries {
            let entry = entry.as_ref();
            match entry.split('.').collect::<Vec<_>>().as_slice() {
                [type_name, field] if !type_name.is_empty() && !field.is_empty() => {
                    by_type
                        .entry(type_name.to_string())
                        .or_default()
                        .push(field.to_string());
                }
                _ => return Err(ConfigError::InvalidExclude(entry.to_string())),
            }
        }
        Ok(Self { by_type })
    }

    /// Is `field` (GraphQL spelling) excluded from `type_name`?
    pub fn is_excluded(&self, type_name: &str, field: &str) -> bool {
        self.by_type
            .get(type_name)
            .is_some_and(|fields| fields.iter().any(|f| f == field))
    }

    /// No exclusions configured
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_groups_by_type() {
        let rules = ExcludeRules::parse(&["Author.name", "Author.bio", "Book.isbn"]).unwrap();

        assert!(rules.is_excluded("Author", "name"));
        assert!(rules.is_excluded("Author", "bio"));
        assert!(rules.is_excluded("Book", "isbn"));
        assert!(!rules.is_excluded("Book", "name"));
    }

    #[test]
    fn test_empty_list() {
        let rules = ExcludeRules::parse::<&str>(&[]).unwrap();
        assert!(rules.is_empty());
    }

    #[test_case("Author" ; "single segment")]
    #[test_case("public.Author.name" ; "three segments")]
    #[test_case("" ; "empty")]
    #[test_case("Author." ; "empty field")]
    fn test_malformed_entries(entry: &str) {
        let err = ExcludeRules::parse(&[entry]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidExclude(e) if e == entry));
    }
}
