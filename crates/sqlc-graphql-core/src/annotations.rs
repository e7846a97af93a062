//! Comment annotations on queries
//!
//! Two scans run in order over a query's comment lines:
//! 1. the binding line `gql: <Operation>.<field>[: <ReturnType>[@directive]]`
//!    is located and removed,
//! 2. the first remaining line starting with `paginated` is located and
//!    removed; `cursor` anywhere on it selects cursor pagination.
//!
//! Everything else stays as documentation.

use crate::model::PaginationMode;
use once_cell::sync::Lazy;
use regex::Regex;

static BINDING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*gql\s*:").unwrap());

const COMMENT_START: &str = "gql-comment";
const COMMENT_END: &str = "gql-end";

/// Target of a `gql:` binding line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GqlBinding {
    /// Operation type being extended
    pub operation: String,
    pub resolver: String,
    pub return_type: Option<String>,
    pub directive: Option<String>,
}

/// Annotations found on one query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotations {
    pub binding: Option<GqlBinding>,
    pub pagination: Option<PaginationMode>,
    /// Lines left after removing the annotation lines
    pub comments: Vec<String>,
}

fn parse_binding(line: &str, default_resolver: &str) -> Option<GqlBinding> {
    let mut parts = line.splitn(3, ':').skip(1);
    let target = parts.next()?.trim();
    let (operation, resolver) = match target.split_once('.') {
        Some((operation, resolver)) => (operation.trim(), resolver.trim()),
        None => (target, default_resolver),
    };
    if operation.is_empty() {
        return None;
    }

    let (return_type, directive) = match parts.next().map(str::trim) {
        Some(hint) => match hint.split_once('@') {
            Some((hint, directive)) => (hint.trim(), Some(format!("@{directive}"))),
            None => (hint, None),
        },
        None => ("", None),
    };

    Some(GqlBinding {
        operation: operation.to_string(),
        resolver: if resolver.is_empty() {
            default_resolver.to_string()
        } else {
            resolver.to_string()
        },
        return_type: (!return_type.is_empty()).then(|| return_type.to_string()),
        directive,
    })
}

/// Extract the binding and pagination annotations from `comments`.
///
/// `default_resolver` names the resolver when the binding omits `.field`.
pub fn parse_annotations(comments: &[String], default_resolver: &str) -> Annotations {
    let mut comments = comments.to_vec();

    let binding_line = comments.iter().position(|c| BINDING_RE.is_match(c));
    let binding = binding_line.and_then(|i| {
        let line = comments.remove(i);
        parse_binding(&line, default_resolver)
    });

    let pagination_line = comments
        .iter()
        .position(|c| c.trim().starts_with("paginated"));
    let pagination = pagination_line.map(|i| {
        if comments.remove(i).contains("cursor") {
            PaginationMode::Cursor
        } else {
            PaginationMode::Offset
        }
    });

    Annotations {
        binding,
        pagination,
        comments,
    }
}

/// Lines inside `gql-comment:` ... `gql-end` bands; everything else is dropped
pub fn public_comments(comments: &[String]) -> Vec<String> {
    let mut public = Vec::new();
    let mut open = false;

    for line in comments {
        let mut text = line.as_str();
        if let Some((_, rest)) = text.split_once(COMMENT_START) {
            open = true;
            text = rest.strip_prefix(':').unwrap_or(rest).trim();
            if text.is_empty() {
                continue;
            }
        }
        // The closing line is dropped along with any text before `gql-end`
        if text.contains(COMMENT_END) {
            open = false;
            continue;
        }
        if open {
            public.push(text.to_string());
        }
    }
    public
}
