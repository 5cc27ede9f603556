//! Operation selection for `--filter` expressions
//!
//! Supports:
//! - Everything: empty expression or `all`
//! - Individual operations: `ADD,MUL,SLOAD`
//! - Regex match: `re:^PUSH\d+$`
//! - Negation of any of the above: `!re:^LOG`

use crate::error::{AnalysisError, Result};
use regex::Regex;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Selector {
    All,
    Names(HashSet<String>),
    Pattern(Regex),
}

/// Filter deciding which operations a command analyzes
#[derive(Debug, Clone)]
pub struct OperationFilter {
    selector: Selector,
    negated: bool,
}

impl OperationFilter {
    /// Create a filter that includes all operations
    pub fn all() -> Self {
        Self {
            selector: Selector::All,
            negated: false,
        }
    }

    /// Parse a filter expression
    ///
    /// # Example
    /// ```
    /// use opcost::filter::OperationFilter;
    ///
    /// let filter = OperationFilter::from_expr("re:^PUSH").unwrap();
    /// assert!(filter.matches("PUSH32"));
    /// assert!(!filter.matches("POP"));
    ///
    /// let filter = OperationFilter::from_expr("!ADD,MUL").unwrap();
    /// assert!(!filter.matches("ADD"));
    /// assert!(filter.matches("SUB"));
    /// ```
    pub fn from_expr(expr: &str) -> Result<Self> {
        let expr = expr.trim();
        let (negated, body) = match expr.strip_prefix('!') {
            Some(rest) => (true, rest.trim()),
            None => (false, expr),
        };

        let selector = if body.is_empty() || body == "all" {
            if negated {
                return Err(AnalysisError::InvalidFilter(
                    "negating 'all' selects nothing".to_string(),
                ));
            }
            Selector::All
        } else if let Some(pattern) = body.strip_prefix("re:") {
            let regex = Regex::new(pattern)
                .map_err(|e| AnalysisError::InvalidFilter(format!("{pattern}: {e}")))?;
            Selector::Pattern(regex)
        } else {
            let names: HashSet<String> = body
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if names.is_empty() {
                return Err(AnalysisError::InvalidFilter(format!(
                    "no operation names in '{expr}'"
                )));
            }
            Selector::Names(names)
        };

        Ok(Self { selector, negated })
    }

    /// Check whether `operation` passes the filter
    pub fn matches(&self, operation: &str) -> bool {
        let selected = match &self.selector {
            Selector::All => true,
            Selector::Names(names) => names.contains(operation),
            Selector::Pattern(regex) => regex.is_match(operation),
        };
        selected != self.negated
    }
}

impl Default for OperationFilter {
    fn default() -> Self {
        Self::all()
    }
}
