//! Error types for page objects

use thiserror::Error;

/// Result type alias using [`PageError`]
pub type PageResult<T> = std::result::Result<T, PageError>;

/// Failures raised by page objects, navigation and automation drivers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Navigation failed: could not resolve '{label}'")]
    Navigation { label: String },

    #[error("Element not found: {locator} within {scope}")]
    ElementNotFound { locator: String, scope: String },

    #[error("Index {index} out of range ({len} available)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Expected exactly one row named '{name}', found {matches}")]
    AmbiguousMatch { name: String, matches: usize },

    #[error("Element is not interactable: {0}")]
    NotInteractable(String),

    #[error("Element is no longer attached to the page: {0}")]
    StaleElement(String),

    #[error("Date {target} not reached after {steps} calendar steps")]
    DateOutOfReach { target: String, steps: usize },

    #[error("Driver error: {0}")]
    Driver(String),

    #[error("Timeout waiting for: {0}")]
    Timeout(String),
}

impl PageError {
    /// Re-labels a lookup failure as a navigation failure for `label`.
    ///
    /// Anything that is not a missing element passes through untouched.
    pub fn into_navigation(self, label: &str) -> Self {
        match self {
            PageError::ElementNotFound { .. } => PageError::Navigation {
                label: label.to_string(),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_navigation_only_rewrites_missing_elements() {
        let missing = PageError::ElementNotFound {
            locator: "a:has-text(\"Forms\")".into(),
            scope: "nb-menu".into(),
        };
        assert_eq!(
            missing.into_navigation("Forms"),
            PageError::Navigation { label: "Forms".into() }
        );

        let stale = PageError::StaleElement("tr".into());
        assert_eq!(stale.clone().into_navigation("Forms"), stale);
    }
}
