//! Error types for slide rendering.
//!
//! [`SlideError`] covers the two failure classes that abort a render:
//! input errors (the structure is absent or does not match the element
//! grammar) and structural violations (capacity or resource caps exceeded).
//! Data-shape anomalies such as empty series never become errors; renderers
//! substitute placeholders for them.

use thiserror::Error;

use crate::model::LayoutKind;

/// The main error type for slide rendering.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SlideError {
    #[error("structure が必要です")]
    MissingStructure,

    #[error("title が必要です")]
    MissingTitle,

    #[error("invalid slide structure: {0}")]
    InvalidStructure(String),

    #[error("invalid {element} element: {reason}")]
    InvalidElement {
        element: &'static str,
        reason: String,
    },

    #[error("layout `{layout}` holds at most {capacity} element(s), got {count}")]
    SlotCapacity {
        layout: LayoutKind,
        capacity: usize,
        count: usize,
    },

    #[error("{what} exceeds the limit of {limit} (got {actual})")]
    LimitExceeded {
        what: &'static str,
        limit: usize,
        actual: usize,
    },

    #[error("internal rendering error: {0}")]
    Internal(String),
}

impl SlideError {
    /// Create a new `InvalidElement` error.
    pub fn invalid_element(element: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidElement {
            element,
            reason: reason.into(),
        }
    }

    /// Create a new `LimitExceeded` error.
    pub fn limit_exceeded(what: &'static str, limit: usize, actual: usize) -> Self {
        Self::LimitExceeded {
            what,
            limit,
            actual,
        }
    }

    /// Returns true for errors caused by absent or ill-typed input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingStructure
                | Self::MissingTitle
                | Self::InvalidStructure(_)
                | Self::InvalidElement { .. }
        )
    }

    /// Returns true for capacity and resource cap violations.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::SlotCapacity { .. } | Self::LimitExceeded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(SlideError::MissingStructure.to_string(), "structure が必要です");
        assert_eq!(SlideError::MissingTitle.to_string(), "title が必要です");
        assert_eq!(
            SlideError::SlotCapacity {
                layout: LayoutKind::ThreeColumn,
                capacity: 3,
                count: 4,
            }
            .to_string(),
            "layout `three-column` holds at most 3 element(s), got 4"
        );
        assert_eq!(
            SlideError::limit_exceeded("hierarchy depth", 8, 9).to_string(),
            "hierarchy depth exceeds the limit of 8 (got 9)"
        );
    }

    #[test]
    fn test_classification() {
        assert!(SlideError::MissingTitle.is_input_error());
        assert!(SlideError::invalid_element("table", "no headers").is_input_error());
        assert!(!SlideError::MissingTitle.is_structural());
        assert!(SlideError::limit_exceeded("elements", 12, 13).is_structural());
        let internal = SlideError::Internal("boom".to_string());
        assert!(!internal.is_input_error());
        assert!(!internal.is_structural());
    }
}
