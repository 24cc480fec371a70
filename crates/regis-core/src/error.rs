//! # Error Hierarchy
//!
//! Structured validation errors for the data model, built with `thiserror`.
//! Each variant carries the table and id of the offending row so operators
//! can locate it in the source dataset.

use thiserror::Error;

/// Errors raised when a value or a dataset row violates a data-model rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A value did not match any member of a closed enumeration.
    #[error("invalid {field} '{value}'; expected one of: {expected}")]
    InvalidEnum {
        /// Name of the parameter or column being parsed.
        field: &'static str,
        /// The rejected input.
        value: String,
        /// Comma-separated list of accepted values.
        expected: String,
    },

    /// Requirement text was empty or whitespace-only.
    #[error("requirement {id} has empty text")]
    EmptyText {
        /// Offending requirement id.
        id: i64,
    },

    /// Requirement jurisdiction was empty.
    #[error("requirement {id} has an empty jurisdiction")]
    EmptyJurisdiction {
        /// Offending requirement id.
        id: i64,
    },

    /// A page or line number was zero or negative.
    #[error("{table} {id}: {field} must be positive, got {value}")]
    NonPositivePosition {
        /// Table of the offending row.
        table: &'static str,
        /// Offending row id.
        id: String,
        /// Column name (`page`, `line`, `page_1`, ...).
        field: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// A conflict record links a requirement to itself.
    #[error("{table} {id} links requirement {requirement_id} to itself")]
    SelfReferentialConflict {
        /// Table of the offending row.
        table: &'static str,
        /// Offending conflict id.
        id: i64,
        /// The requirement referenced on both sides.
        requirement_id: i64,
    },

    /// Two rows of the same table share an id.
    #[error("duplicate {table} id {id}")]
    DuplicateId {
        /// Table containing the duplicate.
        table: &'static str,
        /// The duplicated id.
        id: String,
    },

    /// A row references a requirement that does not exist where a strong
    /// reference is required.
    #[error("{table} {id} references unknown requirement {requirement_id}")]
    UnknownRequirement {
        /// Table of the offending row.
        table: &'static str,
        /// Offending row id.
        id: String,
        /// The unresolved requirement id.
        requirement_id: i64,
    },

    /// A requirement references a document that does not exist.
    #[error("requirement {id} references unknown document {document_id}")]
    UnknownDocument {
        /// Offending requirement id.
        id: i64,
        /// The unresolved document id.
        document_id: String,
    },

    /// More than one embedding is attached to the same requirement.
    #[error("requirement {requirement_id} has more than one embedding")]
    DuplicateEmbedding {
        /// The requirement carrying several embeddings.
        requirement_id: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_enum_message_lists_accepted_values() {
        let err = ValidationError::InvalidEnum {
            field: "conflict_type",
            value: "bogus".to_string(),
            expected: "contradiction, overlap".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("bogus"));
        assert!(msg.contains("contradiction, overlap"));
    }

    #[test]
    fn position_error_names_table_and_field() {
        let err = ValidationError::NonPositivePosition {
            table: "requirement",
            id: "7".to_string(),
            field: "page",
            value: 0,
        };
        assert_eq!(err.to_string(), "requirement 7: page must be positive, got 0");
    }
}
