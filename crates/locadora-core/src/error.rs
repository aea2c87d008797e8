//! # Error Types
//!
//! Domain-specific error types for locadora-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  locadora-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Application errors (outside this workspace)                           │
//! │  └── ApiError         - What the storefront sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Frontend               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, tier, day count)
//! 3. Errors are enum variants, never String
//! 4. Every failure is returned synchronously at the call site,
//!    never logged-and-swallowed inside the core

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The PIX key is empty at payload-build time.
    ///
    /// ## When This Occurs
    /// - The admin never configured a PIX key
    /// - The configured key is whitespace only
    ///
    /// A payload built after this failure must never be displayed: there
    /// is no valid merchant account to pay into.
    #[error("PIX key is not configured")]
    MissingPixKey,

    /// A TLV field value exceeds the two-digit length prefix.
    ///
    /// ## When This Occurs
    /// - A merchant name, city or reference label longer than 99 characters
    ///   reaches the encoder
    ///
    /// The encoder rejects instead of truncating: a truncated value would
    /// still checksum correctly and silently pay the wrong merchant.
    #[error("TLV field {id} value is {len} characters, limit is 99")]
    FieldValueTooLong { id: String, len: usize },

    /// Neither the item's custom table nor the global table prices the
    /// requested duration.
    ///
    /// ## When This Occurs
    /// - The caller asks for a duration that is not offered for this tier
    ///
    /// ## User Workflow
    /// ```text
    /// Select 11 days (not in any table)
    ///      │
    ///      ▼
    /// PriceUnavailable { tier: "primary", days: 11 }
    ///      │
    ///      ▼
    /// UI shows: "Duration not offered" (never charges a nearby price)
    /// ```
    #[error("no price configured for a {days}-day {tier} rental")]
    PriceUnavailable { tier: String, days: u32 },

    /// A cart line references an item that is not in the catalog snapshot.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when collaborator-supplied data doesn't meet
/// requirements. Used at construction time, before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Field value must be exactly a given length.
    #[error("{field} must be exactly {expected} characters")]
    WrongLength { field: String, expected: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed payload, bad length prefix).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::PriceUnavailable {
            tier: "primary".to_string(),
            days: 11,
        };
        assert_eq!(
            err.to_string(),
            "no price configured for a 11-day primary rental"
        );

        let err = CoreError::FieldValueTooLong {
            id: "59".to_string(),
            len: 120,
        };
        assert_eq!(err.to_string(), "TLV field 59 value is 120 characters, limit is 99");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "pix_key".to_string(),
        };
        assert_eq!(err.to_string(), "pix_key is required");

        let err = ValidationError::WrongLength {
            field: "reference_label".to_string(),
            expected: 5,
        };
        assert_eq!(
            err.to_string(),
            "reference_label must be exactly 5 characters"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "pix_key".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
