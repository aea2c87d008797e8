//! # Validation Module
//!
//! Input validation utilities for Locadora Games.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                        │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (construction-time invariants)                   │
//! │  ├── Duration tables: positive day keys, non-negative prices           │
//! │  └── Payment info: key present, label length, amount sign              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Resolvers and the payload builder                            │
//! │  └── Assume validated input, guard only their own contracts            │
//! │                                                                         │
//! │  Invariants are checked where data is built, not at every lookup       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use locadora_core::validation::{fold_display_name, validate_pix_key};
//!
//! let key = validate_pix_key("  user@example.com  ").unwrap();
//! assert_eq!(key, "user@example.com");
//!
//! assert_eq!(fold_display_name("Tróia Games"), "TROIA GAMES");
//! ```

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_MERCHANT_NAME_CHARS, REFERENCE_LABEL_CHARS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Folds a store name into a PIX-safe merchant name.
///
/// Banking apps reject payloads whose merchant name carries accents or
/// exceeds 25 characters, so the name is truncated, NFD-decomposed with
/// combining marks dropped, and uppercased.
///
/// ## Example
/// ```rust
/// use locadora_core::validation::fold_display_name;
///
/// assert_eq!(fold_display_name("Tróia Games"), "TROIA GAMES");
/// assert_eq!(fold_display_name("Locação São João"), "LOCACAO SAO JOAO");
/// ```
pub fn fold_display_name(name: &str) -> String {
    name.chars()
        .take(MAX_MERCHANT_NAME_CHARS)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_uppercase()
}

/// Validates the configured PIX key.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must fit a single TLV field (99 characters)
///
/// ## Returns
/// The trimmed key, which is what the payload embeds.
pub fn validate_pix_key(key: &str) -> ValidationResult<String> {
    let key = key.trim();

    if key.is_empty() {
        return Err(ValidationError::Required {
            field: "pix_key".to_string(),
        });
    }

    if key.len() > 99 {
        return Err(ValidationError::TooLong {
            field: "pix_key".to_string(),
            max: 99,
        });
    }

    Ok(key.to_string())
}

/// Validates the checkout reference label (PIX `62/05` subfield).
///
/// ## Rules
/// - Exactly 5 characters
/// - Letters and digits only (the payload must stay scannable ASCII)
pub fn validate_reference_label(label: &str) -> ValidationResult<()> {
    if label.chars().count() != REFERENCE_LABEL_CHARS {
        return Err(ValidationError::WrongLength {
            field: "reference_label".to_string(),
            expected: REFERENCE_LABEL_CHARS,
        });
    }

    if !label.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "reference_label".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog item id.
///
/// ## Rules
/// - Must not be empty
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a rental duration in days.
///
/// ## Rules
/// - Must be positive (> 0); a zero-day rental is meaningless and a
///   zero key would corrupt the duration tables
pub fn validate_day_count(days: u32) -> ValidationResult<()> {
    if days == 0 {
        return Err(ValidationError::MustBePositive {
            field: "days".to_string(),
        });
    }

    Ok(())
}

/// Validates a price value.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (promotional free rentals)
///
/// ## Example
/// ```rust
/// use locadora_core::money::Money;
/// use locadora_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_reais(45)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_centavos(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock count or low-stock threshold.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_stock_level(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_display_name() {
        assert_eq!(fold_display_name("Tróia Games"), "TROIA GAMES");
        assert_eq!(fold_display_name("Locação São João"), "LOCACAO SAO JOAO");
        assert_eq!(fold_display_name("plain name"), "PLAIN NAME");
    }

    #[test]
    fn test_fold_display_name_truncates_to_25() {
        let long = "Loja de Jogos Realmente Muito Longa";
        let folded = fold_display_name(long);
        assert_eq!(folded.chars().count(), 25);
        assert_eq!(folded, "LOJA DE JOGOS REALMENTE M");
    }

    #[test]
    fn test_validate_pix_key() {
        assert_eq!(
            validate_pix_key(" user@example.com ").unwrap(),
            "user@example.com"
        );
        assert!(validate_pix_key("").is_err());
        assert!(validate_pix_key("   ").is_err());
        assert!(validate_pix_key(&"k".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_reference_label() {
        assert!(validate_reference_label("TROIA").is_ok());
        assert!(validate_reference_label("AB123").is_ok());

        assert!(validate_reference_label("TROY").is_err());
        assert!(validate_reference_label("TOOLONG").is_err());
        assert!(validate_reference_label("TR IA").is_err());
    }

    #[test]
    fn test_validate_day_count() {
        assert!(validate_day_count(1).is_ok());
        assert!(validate_day_count(90).is_ok());
        assert!(validate_day_count(0).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_reais(45)).is_ok());
        assert!(validate_price(Money::from_centavos(-1)).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(10).is_ok());
        assert!(validate_stock_level(-1).is_err());
    }

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("1").is_ok());
        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("  ").is_err());
    }
}
