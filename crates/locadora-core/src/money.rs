//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A PIX payload embeds the amount as literal text:                       │
//! │    "45.00" scans; "45.000000000000004" does not                         │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Centavos                                         │
//! │    R$ 45,00 = 4500 centavos, formatted to "45.00" by integer           │
//! │    division — the same bytes on every device, every render             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use locadora_core::money::Money;
//!
//! // Create from centavos (preferred)
//! let price = Money::from_centavos(4500); // R$ 45,00
//!
//! // Arithmetic operations
//! let total = price + Money::from_centavos(500); // R$ 50,00
//!
//! // The exact string the PIX `54` field carries
//! assert_eq!(price.pix_amount(), "45.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and corrections
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## User Workflow Context
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Where Money is Used                                  │
/// │                                                                         │
/// │  DurationPriceTable ──► resolve_price ──► CartItem line price           │
/// │                                                │                        │
/// │  cart_total ◄──────────────────────────────────┘                        │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  MerchantPaymentInfo.amount ──► PIX "54" field ("45.00")               │
/// │                                                                         │
/// │  EVERY monetary value in the system flows through this type            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use locadora_core::money::Money;
    ///
    /// let price = Money::from_centavos(4500); // Represents R$ 45,00
    /// assert_eq!(price.centavos(), 4500);
    /// ```
    #[inline]
    pub const fn from_centavos(centavos: i64) -> Self {
        Money(centavos)
    }

    /// Creates a Money value from whole reais.
    ///
    /// Duration tables are maintained by admins in whole reais
    /// (7 days → R$ 45), so this is the common construction path there.
    ///
    /// ## Example
    /// ```rust
    /// use locadora_core::money::Money;
    ///
    /// let price = Money::from_reais(45);
    /// assert_eq!(price.centavos(), 4500);
    /// ```
    #[inline]
    pub const fn from_reais(reais: i64) -> Self {
        Money(reais * 100)
    }

    /// Returns the value in centavos (smallest currency unit).
    #[inline]
    pub const fn centavos(&self) -> i64 {
        self.0
    }

    /// Returns the whole-real portion.
    #[inline]
    pub const fn reais(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the centavo portion (always 0-99).
    #[inline]
    pub const fn centavos_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Formats the value for the PIX `54` (transaction amount) field.
    ///
    /// Exactly two decimal digits, `.` separator, no thousands separators —
    /// the format banking apps require inside the payload.
    ///
    /// ## Example
    /// ```rust
    /// use locadora_core::money::Money;
    ///
    /// assert_eq!(Money::from_centavos(4500).pix_amount(), "45.00");
    /// assert_eq!(Money::from_centavos(1099).pix_amount(), "10.99");
    /// assert_eq!(Money::zero().pix_amount(), "0.00");
    /// ```
    pub fn pix_amount(&self) -> String {
        format!("{}.{:02}", self.reais(), self.centavos_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in the storefront's format.
///
/// ## Note
/// This is for debugging and receipts. The comma separator matches the
/// Brazilian display convention (`R$ 45,00`); the PIX wire format uses
/// [`Money::pix_amount`] instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}R$ {},{:02}",
            sign,
            self.reais().abs(),
            self.centavos_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over an iterator (cart totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
