//! # Domain Types
//!
//! Core domain types used throughout Locadora Games.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   RentalItem    │   │   SiteConfig    │   │    CartItem     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  pix_key        │   │  game_id        │       │
//! │  │  stock pools    │   │  price_table    │   │  tier / days    │       │
//! │  │  price override │   │  display labels │   │  console        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  AccountTier    │   │    Console      │   │ DurationPrice-  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │ Table           │       │
//! │  │  Primary        │   │  Ps4            │   │  days → Money   │       │
//! │  │  Secondary      │   │  Ps5            │   │  (validated)    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership Rule
//! `RentalItem`, `SiteConfig` and cart/order records are owned and mutated
//! by external collaborators (catalog admin, config admin, storefront).
//! The core consumes them as read-only snapshots and never writes back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_day_count, validate_price};

// =============================================================================
// Account Tier
// =============================================================================

/// The two rental service classes.
///
/// Each tier has its own stock pools and its own duration→price curve.
/// There is no third tier; the type system enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccountTier {
    /// Full account access (console owner profile).
    Primary,
    /// Shared account access.
    Secondary,
}

impl fmt::Display for AccountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountTier::Primary => write!(f, "primary"),
            AccountTier::Secondary => write!(f, "secondary"),
        }
    }
}

// =============================================================================
// Console
// =============================================================================

/// Console hardware variant selected by the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Console {
    Ps4,
    Ps5,
}

impl Default for Console {
    fn default() -> Self {
        Console::Ps4
    }
}

// =============================================================================
// Duration Price Table
// =============================================================================

/// Sparse mapping from rental duration (days) to price.
///
/// ## Invariants (checked at construction, not at lookup)
/// - Every day-count key is a positive integer
/// - Every price is non-negative
///
/// Lookup is by exact key only — durations between entries are simply not
/// offered, never interpolated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(try_from = "BTreeMap<u32, Money>", into = "BTreeMap<u32, Money>")]
#[ts(export)]
pub struct DurationPriceTable(BTreeMap<u32, Money>);

impl DurationPriceTable {
    /// Builds a table from `(days, price)` entries, validating each entry.
    ///
    /// ## Example
    /// ```rust
    /// use locadora_core::money::Money;
    /// use locadora_core::types::DurationPriceTable;
    ///
    /// let table = DurationPriceTable::from_entries([
    ///     (7, Money::from_reais(45)),
    ///     (15, Money::from_reais(60)),
    /// ]).unwrap();
    /// assert_eq!(table.get(7), Some(Money::from_reais(45)));
    /// assert_eq!(table.get(8), None);
    /// ```
    pub fn from_entries(
        entries: impl IntoIterator<Item = (u32, Money)>,
    ) -> Result<Self, ValidationError> {
        let mut map = BTreeMap::new();
        for (days, price) in entries {
            validate_day_count(days)?;
            validate_price(price)?;
            map.insert(days, price);
        }
        Ok(DurationPriceTable(map))
    }

    /// Exact-key lookup. No interpolation between durations.
    #[inline]
    pub fn get(&self, days: u32) -> Option<Money> {
        self.0.get(&days).copied()
    }

    /// Whether the exact duration is priced.
    #[inline]
    pub fn contains(&self, days: u32) -> bool {
        self.0.contains_key(&days)
    }

    /// Priced durations in ascending order.
    pub fn days(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    /// The shortest priced duration, if any.
    #[inline]
    pub fn min_day(&self) -> Option<u32> {
        self.0.keys().next().copied()
    }

    /// The cheapest price in the table, if any.
    pub fn min_price(&self) -> Option<Money> {
        self.0.values().copied().min()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl TryFrom<BTreeMap<u32, Money>> for DurationPriceTable {
    type Error = ValidationError;

    fn try_from(map: BTreeMap<u32, Money>) -> Result<Self, Self::Error> {
        DurationPriceTable::from_entries(map)
    }
}

impl From<DurationPriceTable> for BTreeMap<u32, Money> {
    fn from(table: DurationPriceTable) -> Self {
        table.0
    }
}

// =============================================================================
// Global Price Table
// =============================================================================

/// The sitewide duration→price curves, one per tier.
///
/// Maintained in the admin config editor; items without a custom table
/// scale along these curves (see `pricing::resolve_price`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GlobalPriceTable {
    pub primary: DurationPriceTable,
    pub secondary: DurationPriceTable,
}

impl GlobalPriceTable {
    /// The curve for one tier.
    #[inline]
    pub fn table(&self, tier: AccountTier) -> &DurationPriceTable {
        match tier {
            AccountTier::Primary => &self.primary,
            AccountTier::Secondary => &self.secondary,
        }
    }
}

// =============================================================================
// Price Override
// =============================================================================

/// Per-item, per-tier pricing: inherit the global curve or override it.
///
/// The admin editor historically persisted empty placeholder objects for
/// items without custom pricing; those normalize to `Inherit` here, so the
/// rest of the core never has to distinguish "no table" from "table with
/// zero entries".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<DurationPriceTable>", into = "Option<DurationPriceTable>")]
pub enum PriceOverride {
    /// No custom pricing; resolve against the global table.
    #[default]
    Inherit,
    /// Authoritative custom table; bypasses the global table entirely.
    Custom(DurationPriceTable),
}

impl PriceOverride {
    /// Direct lookup into the custom table, if this is an override.
    pub fn get(&self, days: u32) -> Option<Money> {
        match self {
            PriceOverride::Inherit => None,
            PriceOverride::Custom(table) => table.get(days),
        }
    }

    /// The custom table, if this is an override.
    pub fn table(&self) -> Option<&DurationPriceTable> {
        match self {
            PriceOverride::Inherit => None,
            PriceOverride::Custom(table) => Some(table),
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, PriceOverride::Custom(_))
    }
}

impl From<Option<DurationPriceTable>> for PriceOverride {
    fn from(table: Option<DurationPriceTable>) -> Self {
        match table {
            Some(t) if !t.is_empty() => PriceOverride::Custom(t),
            // Absent and empty both mean "inherit"
            _ => PriceOverride::Inherit,
        }
    }
}

impl From<PriceOverride> for Option<DurationPriceTable> {
    fn from(value: PriceOverride) -> Self {
        match value {
            PriceOverride::Inherit => None,
            PriceOverride::Custom(table) => Some(table),
        }
    }
}

// =============================================================================
// Rental Item
// =============================================================================

/// A catalog item (game) as the core consumes it.
///
/// Owned and mutated only by the external catalog-management collaborator;
/// the core treats every field as read-only input. Absent optional fields
/// mean "no override", never zero.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RentalItem {
    /// Business identifier assigned by the catalog.
    pub id: String,

    /// Display title shown in the storefront.
    pub title: String,

    /// Base price when no per-tier price is set. By convention this is
    /// the 7-day price (see `pricing`).
    pub default_price: Money,

    /// Per-tier base price overrides.
    #[serde(default)]
    pub price_primary: Option<Money>,
    #[serde(default)]
    pub price_secondary: Option<Money>,

    /// Per-tier custom duration tables. `Inherit` falls through to the
    /// global table.
    #[serde(default)]
    #[ts(as = "Option<DurationPriceTable>")]
    pub custom_primary: PriceOverride,
    #[serde(default)]
    #[ts(as = "Option<DurationPriceTable>")]
    pub custom_secondary: PriceOverride,

    /// Whether the item offers the alternate PS5 stock pools.
    #[serde(default)]
    pub ps5_compatible: bool,

    /// PS4 stock pools, one per tier.
    pub stock_primary: i64,
    pub stock_secondary: i64,

    /// PS5 stock pools; only meaningful when `ps5_compatible`.
    #[serde(default)]
    pub stock_primary_ps5: i64,
    #[serde(default)]
    pub stock_secondary_ps5: i64,

    /// Low-stock alert thresholds, one per tier.
    #[serde(default)]
    pub min_stock_primary: i64,
    #[serde(default)]
    pub min_stock_secondary: i64,
}

impl RentalItem {
    /// The base price for a tier: the per-tier price if set, else the
    /// item default.
    pub fn base_price(&self, tier: AccountTier) -> Money {
        match tier {
            AccountTier::Primary => self.price_primary.unwrap_or(self.default_price),
            AccountTier::Secondary => self.price_secondary.unwrap_or(self.default_price),
        }
    }

    /// The custom pricing state for a tier.
    pub fn price_override(&self, tier: AccountTier) -> &PriceOverride {
        match tier {
            AccountTier::Primary => &self.custom_primary,
            AccountTier::Secondary => &self.custom_secondary,
        }
    }

    /// The stock count for a tier on the selected console.
    ///
    /// PS5 pools apply only when the item is flagged compatible; a PS5
    /// selection on a non-compatible item reads the PS4 pools, matching
    /// how the storefront restricts the console picker.
    pub fn stock(&self, tier: AccountTier, console: Console) -> i64 {
        let alternate = console == Console::Ps5 && self.ps5_compatible;
        match (tier, alternate) {
            (AccountTier::Primary, false) => self.stock_primary,
            (AccountTier::Secondary, false) => self.stock_secondary,
            (AccountTier::Primary, true) => self.stock_primary_ps5,
            (AccountTier::Secondary, true) => self.stock_secondary_ps5,
        }
    }

    /// The low-stock alert threshold for a tier.
    pub fn min_stock(&self, tier: AccountTier) -> i64 {
        match tier {
            AccountTier::Primary => self.min_stock_primary,
            AccountTier::Secondary => self.min_stock_secondary,
        }
    }
}

// =============================================================================
// Site Configuration
// =============================================================================

/// Global configuration supplied by the external config collaborator.
///
/// The core assumes well-typed input (the collaborator validates shape
/// before invoking) and guards only the failure conditions the payload
/// builder and price resolver define.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SiteConfig {
    /// Store display name; folded/truncated into the PIX merchant name.
    pub site_name: String,

    /// Raw PIX key (e-mail, phone or random key) as configured.
    pub pix_key: String,

    /// Merchant city for the PIX `60` field.
    pub merchant_city: String,

    /// Exactly 5 characters; becomes the `62/05` reference label.
    pub reference_label: String,

    /// Storefront labels for the two tiers.
    pub stock_primary_label: String,
    pub stock_secondary_label: String,

    /// The sitewide duration→price curves.
    pub price_table: GlobalPriceTable,

    /// Free-form note shown at checkout.
    #[serde(default)]
    pub checkout_note: String,
}

// =============================================================================
// Cart & Orders
// =============================================================================

/// One storefront cart line, consumed read-only by the pricing engine.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    pub game_id: String,
    pub title: String,
    pub tier: AccountTier,
    pub days: u32,
    #[serde(default)]
    pub console: Console,
    /// Deselected lines stay in the cart but are excluded from the total.
    #[serde(default = "default_true")]
    pub selected: bool,
}

fn default_true() -> bool {
    true
}

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Approved,
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

/// A priced order line. Uses the snapshot pattern: title, duration and
/// price are frozen at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub title: String,
    pub tier: AccountTier,
    pub days: u32,
    #[serde(default)]
    pub console: Option<Console>,
    pub price: Money,
}

/// A customer order as recorded by the external order collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
