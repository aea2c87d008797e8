//! # Pricing Module
//!
//! Deterministic price resolution over the layered configuration.
//!
//! ## Resolution Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   resolve_price(item, tier, days)                       │
//! │                                                                         │
//! │  1. item custom table[tier][days]        ── authoritative override     │
//! │          │ miss                                                         │
//! │          ▼                                                              │
//! │  2. base + (global[tier][days] − global[tier][7])                      │
//! │     base = per-tier price, else item default                           │
//! │     (missing 7-day anchor contributes 0)                               │
//! │          │ days not in global either                                    │
//! │          ▼                                                              │
//! │  3. PriceUnavailable ── never a nearby duration, never a guess         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The 7-Day Anchor
//! By convention an item's base price IS its 7-day price. The global table
//! is read as deltas against its own 7-day entry, so a sitewide duration
//! discount curve scales every non-customized item while each item keeps
//! its own base. A loss-leader title with a custom table bypasses the
//! curve entirely.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{AccountTier, CartItem, GlobalPriceTable, RentalItem};
use crate::REFERENCE_PRICE_DAY;

// =============================================================================
// Price Resolution
// =============================================================================

/// Resolves the price of one rental.
///
/// Pure function over immutable snapshots; identical input always yields
/// the identical price.
///
/// ## Errors
/// [`CoreError::PriceUnavailable`] when neither the item's custom table
/// nor the global table prices `days` for this tier. Silent substitution
/// of a nearby duration is explicitly not performed: the storefront must
/// surface "duration not offered" rather than charge an arbitrary amount.
///
/// ## Example
/// ```rust
/// use locadora_core::money::Money;
/// use locadora_core::pricing::resolve_price;
/// # use locadora_core::types::*;
/// # let global = GlobalPriceTable {
/// #     primary: DurationPriceTable::from_entries([
/// #         (7, Money::from_reais(45)),
/// #         (15, Money::from_reais(60)),
/// #     ]).unwrap(),
/// #     secondary: DurationPriceTable::default(),
/// # };
/// # let item = RentalItem {
/// #     id: "1".into(), title: "Elden Ring".into(),
/// #     default_price: Money::from_reais(50),
/// #     price_primary: None, price_secondary: None,
/// #     custom_primary: PriceOverride::Inherit,
/// #     custom_secondary: PriceOverride::Inherit,
/// #     ps5_compatible: false,
/// #     stock_primary: 1, stock_secondary: 1,
/// #     stock_primary_ps5: 0, stock_secondary_ps5: 0,
/// #     min_stock_primary: 0, min_stock_secondary: 0,
/// # };
/// // base 50, curve 7→45 / 15→60: the 15-day price is 50 + (60 − 45)
/// let price = resolve_price(&item, AccountTier::Primary, 15, &global).unwrap();
/// assert_eq!(price, Money::from_reais(65));
/// ```
pub fn resolve_price(
    item: &RentalItem,
    tier: AccountTier,
    days: u32,
    global: &GlobalPriceTable,
) -> CoreResult<Money> {
    // Layer 1: a custom entry wins outright, whatever the curve says
    if let Some(price) = item.price_override(tier).get(days) {
        return Ok(price);
    }

    // Layer 2: item base scaled by the global curve's delta from day 7
    let table = global.table(tier);
    if let Some(curve_price) = table.get(days) {
        let anchor = table.get(REFERENCE_PRICE_DAY).unwrap_or(Money::zero());
        return Ok(item.base_price(tier) + (curve_price - anchor));
    }

    // Layer 3: the duration is simply not offered
    Err(CoreError::PriceUnavailable {
        tier: tier.to_string(),
        days,
    })
}

/// The durations actually offered for an item and tier, ascending.
///
/// A non-empty custom table defines the complete offered set for its tier
/// (it is authoritative, not additive); otherwise the global table's keys.
pub fn available_days(
    item: &RentalItem,
    tier: AccountTier,
    global: &GlobalPriceTable,
) -> Vec<u32> {
    match item.price_override(tier).table() {
        Some(custom) => custom.days().collect(),
        None => global.table(tier).days().collect(),
    }
}

/// Snaps a duration selection onto the offered set.
///
/// Returns the selection unchanged when it is offered, the shortest
/// offered duration when it is not, and `None` when nothing is offered
/// at all. Recomputed on every tier/item change so a stale selection
/// never reaches [`resolve_price`].
pub fn snap_days(
    item: &RentalItem,
    tier: AccountTier,
    days: u32,
    global: &GlobalPriceTable,
) -> Option<u32> {
    let offered = available_days(item, tier, global);
    if offered.contains(&days) {
        Some(days)
    } else {
        offered.first().copied()
    }
}

/// The catalog-card "from R$ X" price.
///
/// The cheapest custom primary entry when one exists, else the primary
/// base price.
pub fn starting_price(item: &RentalItem) -> Money {
    item.custom_primary
        .table()
        .and_then(|t| t.min_price())
        .unwrap_or_else(|| item.base_price(AccountTier::Primary))
}

// =============================================================================
// Cart Total
// =============================================================================

/// Sums the resolved prices of the selected cart lines.
///
/// This is the amount the PIX payload carries. Deselected lines are
/// skipped; a line referencing an unknown item fails the whole total
/// rather than silently undercharging.
///
/// ## Errors
/// - [`CoreError::ItemNotFound`] for a line whose item left the catalog
/// - [`CoreError::PriceUnavailable`] propagated from [`resolve_price`]
pub fn cart_total(
    lines: &[CartItem],
    catalog: &[RentalItem],
    global: &GlobalPriceTable,
) -> CoreResult<Money> {
    let mut total = Money::zero();
    for line in lines.iter().filter(|l| l.selected) {
        let item = catalog
            .iter()
            .find(|g| g.id == line.game_id)
            .ok_or_else(|| CoreError::ItemNotFound(line.game_id.clone()))?;
        total += resolve_price(item, line.tier, line.days, global)?;
    }
    Ok(total)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DurationPriceTable, PriceOverride};

    fn global() -> GlobalPriceTable {
        GlobalPriceTable {
            primary: DurationPriceTable::from_entries([
                (3, Money::from_reais(40)),
                (7, Money::from_reais(45)),
                (15, Money::from_reais(60)),
                (30, Money::from_reais(80)),
            ])
            .unwrap(),
            secondary: DurationPriceTable::from_entries([
                (7, Money::from_reais(40)),
                (15, Money::from_reais(50)),
            ])
            .unwrap(),
        }
    }

    fn item(default_price: i64) -> RentalItem {
        RentalItem {
            id: "1".to_string(),
            title: "Elden Ring".to_string(),
            default_price: Money::from_reais(default_price),
            price_primary: None,
            price_secondary: None,
            custom_primary: PriceOverride::Inherit,
            custom_secondary: PriceOverride::Inherit,
            ps5_compatible: false,
            stock_primary: 5,
            stock_secondary: 10,
            stock_primary_ps5: 0,
            stock_secondary_ps5: 0,
            min_stock_primary: 2,
            min_stock_secondary: 3,
        }
    }

    #[test]
    fn test_custom_table_overrides_global() {
        let mut game = item(50);
        game.custom_primary = PriceOverride::Custom(
            DurationPriceTable::from_entries([(7, Money::from_reais(25))]).unwrap(),
        );

        // Global says 45 for day 7; the override wins with 25
        let price = resolve_price(&game, AccountTier::Primary, 7, &global()).unwrap();
        assert_eq!(price, Money::from_reais(25));
    }

    #[test]
    fn test_partial_custom_table_falls_through() {
        let mut game = item(50);
        game.custom_primary = PriceOverride::Custom(
            DurationPriceTable::from_entries([(3, Money::from_reais(20))]).unwrap(),
        );

        // Day 15 is not in the custom table: global delta path applies
        let price = resolve_price(&game, AccountTier::Primary, 15, &global()).unwrap();
        assert_eq!(price, Money::from_reais(50 + (60 - 45)));
    }

    #[test]
    fn test_delta_anchoring() {
        // base 50, global {7: 45, 15: 60} → 15 days costs 50 + (60 − 45)
        let price = resolve_price(&item(50), AccountTier::Primary, 15, &global()).unwrap();
        assert_eq!(price, Money::from_reais(65));

        // At the anchor itself the delta is zero: base price unchanged
        let price = resolve_price(&item(50), AccountTier::Primary, 7, &global()).unwrap();
        assert_eq!(price, Money::from_reais(50));

        // Below the anchor the delta is negative
        let price = resolve_price(&item(50), AccountTier::Primary, 3, &global()).unwrap();
        assert_eq!(price, Money::from_reais(45));
    }

    #[test]
    fn test_per_tier_base_price() {
        let mut game = item(50);
        game.price_secondary = Some(Money::from_reais(35));

        let price = resolve_price(&game, AccountTier::Secondary, 15, &global()).unwrap();
        assert_eq!(price, Money::from_reais(35 + (50 - 40)));
    }

    #[test]
    fn test_missing_anchor_contributes_zero() {
        let no_anchor = GlobalPriceTable {
            primary: DurationPriceTable::from_entries([(15, Money::from_reais(60))]).unwrap(),
            secondary: DurationPriceTable::default(),
        };
        let price = resolve_price(&item(50), AccountTier::Primary, 15, &no_anchor).unwrap();
        assert_eq!(price, Money::from_reais(50 + 60));
    }

    #[test]
    fn test_unoffered_duration_is_an_error() {
        let err = resolve_price(&item(50), AccountTier::Primary, 11, &global());
        assert!(matches!(
            err,
            Err(CoreError::PriceUnavailable { days: 11, .. })
        ));
    }

    #[test]
    fn test_available_days_custom_is_authoritative() {
        let mut game = item(50);
        assert_eq!(
            available_days(&game, AccountTier::Primary, &global()),
            vec![3, 7, 15, 30]
        );

        game.custom_primary = PriceOverride::Custom(
            DurationPriceTable::from_entries([
                (10, Money::from_reais(30)),
                (5, Money::from_reais(20)),
            ])
            .unwrap(),
        );
        assert_eq!(
            available_days(&game, AccountTier::Primary, &global()),
            vec![5, 10]
        );
        // Other tier unaffected
        assert_eq!(
            available_days(&game, AccountTier::Secondary, &global()),
            vec![7, 15]
        );
    }

    #[test]
    fn test_snap_days() {
        let mut game = item(50);
        assert_eq!(snap_days(&game, AccountTier::Primary, 7, &global()), Some(7));
        assert_eq!(snap_days(&game, AccountTier::Primary, 11, &global()), Some(3));

        game.custom_primary = PriceOverride::Custom(
            DurationPriceTable::from_entries([(10, Money::from_reais(30))]).unwrap(),
        );
        assert_eq!(snap_days(&game, AccountTier::Primary, 7, &global()), Some(10));

        let empty = GlobalPriceTable::default();
        assert_eq!(snap_days(&item(50), AccountTier::Primary, 7, &empty), None);
    }

    #[test]
    fn test_starting_price() {
        let mut game = item(50);
        assert_eq!(starting_price(&game), Money::from_reais(50));

        game.price_primary = Some(Money::from_reais(42));
        assert_eq!(starting_price(&game), Money::from_reais(42));

        game.custom_primary = PriceOverride::Custom(
            DurationPriceTable::from_entries([
                (3, Money::from_reais(30)),
                (7, Money::from_reais(25)),
            ])
            .unwrap(),
        );
        assert_eq!(starting_price(&game), Money::from_reais(25));
    }

    #[test]
    fn test_cart_total_sums_selected_lines() {
        let catalog = vec![item(50)];
        let lines = vec![
            CartItem {
                game_id: "1".to_string(),
                title: "Elden Ring".to_string(),
                tier: AccountTier::Primary,
                days: 7,
                console: Default::default(),
                selected: true,
            },
            CartItem {
                game_id: "1".to_string(),
                title: "Elden Ring".to_string(),
                tier: AccountTier::Secondary,
                days: 15,
                console: Default::default(),
                selected: true,
            },
            // Deselected: excluded from the total
            CartItem {
                game_id: "1".to_string(),
                title: "Elden Ring".to_string(),
                tier: AccountTier::Primary,
                days: 30,
                console: Default::default(),
                selected: false,
            },
        ];

        let total = cart_total(&lines, &catalog, &global()).unwrap();
        // 50 + (50 + (50 − 40)) = 110
        assert_eq!(total, Money::from_reais(110));
    }

    #[test]
    fn test_cart_total_unknown_item() {
        let lines = vec![CartItem {
            game_id: "ghost".to_string(),
            title: "Gone".to_string(),
            tier: AccountTier::Primary,
            days: 7,
            console: Default::default(),
            selected: true,
        }];
        let err = cart_total(&lines, &[], &global());
        assert!(matches!(err, Err(CoreError::ItemNotFound(id)) if id == "ghost"));
    }
}
