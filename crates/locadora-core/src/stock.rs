//! # Stock Module
//!
//! Availability resolution over the per-console stock pools.
//!
//! All state here is derived: the storefront recomputes a fresh
//! [`StockSnapshot`] on every input change (item, console, tier) instead
//! of holding mutable availability state. Depletion is a normal terminal
//! state, not an error — callers block checkout on `is_out_of_stock`,
//! they never retry.

use serde::Serialize;
use ts_rs::TS;

use crate::types::{AccountTier, Console, RentalItem};

// =============================================================================
// Stock Snapshot
// =============================================================================

/// The availability picture for one item on one console selection.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                      StockSnapshot states                               │
/// │                                                                         │
/// │  count per tier:   0 ──────── min_stock ──────────► plenty             │
/// │                    │               │                                    │
/// │                 depleted        low (alert)         normal             │
/// │                                                                         │
/// │  is_out_of_stock = both tiers depleted (blocks checkout)               │
/// │  is_low_stock    = any tier low while something is still rentable      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct StockSnapshot {
    pub primary_count: i64,
    pub secondary_count: i64,
    pub is_primary_low: bool,
    pub is_secondary_low: bool,
    pub is_out_of_stock: bool,
}

impl StockSnapshot {
    /// The count for one tier.
    #[inline]
    pub fn count(&self, tier: AccountTier) -> i64 {
        match tier {
            AccountTier::Primary => self.primary_count,
            AccountTier::Secondary => self.secondary_count,
        }
    }

    /// Low-stock alert for the catalog card: some tier is running low
    /// but the item is still rentable.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        !self.is_out_of_stock && (self.is_primary_low || self.is_secondary_low)
    }
}

// =============================================================================
// Stock Resolution
// =============================================================================

/// Resolves the availability snapshot for a console selection.
///
/// A PS5 selection on a compatible item reads the PS5 pools; everything
/// else reads the PS4 pools. A tier is "low" when its count is positive
/// but at or under the item's alert threshold; a depleted tier is not
/// low, it is simply gone.
pub fn resolve_stock(item: &RentalItem, console: Console) -> StockSnapshot {
    let primary_count = item.stock(AccountTier::Primary, console);
    let secondary_count = item.stock(AccountTier::Secondary, console);

    StockSnapshot {
        primary_count,
        secondary_count,
        is_primary_low: primary_count > 0 && primary_count <= item.min_stock(AccountTier::Primary),
        is_secondary_low: secondary_count > 0
            && secondary_count <= item.min_stock(AccountTier::Secondary),
        is_out_of_stock: primary_count <= 0 && secondary_count <= 0,
    }
}

/// Applies the tier auto-switch convenience default.
///
/// A `Primary` selection whose pool is depleted flips to `Secondary`
/// when that pool still has stock. The flip is one-directional per
/// recomputation and is only a default: a caller that explicitly
/// re-selects `Primary` afterwards is honored on the next input change,
/// understocked or not — checkout blocking is `is_out_of_stock`'s job,
/// not this function's.
pub fn effective_tier(selected: AccountTier, snapshot: &StockSnapshot) -> AccountTier {
    if selected == AccountTier::Primary
        && snapshot.primary_count <= 0
        && snapshot.secondary_count > 0
    {
        return AccountTier::Secondary;
    }
    selected
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::PriceOverride;

    fn item() -> RentalItem {
        RentalItem {
            id: "1".to_string(),
            title: "Elden Ring".to_string(),
            default_price: Money::from_reais(45),
            price_primary: None,
            price_secondary: None,
            custom_primary: PriceOverride::Inherit,
            custom_secondary: PriceOverride::Inherit,
            ps5_compatible: true,
            stock_primary: 5,
            stock_secondary: 10,
            stock_primary_ps5: 1,
            stock_secondary_ps5: 0,
            min_stock_primary: 2,
            min_stock_secondary: 3,
        }
    }

    #[test]
    fn test_console_selects_pool_pair() {
        let game = item();

        let ps4 = resolve_stock(&game, Console::Ps4);
        assert_eq!(ps4.primary_count, 5);
        assert_eq!(ps4.secondary_count, 10);

        let ps5 = resolve_stock(&game, Console::Ps5);
        assert_eq!(ps5.primary_count, 1);
        assert_eq!(ps5.secondary_count, 0);
    }

    #[test]
    fn test_incompatible_item_ignores_ps5_selection() {
        let mut game = item();
        game.ps5_compatible = false;

        let snapshot = resolve_stock(&game, Console::Ps5);
        assert_eq!(snapshot.primary_count, 5);
        assert_eq!(snapshot.secondary_count, 10);
    }

    #[test]
    fn test_low_stock_thresholds() {
        let mut game = item();
        game.stock_primary = 2; // at threshold
        game.stock_secondary = 4; // above threshold

        let snapshot = resolve_stock(&game, Console::Ps4);
        assert!(snapshot.is_primary_low);
        assert!(!snapshot.is_secondary_low);
        assert!(snapshot.is_low_stock());
        assert!(!snapshot.is_out_of_stock);
    }

    #[test]
    fn test_depleted_tier_is_not_low() {
        let mut game = item();
        game.stock_primary = 0;

        let snapshot = resolve_stock(&game, Console::Ps4);
        assert!(!snapshot.is_primary_low);
        assert!(!snapshot.is_out_of_stock); // secondary still has stock
    }

    #[test]
    fn test_out_of_stock_needs_both_tiers_empty() {
        let mut game = item();
        game.stock_primary = 0;
        game.stock_secondary = 0;

        let snapshot = resolve_stock(&game, Console::Ps4);
        assert!(snapshot.is_out_of_stock);
        assert!(!snapshot.is_low_stock());

        // Regardless of tier, nothing is rentable
        assert_eq!(snapshot.count(AccountTier::Primary), 0);
        assert_eq!(snapshot.count(AccountTier::Secondary), 0);
    }

    #[test]
    fn test_auto_switch_to_secondary() {
        let mut game = item();
        game.stock_primary = 0;
        game.stock_secondary = 3;

        let snapshot = resolve_stock(&game, Console::Ps4);
        assert_eq!(
            effective_tier(AccountTier::Primary, &snapshot),
            AccountTier::Secondary
        );
        assert!(!snapshot.is_out_of_stock);
    }

    #[test]
    fn test_no_switch_when_primary_available() {
        let snapshot = resolve_stock(&item(), Console::Ps4);
        assert_eq!(
            effective_tier(AccountTier::Primary, &snapshot),
            AccountTier::Primary
        );
    }

    #[test]
    fn test_no_switch_when_both_depleted() {
        let mut game = item();
        game.stock_primary = 0;
        game.stock_secondary = 0;

        let snapshot = resolve_stock(&game, Console::Ps4);
        // Nothing to switch to; the selection stands and checkout is blocked
        assert_eq!(
            effective_tier(AccountTier::Primary, &snapshot),
            AccountTier::Primary
        );
    }

    #[test]
    fn test_secondary_selection_never_switches() {
        let mut game = item();
        game.stock_secondary = 0;

        let snapshot = resolve_stock(&game, Console::Ps4);
        // One-directional: Secondary → Primary is never automatic
        assert_eq!(
            effective_tier(AccountTier::Secondary, &snapshot),
            AccountTier::Secondary
        );
    }

    #[test]
    fn test_switch_follows_console_pools() {
        // PS5 pools: primary 1, secondary 0 → no switch on PS5
        let snapshot = resolve_stock(&item(), Console::Ps5);
        assert_eq!(
            effective_tier(AccountTier::Primary, &snapshot),
            AccountTier::Primary
        );

        // Deplete the PS5 primary pool: switch only if secondary has stock
        let mut game = item();
        game.stock_primary_ps5 = 0;
        game.stock_secondary_ps5 = 2;
        let snapshot = resolve_stock(&game, Console::Ps5);
        assert_eq!(
            effective_tier(AccountTier::Primary, &snapshot),
            AccountTier::Secondary
        );
    }
}
