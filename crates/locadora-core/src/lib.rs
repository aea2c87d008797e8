//! # locadora-core: Pure Business Logic for Locadora Games
//!
//! This crate is the **heart** of the Locadora Games storefront. It contains
//! all business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Locadora Games Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Storefront / Admin (TypeScript)                 │   │
//! │  │   Catalog ──► Game Detail ──► Cart ──► PIX Checkout             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON (ts-rs generated types)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ locadora-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    pix    │  │  pricing  │  │   stock   │  │   │
//! │  │   │ RentalItem│  │ CRC16+TLV │  │  resolver │  │  resolver │  │   │
//! │  │   │ SiteConfig│  │  payload  │  │ 7d anchor │  │auto-switch│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         External collaborators (out of this workspace)          │   │
//! │  │   routing • rendering • session/identity • persistence          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (RentalItem, SiteConfig, cart/orders)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Construction-time invariants and name folding
//! - [`pix`] - BR Code codec: CRC-16, TLV encoder, payload builder
//! - [`pricing`] - Layered price resolution (custom → anchored global)
//! - [`stock`] - Availability snapshots and the tier auto-switch
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in centavos (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use locadora_core::money::Money;
//! use locadora_core::pix::MerchantPaymentInfo;
//!
//! let info = MerchantPaymentInfo::new(
//!     "user@example.com",
//!     "Tróia Games",
//!     "BRASIL",
//!     Money::from_reais(45),
//!     "TROIA",
//! ).unwrap();
//!
//! // The exact string a banking app scans; ends in its own CRC-16
//! let payload = info.build_payload().unwrap();
//! assert!(payload.starts_with("000201"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pix;
pub mod pricing;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use locadora_core::Money` instead of
// `use locadora_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The duration tables' canonical reference day.
///
/// ## Why a constant?
/// An item's base price represents its 7-day price by convention; the
/// global curve is applied as deltas against this entry. Every resolver
/// and admin editor must agree on the same anchor.
pub const REFERENCE_PRICE_DAY: u32 = 7;

/// Maximum merchant name length in a PIX payload.
///
/// ## Business Reason
/// The EMV merchant name field (`59`) caps at 25 characters; longer store
/// names are truncated before folding (see `validation::fold_display_name`).
pub const MAX_MERCHANT_NAME_CHARS: usize = 25;

/// Exact length of the checkout reference label (PIX field `62/05`).
pub const REFERENCE_LABEL_CHARS: usize = 5;

// =============================================================================
// End-to-End Tests
// =============================================================================
