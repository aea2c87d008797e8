//! # PIX Payload Module
//!
//! Builds the static PIX "copia e cola" payment string (BR Code).
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    BR Code (EMV-style TLV)                              │
//! │                                                                         │
//! │  Each field:  id (2 digits) + length (2 digits) + value                │
//! │                                                                         │
//! │  00  payload format indicator         "01"                             │
//! │  26  merchant account info  ┌── 00  network id  "br.gov.bcb.pix"      │
//! │      (nested)               └── 01  PIX key                            │
//! │  52  merchant category code           "0000" (uncategorized)           │
//! │  53  transaction currency             "986"  (BRL)                     │
//! │  54  transaction amount               "45.00" (omitted when zero)      │
//! │  58  country code                     "BR"                             │
//! │  59  merchant name                    ≤25 chars, folded ASCII          │
//! │  60  merchant city                                                     │
//! │  62  additional data        ┌── 05  reference label (5 chars)          │
//! │      (nested)               └──                                        │
//! │  63  CRC-16/CCITT-FALSE               always last, 4 hex digits        │
//! │                                                                         │
//! │  The checksum covers every byte before it, INCLUDING its own           │
//! │  "6304" id+length prefix — field order must never change.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
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
//! let payload = info.build_payload().unwrap();
//! assert!(payload.starts_with("000201"));
//! assert_eq!(payload.len(), payload.trim().len()); // single line, no spaces
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::SiteConfig;
use crate::validation::{fold_display_name, validate_price, validate_reference_label};

// =============================================================================
// Wire Constants
// =============================================================================

/// Reverse-domain identifier of the PIX network (field 26/00).
pub const PIX_NETWORK_ID: &str = "br.gov.bcb.pix";

/// Field 00: payload format indicator, fixed literal.
const PAYLOAD_FORMAT: &str = "000201";
/// Field 52: merchant category code, "0000" = uncategorized.
const MERCHANT_CATEGORY: &str = "52040000";
/// Field 53: transaction currency, ISO 4217 numeric 986 = BRL.
const CURRENCY_BRL: &str = "5303986";
/// Field 58: country code.
const COUNTRY_BR: &str = "5802BR";
/// Field 63 id+length prefix; the 4 hex CRC digits follow it.
const CRC_PREFIX: &str = "6304";

const ID_MERCHANT_ACCOUNT: &str = "26";
const ID_NETWORK: &str = "00";
const ID_KEY: &str = "01";
const ID_AMOUNT: &str = "54";
const ID_MERCHANT_NAME: &str = "59";
const ID_MERCHANT_CITY: &str = "60";
const ID_ADDITIONAL_DATA: &str = "62";
const ID_REFERENCE_LABEL: &str = "05";

// =============================================================================
// Checksum Engine
// =============================================================================

/// CRC-16/CCITT-FALSE over the payload characters.
///
/// Polynomial `0x1021`, initial value `0xFFFF`, no reflection, rendered as
/// 4 uppercase hex digits. Banking apps recompute this over the received
/// payload; a single flipped character fails the scan.
///
/// ## Example
/// ```rust
/// use locadora_core::pix::crc16_ccitt;
///
/// // Standard check value for this CRC variant
/// assert_eq!(crc16_ccitt("123456789"), "29B1");
/// ```
pub fn crc16_ccitt(data: &str) -> String {
    let mut crc: u16 = 0xFFFF;
    for ch in data.chars() {
        crc ^= (ch as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    format!("{crc:04X}")
}

// =============================================================================
// TLV Field Encoder
// =============================================================================

/// Encodes one `id`/`value` pair as `id` + 2-digit length + `value`.
///
/// Nested fields are built bottom-up: encode the inner fields first and
/// pass their concatenation as the outer `value`.
///
/// ## Errors
/// Values longer than 99 characters cannot be represented by the 2-digit
/// length prefix and are rejected, never truncated.
///
/// ## Example
/// ```rust
/// use locadora_core::pix::encode_field;
///
/// assert_eq!(encode_field("59", "TROIA GAMES").unwrap(), "5911TROIA GAMES");
/// assert_eq!(encode_field("05", "").unwrap(), "0500");
/// ```
pub fn encode_field(id: &str, value: &str) -> CoreResult<String> {
    let len = value.chars().count();
    if len > 99 {
        return Err(CoreError::FieldValueTooLong {
            id: id.to_string(),
            len,
        });
    }
    Ok(format!("{id}{len:02}{value}"))
}

/// Splits a TLV sequence back into `(id, value)` pairs.
///
/// Top-level only; nested values come back as their raw encoded string.
/// Used by tests and by the admin payload preview to verify that a built
/// payload round-trips.
pub fn decode_fields(payload: &str) -> CoreResult<Vec<(String, String)>> {
    let chars: Vec<char> = payload.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if pos + 4 > chars.len() {
            return Err(ValidationError::InvalidFormat {
                field: "payload".to_string(),
                reason: format!("truncated field header at offset {pos}"),
            }
            .into());
        }
        let id: String = chars[pos..pos + 2].iter().collect();
        let len_digits: String = chars[pos + 2..pos + 4].iter().collect();
        let len: usize = len_digits.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "payload".to_string(),
            reason: format!("non-numeric length {len_digits:?} at offset {pos}"),
        })?;
        if pos + 4 + len > chars.len() {
            return Err(ValidationError::InvalidFormat {
                field: "payload".to_string(),
                reason: format!("field {id} claims {len} characters past the end"),
            }
            .into());
        }
        let value: String = chars[pos + 4..pos + 4 + len].iter().collect();
        fields.push((id, value));
        pos += 4 + len;
    }

    Ok(fields)
}

// =============================================================================
// Payment Payload Builder
// =============================================================================

/// Everything the payload builder needs for one checkout total.
///
/// Constructed fresh per checkout; immutable once built. Construction
/// folds the display name and validates the label and amount, so
/// [`build_payload`](Self::build_payload) can only fail on a missing key.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MerchantPaymentInfo {
    /// Raw configured key; trimmed at build time.
    pub pix_key: String,
    /// Already folded: ≤25 chars, ASCII, uppercase.
    pub display_name: String,
    pub merchant_city: String,
    pub amount: Money,
    /// Exactly 5 characters (field 62/05).
    pub reference_label: String,
}

impl MerchantPaymentInfo {
    /// Builds payment info from raw configuration values.
    ///
    /// The display name is folded here ([`fold_display_name`]); the
    /// reference label and amount sign are validated here. The PIX key is
    /// deliberately NOT validated here — an empty key is a build-time
    /// configuration error ([`CoreError::MissingPixKey`]), reported when
    /// the payload is actually requested.
    pub fn new(
        pix_key: &str,
        store_name: &str,
        merchant_city: &str,
        amount: Money,
        reference_label: &str,
    ) -> Result<Self, ValidationError> {
        validate_reference_label(reference_label)?;
        validate_price(amount)?;

        Ok(MerchantPaymentInfo {
            pix_key: pix_key.to_string(),
            display_name: fold_display_name(store_name),
            merchant_city: merchant_city.to_string(),
            amount,
            reference_label: reference_label.to_string(),
        })
    }

    /// Builds payment info for a checkout total straight from the site
    /// configuration — the storefront's one-liner at checkout time.
    pub fn from_config(config: &SiteConfig, total: Money) -> Result<Self, ValidationError> {
        MerchantPaymentInfo::new(
            &config.pix_key,
            &config.site_name,
            &config.merchant_city,
            total,
            &config.reference_label,
        )
    }

    /// Assembles the complete wire payload.
    ///
    /// Field order is fixed (see the module docs) and must not change:
    /// the trailing checksum covers the exact character sequence.
    ///
    /// When the amount is zero the `54` field is omitted entirely and the
    /// scanning app prompts the payer for a value.
    ///
    /// ## Errors
    /// [`CoreError::MissingPixKey`] when the trimmed key is empty. The
    /// caller must not display a payload after this failure.
    pub fn build_payload(&self) -> CoreResult<String> {
        let key = self.pix_key.trim();
        if key.is_empty() {
            return Err(CoreError::MissingPixKey);
        }

        let merchant_account = format!(
            "{}{}",
            encode_field(ID_NETWORK, PIX_NETWORK_ID)?,
            encode_field(ID_KEY, key)?
        );

        let mut payload = String::from(PAYLOAD_FORMAT);
        payload.push_str(&encode_field(ID_MERCHANT_ACCOUNT, &merchant_account)?);
        payload.push_str(MERCHANT_CATEGORY);
        payload.push_str(CURRENCY_BRL);
        if !self.amount.is_zero() {
            payload.push_str(&encode_field(ID_AMOUNT, &self.amount.pix_amount())?);
        }
        payload.push_str(COUNTRY_BR);
        payload.push_str(&encode_field(ID_MERCHANT_NAME, &self.display_name)?);
        payload.push_str(&encode_field(ID_MERCHANT_CITY, &self.merchant_city)?);
        let additional = encode_field(ID_REFERENCE_LABEL, &self.reference_label)?;
        payload.push_str(&encode_field(ID_ADDITIONAL_DATA, &additional)?);
        payload.push_str(CRC_PREFIX);

        let crc = crc16_ccitt(&payload);
        payload.push_str(&crc);
        Ok(payload)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
