//! Denomination-aware amount parsing.
//!
//! Ledger events carry amounts as a single string with the denomination glued
//! to the number, e.g. `"1500000uzig"`. [`AmountNormalizer`] splits such a
//! string into a number and a denomination and rescales base units (such as
//! `uzig`) into their display unit (`ZIG`).
//!
//! Normalization is lossy and one-way: once `1500000uzig` has become `1.5 ZIG`,
//! re-encoding the value with the base denomination (`"1.5uzig"`) describes a
//! different amount. Callers that need the exact on-chain value must keep the
//! raw string.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Base denomination of the native token.
pub const NATIVE_BASE_DENOM: &str = "uzig";

/// Display symbol of the native token.
pub const NATIVE_DISPLAY_DENOM: &str = "ZIG";

/// Decimal places between [`NATIVE_BASE_DENOM`] and [`NATIVE_DISPLAY_DENOM`].
pub const NATIVE_EXPONENT: u32 = 6;

/// Maps a base unit onto its display unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenomUnit {
    /// Denomination as it appears on chain (e.g. `uzig`).
    pub base: String,
    /// Denomination shown to users (e.g. `ZIG`).
    pub display: String,
    /// Number of decimal places separating the two.
    pub exponent: u32,
}

impl DenomUnit {
    pub fn native() -> Self {
        Self {
            base: NATIVE_BASE_DENOM.to_string(),
            display: NATIVE_DISPLAY_DENOM.to_string(),
            exponent: NATIVE_EXPONENT,
        }
    }

    /// `None` when the exponent is too large to apply.
    fn scale(&self, value: f64) -> Option<f64> {
        i32::try_from(self.exponent).ok().map(|exponent| value / 10f64.powi(exponent))
    }
}

/// The numeric half of a [`NormalizedAmount`].
///
/// Strings that do not look like `<number><denom>` are kept verbatim in
/// [`AmountValue::Raw`] so they can still be shown as opaque text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountValue {
    Number(f64),
    Raw(String),
}

impl AmountValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Raw(_) => None,
        }
    }
}

impl Display for AmountValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Raw(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedAmount {
    pub value: AmountValue,
    pub denom: String,
}

impl NormalizedAmount {
    fn passthrough(raw: &str) -> Self {
        Self {
            value: AmountValue::Raw(raw.to_string()),
            denom: String::new(),
        }
    }
}

impl Display for NormalizedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_empty() {
            f.write_str(self.value.to_string().trim_end())
        } else {
            write!(f, "{} {}", self.value, self.denom)
        }
    }
}

/// Parses `<number><denom>` strings and rescales known base units.
#[derive(Debug, Clone)]
pub struct AmountNormalizer {
    units: Vec<DenomUnit>,
}

impl Default for AmountNormalizer {
    fn default() -> Self {
        Self {
            units: vec![DenomUnit::native()],
        }
    }
}

impl AmountNormalizer {
    pub fn new(units: Vec<DenomUnit>) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &[DenomUnit] {
        &self.units
    }

    /// Normalizes a raw amount string. Never fails: input that does not match
    /// `^[0-9]+(\.[0-9]+)?[A-Za-z]+$` comes back as a raw value with an empty
    /// denomination.
    pub fn normalize(&self, raw: &str) -> NormalizedAmount {
        let Some((number, denom)) = split_amount(raw) else {
            return NormalizedAmount::passthrough(raw);
        };
        let Ok(value) = number.parse::<f64>() else {
            return NormalizedAmount::passthrough(raw);
        };

        let scaled = self
            .units
            .iter()
            .find(|unit| unit.base == denom)
            .and_then(|unit| unit.scale(value).map(|scaled| (scaled, unit)));

        match scaled {
            Some((scaled, unit)) => NormalizedAmount {
                value: AmountValue::Number(scaled),
                denom: unit.display.clone(),
            },
            None => NormalizedAmount {
                value: AmountValue::Number(value),
                denom: denom.to_string(),
            },
        }
    }

    /// Normalizes an amount that arrives already split, as bank balances do.
    pub fn normalize_coin(&self, amount: &str, denom: &str) -> NormalizedAmount {
        self.normalize(&format!("{}{}", amount, denom))
    }
}

/// Normalizes with the default table (`uzig` -> `ZIG`).
pub fn normalize(raw: &str) -> NormalizedAmount {
    AmountNormalizer::default().normalize(raw)
}

/// Splits `raw` into its decimal literal and alphabetic suffix.
fn split_amount(raw: &str) -> Option<(&str, &str)> {
    let split_at = raw.find(|c: char| !c.is_ascii_digit() && c != '.')?;
    let (number, denom) = raw.split_at(split_at);

    if denom.is_empty() || !denom.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let (whole, fraction) = match number.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (number, None),
    };
    let is_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !is_digits(whole) || fraction.is_some_and(|f| !is_digits(f)) {
        return None;
    }

    Some((number, denom))
}
