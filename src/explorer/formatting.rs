//! Text helpers shared by the renderers.

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

use crate::decode::{AmountNormalizer, AmountValue, NOT_AVAILABLE, NormalizedAmount};
use crate::http::Coin;

/// Hash and address width in tables.
pub const SHORT_LEN: usize = 10;
pub const SHORT_ELLIPSIS: &str = "...";

/// Hash width in the per-address histories of the transaction page.
pub const HISTORY_LEN: usize = 20;
pub const HISTORY_ELLIPSIS: &str = "…";

/// Keeps the first `max_chars` characters of `value` and appends `ellipsis`.
/// Values that already fit are returned unchanged.
pub fn truncate(value: &str, max_chars: usize, ellipsis: &str) -> String {
    match value.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &value[..cut], ellipsis),
        None => value.to_string(),
    }
}

pub fn short(value: &str) -> String {
    truncate(value, SHORT_LEN, SHORT_ELLIPSIS)
}

pub fn format_timestamp(time: Option<&DateTime<Utc>>) -> String {
    match time {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_count(count: u64) -> String {
    count.to_formatted_string(&Locale::en)
}

/// Normalizes a bank balance. Denominations the amount grammar cannot express
/// (factory denoms such as `coin.zig1….moon`) keep their raw amount.
pub fn normalize_balance(normalizer: &AmountNormalizer, coin: &Coin) -> NormalizedAmount {
    let amount = normalizer.normalize_coin(&coin.amount, &coin.denom);
    match amount.value {
        AmountValue::Number(_) => amount,
        AmountValue::Raw(_) => NormalizedAmount {
            value: AmountValue::Raw(coin.amount.clone()),
            denom: coin.denom.clone(),
        },
    }
}
