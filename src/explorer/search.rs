use std::fmt::{self, Display};

/// Bech32 human-readable part of chain addresses.
pub const DEFAULT_ADDRESS_PREFIX: &str = "zig";

/// What a free-form search query refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTarget {
    Block(u64),
    Wallet(String),
    Transaction(String),
}

impl SearchTarget {
    /// Classifies `query` using the default address prefix.
    pub fn classify(query: &str) -> Option<Self> {
        Self::classify_with_prefix(query, DEFAULT_ADDRESS_PREFIX)
    }

    /// Digits are block heights, anything starting with `prefix` (ignoring
    /// case) is a wallet and the rest is taken as a transaction hash.
    /// Blank queries classify as nothing.
    pub fn classify_with_prefix(query: &str, prefix: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        if query.chars().all(|c| c.is_ascii_digit()) {
            // Digit strings too long for a height can only be a hash.
            if let Ok(height) = query.parse() {
                return Some(Self::Block(height));
            }
        }

        if !prefix.is_empty() && starts_with_ignore_case(query, prefix) {
            return Some(Self::Wallet(query.to_string()));
        }

        Some(Self::Transaction(query.to_string()))
    }
}

impl Display for SearchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Block(height) => write!(f, "block {}", height),
            Self::Wallet(address) => write!(f, "wallet {}", address),
            Self::Transaction(hash) => write!(f, "transaction {}", hash),
        }
    }
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_queries() {
        assert_eq!(SearchTarget::classify("123"), Some(SearchTarget::Block(123)));
        assert_eq!(
            SearchTarget::classify("Zig1abc"),
            Some(SearchTarget::Wallet("Zig1abc".into()))
        );
        assert_eq!(
            SearchTarget::classify("ABCDEF"),
            Some(SearchTarget::Transaction("ABCDEF".into()))
        );
        assert_eq!(SearchTarget::classify("  "), None);
        assert_eq!(SearchTarget::classify(""), None);
    }

    #[test]
    fn trims_before_classifying() {
        assert_eq!(SearchTarget::classify("  42 \n"), Some(SearchTarget::Block(42)));
        assert_eq!(
            SearchTarget::classify(" zig1xyz "),
            Some(SearchTarget::Wallet("zig1xyz".into()))
        );
    }

    #[test]
    fn oversized_digit_strings_are_hashes() {
        let digits = "1".repeat(64);
        assert_eq!(SearchTarget::classify(&digits), Some(SearchTarget::Transaction(digits.clone())));
    }

    #[test]
    fn honours_custom_prefix() {
        assert_eq!(
            SearchTarget::classify_with_prefix("cosmos1abc", "cosmos"),
            Some(SearchTarget::Wallet("cosmos1abc".into()))
        );
        assert_eq!(
            SearchTarget::classify_with_prefix("zig1abc", "cosmos"),
            Some(SearchTarget::Transaction("zig1abc".into()))
        );
        assert_eq!(
            SearchTarget::classify_with_prefix("zig1abc", ""),
            Some(SearchTarget::Transaction("zig1abc".into()))
        );
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert_eq!(SearchTarget::classify("é"), Some(SearchTarget::Transaction("é".into())));
    }
}
