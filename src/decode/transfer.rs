//! Extraction of the primary value transfer from a transaction's events.
//!
//! A Cosmos-SDK transaction usually emits several `transfer` events. On
//! ZIGChain the first one moves the fee to the fee collector and the second
//! one is the payment the user asked for, so [`TransferSelection::SecondIfPresent`]
//! is the default. The choice is a policy: other chains can plug in a
//! different [`TransferSelector`].

use serde::{Deserialize, Serialize};

use super::amount::{AmountNormalizer, NormalizedAmount};

pub const TRANSFER_EVENT_TYPE: &str = "transfer";

/// Shown in place of a sender or receiver the event did not carry.
pub const NOT_AVAILABLE: &str = "N/A";

const SENDER_KEY: &str = "sender";
const RECIPIENT_KEY: &str = "recipient";
const AMOUNT_KEY: &str = "amount";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventAttribute {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<bool>,
}

impl EventAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            index: None,
        }
    }
}

/// An event emitted while executing a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Vec<EventAttribute>,
}

impl LedgerEvent {
    pub fn new(kind: impl Into<String>, attributes: Vec<EventAttribute>) -> Self {
        Self {
            kind: kind.into(),
            attributes,
        }
    }

    pub fn is_transfer(&self) -> bool {
        self.kind == TRANSFER_EVENT_TYPE
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub sender: String,
    pub receiver: String,
    pub amount: Option<NormalizedAmount>,
}

impl TransferRecord {
    /// Amount as rendered in tables, `N/A` when the event had none.
    pub fn amount_display(&self) -> String {
        self.amount
            .as_ref()
            .map(|a| a.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn has_sender(&self) -> bool {
        self.sender != NOT_AVAILABLE
    }

    pub fn has_receiver(&self) -> bool {
        self.receiver != NOT_AVAILABLE
    }
}

/// Picks the authoritative event out of a transaction's `transfer` events.
///
/// `transfers` holds only `transfer` events, in emission order.
pub trait TransferSelector {
    fn select<'a>(&self, transfers: &[&'a LedgerEvent]) -> Option<&'a LedgerEvent>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferSelection {
    /// The second transfer when there are at least two, else the only one.
    #[default]
    SecondIfPresent,
    First,
    Last,
}

impl TransferSelector for TransferSelection {
    fn select<'a>(&self, transfers: &[&'a LedgerEvent]) -> Option<&'a LedgerEvent> {
        match self {
            Self::SecondIfPresent => transfers.get(1).or_else(|| transfers.first()).copied(),
            Self::First => transfers.first().copied(),
            Self::Last => transfers.last().copied(),
        }
    }
}

/// Extracts the primary transfer using the default policy and denom table.
pub fn extract_transfer(events: &[LedgerEvent]) -> Option<TransferRecord> {
    extract_transfer_with(events, &TransferSelection::default(), &AmountNormalizer::default())
}

/// Extracts the transfer chosen by `selector`, or `None` when the events
/// contain no `transfer` event at all.
pub fn extract_transfer_with<S>(
    events: &[LedgerEvent],
    selector: &S,
    normalizer: &AmountNormalizer,
) -> Option<TransferRecord>
where
    S: TransferSelector + ?Sized,
{
    let transfers: Vec<&LedgerEvent> = events.iter().filter(|e| e.is_transfer()).collect();
    let event = selector.select(&transfers)?;

    let mut record = TransferRecord {
        sender: NOT_AVAILABLE.to_string(),
        receiver: NOT_AVAILABLE.to_string(),
        amount: None,
    };

    for attribute in &event.attributes {
        match attribute.key.as_str() {
            SENDER_KEY => record.sender = attribute.value.clone(),
            RECIPIENT_KEY => record.receiver = attribute.value.clone(),
            AMOUNT_KEY => record.amount = Some(normalizer.normalize(&attribute.value)),
            _ => {},
        }
    }

    Some(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::amount::AmountValue;

    fn transfer(sender: &str, recipient: &str, amount: &str) -> LedgerEvent {
        LedgerEvent::new(
            TRANSFER_EVENT_TYPE,
            vec![
                EventAttribute::new("sender", sender),
                EventAttribute::new("recipient", recipient),
                EventAttribute::new("amount", amount),
            ],
        )
    }

    #[test]
    fn second_transfer_wins() {
        let events = vec![transfer("A", "B", "1000000uzig"), transfer("C", "D", "2000000uzig")];

        let record = extract_transfer(&events).expect("transfer");
        assert_eq!(record.sender, "C");
        assert_eq!(record.receiver, "D");
        let amount = record.amount.expect("amount");
        assert_eq!(amount.value, AmountValue::Number(2.0));
        assert_eq!(amount.denom, "ZIG");
    }

    #[test]
    fn single_transfer_is_used() {
        let events = vec![transfer("A", "B", "42stake")];

        let record = extract_transfer(&events).expect("transfer");
        assert_eq!(record.sender, "A");
        assert_eq!(record.receiver, "B");
        assert_eq!(record.amount_display(), "42 stake");
    }

    #[test]
    fn no_transfer_is_absent() {
        let events = vec![LedgerEvent::new("message", vec![EventAttribute::new("sender", "A")])];
        assert!(extract_transfer(&events).is_none());
        assert!(extract_transfer(&[]).is_none());
    }

    #[test]
    fn other_event_types_do_not_count_towards_selection() {
        let events = vec![
            LedgerEvent::new("coin_spent", vec![EventAttribute::new("spender", "A")]),
            transfer("fee-payer", "fee-collector", "500uzig"),
            LedgerEvent::new("message", vec![EventAttribute::new("sender", "X")]),
            transfer("alice", "bob", "3000000uzig"),
            transfer("bob", "carol", "1uzig"),
        ];

        let record = extract_transfer(&events).expect("transfer");
        assert_eq!(record.sender, "alice");
        assert_eq!(record.receiver, "bob");
        assert_eq!(record.amount_display(), "3 ZIG");
    }

    #[test]
    fn last_attribute_occurrence_wins() {
        let events = vec![LedgerEvent::new(
            TRANSFER_EVENT_TYPE,
            vec![
                EventAttribute::new("sender", "first"),
                EventAttribute::new("amount", "1uzig"),
                EventAttribute::new("sender", "second"),
                EventAttribute::new("amount", "2000000uzig"),
                EventAttribute::new("memo", "ignored"),
            ],
        )];

        let record = extract_transfer(&events).expect("transfer");
        assert_eq!(record.sender, "second");
        assert_eq!(record.amount_display(), "2 ZIG");
    }

    #[test]
    fn missing_fields_use_sentinels() {
        let events = vec![LedgerEvent::new(TRANSFER_EVENT_TYPE, vec![])];

        let record = extract_transfer(&events).expect("transfer");
        assert_eq!(record.sender, NOT_AVAILABLE);
        assert_eq!(record.receiver, NOT_AVAILABLE);
        assert!(record.amount.is_none());
        assert_eq!(record.amount_display(), NOT_AVAILABLE);
        assert!(!record.has_sender());
        assert!(!record.has_receiver());
    }

    #[test]
    fn selection_policies() {
        let events = vec![transfer("A", "B", "1uzig"), transfer("C", "D", "2uzig"), transfer("E", "F", "3uzig")];
        let normalizer = AmountNormalizer::default();

        let first = extract_transfer_with(&events, &TransferSelection::First, &normalizer).expect("first");
        assert_eq!(first.sender, "A");

        let last = extract_transfer_with(&events, &TransferSelection::Last, &normalizer).expect("last");
        assert_eq!(last.sender, "E");

        let second = extract_transfer_with(&events, &TransferSelection::SecondIfPresent, &normalizer).expect("second");
        assert_eq!(second.sender, "C");
    }

    #[test]
    fn custom_selector() {
        struct MostAttributes;

        impl TransferSelector for MostAttributes {
            fn select<'a>(&self, transfers: &[&'a LedgerEvent]) -> Option<&'a LedgerEvent> {
                transfers.iter().copied().max_by_key(|e| e.attributes.len())
            }
        }

        let mut rich = transfer("C", "D", "2uzig");
        rich.attributes.push(EventAttribute::new("msg_index", "0"));
        let events = vec![transfer("A", "B", "1uzig"), rich];

        let record = extract_transfer_with(&events, &MostAttributes, &AmountNormalizer::default())
            .expect("transfer");
        assert_eq!(record.sender, "C");
    }

    #[test]
    fn deserializes_cometbft_event_json() {
        let json = r#"{"type":"transfer","attributes":[
            {"key":"recipient","value":"zig1bob","index":true},
            {"key":"sender","value":"zig1alice","index":true},
            {"key":"amount","value":"1500000uzig","index":true}]}"#;

        let event: LedgerEvent = serde_json::from_str(json).expect("event json");
        let record = extract_transfer(&[event]).expect("transfer");
        assert_eq!(record.sender, "zig1alice");
        assert_eq!(record.receiver, "zig1bob");
        assert_eq!(record.amount_display(), "1.5 ZIG");
    }
}
