//! Decoding of raw ledger data into display records.
//!
//! Both halves are pure and never fail: malformed input degrades to sentinel
//! values instead of errors, so views always have something to render.
//!
//! - [`amount`] turns `"1500000uzig"` into `1.5 ZIG`
//! - [`transfer`] picks the primary `transfer` event of a transaction and
//!   pulls sender, receiver and amount out of its attributes

pub mod amount;
pub mod transfer;

pub use amount::{AmountNormalizer, AmountValue, DenomUnit, NormalizedAmount, normalize};
pub use transfer::{
    EventAttribute, LedgerEvent, NOT_AVAILABLE, TransferRecord, TransferSelection, TransferSelector,
    extract_transfer, extract_transfer_with,
};
