//! Cross-session meta-progression: the durable record, the ledger that
//! mutates it, and the persistence store behind it.

pub mod ledger;
pub mod persistence;
pub mod types;

pub use ledger::{MetaLedger, ProgressEvent};
pub use persistence::{FileStore, MemoryStore, ProgressStore};
pub use types::{MetaProgressionRecord, UnlockRules, UpgradeKind};
