//! Transaction pool admission and ordering core (spec.md §4.9–§4.11, §6,
//! §4.11): duplicate/size/gas/nonce-gap/blob-fee admission predicates
//! (C10), the fee-market comparator and replacement/broadcast policy
//! (C11), and the type-erased pool dispatch surface (C12).
//!
//! Everything downstream of "a transaction and a config" lives here.
//! State lookups the predicates need (an account's current nonce, the
//! current blob base fee) are passed in by the caller rather than fetched
//! — world state is an external collaborator (spec.md §1).

mod admission;
mod config;
mod known;
mod options;
mod ordering;
mod pool;
mod result;
mod transaction;

pub use admission::{admit, AdmissionContext, AdmissionError};
pub use config::{BlobsSupport, TxPoolConfig};
pub use known::KnownHashCache;
pub use options::TxHandlingOptions;
pub use ordering::{
    calculate_base_fee_threshold, calculate_persistent_broadcast_quota,
    compare_fee_market_priority, compare_replaced_blob_transaction_by_fee,
    compare_replaced_transaction_by_fee, effective_priority_fee, OrderingError,
};
pub use pool::{InMemoryTxPool, TxPool};
pub use result::AcceptTxResult;
pub use transaction::{PoolTransaction, PooledTransaction};
