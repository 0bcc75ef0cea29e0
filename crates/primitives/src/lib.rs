//! Commonly used types shared by the block tree, consensus, and
//! transaction-pool crates: the [`Header`]/[`Block`] data model and the
//! [`Transaction`] tagged union (spec.md §3).

mod block;
mod header;
mod transaction;

pub use block::{Block, BlockBody, SealedBlock};
pub use header::{Header, SealedHeader};
pub use transaction::{Transaction, TransactionError};

pub use reth_primitives_traits::{BlockHash, BlockNumber, InMemorySize, Sealed};
