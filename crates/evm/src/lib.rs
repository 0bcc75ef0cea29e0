//! `BLOCKHASH`-opcode ancestor resolution (C6, spec.md §4.5): a
//! 32-entry LRU [`BlockhashCache`] feeding the legacy
//! [`BlockhashProvider`] strategy, and an EIP-2935 ring-buffer
//! [`BlockhashStore`] for the state-backed strategy, unified behind
//! [`BlockhashResolver`], which picks a strategy per block via
//! [`ReleaseSpec::is_blockhash_in_state_available`].

mod cache;
mod provider;
mod store;

pub use cache::BlockhashCache;
pub use provider::{AncestorSource, BlockhashError, BlockhashProvider, BlockhashResolver};
pub use store::{BlockhashStore, WorldState};
