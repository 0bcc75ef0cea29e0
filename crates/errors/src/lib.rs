//! Aggregate error type over the core subsystems, so a caller that drives
//! more than one of them (block tree, header validator, chain manager)
//! doesn't have to match on each subsystem's error type individually.

use reth_blockchain_tree_api::BlockchainTreeError;
use reth_consensus::HeaderValidationError;

/// Union of every error a caller can receive from the block tree or the
/// header validator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CoreError {
    /// A block tree or block/header store operation failed.
    #[error(transparent)]
    BlockchainTree(#[from] BlockchainTreeError),
    /// Header validation rejected a candidate against its parent. Carries
    /// every violated rule, not just the first.
    #[error("header validation failed with {} error(s)", .0.len())]
    HeaderValidation(Vec<HeaderValidationError>),
}

impl From<Vec<HeaderValidationError>> for CoreError {
    fn from(errors: Vec<HeaderValidationError>) -> Self {
        Self::HeaderValidation(errors)
    }
}

/// Convenience alias for a [`Result`] with [`CoreError`] as its error type.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blockchain_tree_error_converts_via_from() {
        let err: CoreError = BlockchainTreeError::GenesisNotInitialized.into();
        assert!(matches!(err, CoreError::BlockchainTree(_)));
    }

    #[test]
    fn header_validation_errors_convert_via_from() {
        let err: CoreError = vec![HeaderValidationError::new(
            "gas_used",
            "exceeds gas_limit",
            "<= limit",
            "over limit",
        )]
        .into();
        assert!(matches!(err, CoreError::HeaderValidation(errs) if errs.len() == 1));
    }
}
