use thiserror::Error;

/// Non-fatal "nothing eligible was found" outcomes (spec.md §4.6 describes
/// several operators as aborting silently); kept as an error type in the
/// teacher's style so callers who care can observe it via the `Result`-
/// returning variants instead of it being swallowed unconditionally.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationError {
    #[error("no enabled connection available to split")]
    NoSplittableConnection,
    #[error("no removable hidden node present in the network")]
    NoRemovableHiddenNode,
    #[error("no uninstantiated catalogue entry available to add")]
    NoInterfaceNodeAvailable,
    #[error("no duplication-eligible module instance present")]
    NoDuplicableModule,
    #[error("no module instance below its maximum tier")]
    NoUpgradableModule,
    #[error("no connected hidden-node cluster available to modularize")]
    NoModularizableCluster,
}

pub type MutationResult<T> = Result<T, MutationError>;
