use thiserror::Error as ThisError;

///
/// CompileError
///
/// Failures of one compile invocation. All are caller-input or
/// model-inconsistency errors, reported synchronously and never retried;
/// nothing partial is published when a compile aborts.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CompileError {
    /// A select item resolved to a path-segment kind the compiler does
    /// not recognize.
    #[error("select item of kind '{kind}' is not supported")]
    UnsupportedSelectItem { kind: String },

    /// An order-by member could not be located in either the raw
    /// element or the produced row shape.
    #[error("order-by member '{member}' not found in the source element or produced row shape")]
    OrderByMemberNotFound { member: String },

    /// Internal invariant: a second selection record was inserted for a
    /// member already present. A programming defect, not a user error;
    /// the resolver always checks containment before inserting.
    #[error("selection already contains a record for member '{member}'")]
    DuplicateMember { member: String },
}
