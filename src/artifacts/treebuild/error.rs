use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use thiserror::Error;

/// Failure taxonomy of the tree construction engine
///
/// Every kind is fatal for the whole invocation: a tree with even one wrong
/// entry is worthless, so nothing is locally recovered or retried and a
/// failed segment leaves no partial object behind.
#[derive(Debug, Error)]
pub enum TreeBuildError {
    /// Malformed input line, or a blank line outside batch mode
    #[error("input format error: {0}")]
    InputFormat(String),

    /// Path segment failed the validity check
    #[error("invalid path '{0}'")]
    InvalidPath(String),

    /// Path still contains a separator after normalization
    #[error("path {0} contains slash")]
    PathContainsSeparator(String),

    /// Input tuple carried a non-zero merge stage
    #[error("path '{0}' is unmerged")]
    Unmerged(String),

    /// Declared object type disagrees with the type implied by the mode
    #[error("object type ({declared}) doesn't match mode type ({implied})")]
    TypeMismatch {
        declared: ObjectType,
        implied: ObjectType,
    },

    /// Object id is absent from the store (fatal unless tolerance is enabled)
    #[error("entry '{path}' object {oid} is unavailable")]
    ObjectMissing { path: String, oid: ObjectId },

    /// The stored object exists but is of the wrong kind; fatal even when
    /// missing objects are tolerated, the entry could never be correct
    #[error("entry '{path}' object {oid} is a {actual} but specified type was ({expected})")]
    ObjectKindMismatch {
        path: String,
        oid: ObjectId,
        actual: ObjectType,
        expected: ObjectType,
    },

    /// Staging-index insertion failure: an invariant violation, not input
    #[error("failed to add tree entry '{0}'")]
    Materialization(String),
}
