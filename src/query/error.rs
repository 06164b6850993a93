use thiserror::Error;

pub type QueryResult<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Breakpoint \"{breakpoint}\" not found")]
    BreakpointNotFound { breakpoint: String },
    #[error("Container query must have at least one condition")]
    EmptyContainerCondition,
}
