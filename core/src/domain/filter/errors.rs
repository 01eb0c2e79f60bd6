use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid filter configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown relation: {0}")]
    UnresolvedRelation(String),

    #[error("Unknown column: {0}")]
    UnresolvedColumn(String),
}
