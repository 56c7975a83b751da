use thiserror::Error;

/// A name from a query string or the command line that we do not recognize
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown sort strategy: {0}")]
    SortStrategy(String),

    #[error("unknown listing status: {0}")]
    Status(String),

    #[error("unknown property type: {0}")]
    PropertyType(String),

    #[error("unknown feature: {0}")]
    Feature(String),
}
