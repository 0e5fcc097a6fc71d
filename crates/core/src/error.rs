use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown view filter: {0}")]
    ViewFilter(String),
    #[error("unknown naming convention: {0}")]
    NamingConvention(String),
}
