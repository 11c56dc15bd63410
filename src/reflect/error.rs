// Mon Jan 19 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReflectError {
    #[error("Type not found: {0}")]
    TypeNotFound(String),
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
    #[error("Type {owner} references unknown type {name}")]
    UnresolvedReference { owner: String, name: String },
    #[error("Size of {0} does not fit in 64 bits")]
    SizeOverflow(String),
    #[error("Type nesting too deep while resolving {0}")]
    RecursionLimit(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ReflectResult<T> = Result<T, ReflectError>;
