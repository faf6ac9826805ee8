use thiserror::Error;

use crate::digraph::GraphError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TextError<V> {
    #[error("input ended while reading {0}")]
    MissingToken(&'static str),
    #[error("invalid {what} count {token:?}")]
    BadCount { what: &'static str, token: String },
    #[error("invalid vertex {0:?}")]
    BadVertex(String),
    #[error("invalid weight {0:?}")]
    BadWeight(String),
    #[error("unexpected input {0:?} after the last edge")]
    TrailingInput(String),
    #[error("a flow network needs at least a source and a sink")]
    NoTerminals,
    #[error(transparent)]
    Graph(#[from] GraphError<V>),
}
