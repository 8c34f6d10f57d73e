use thiserror::Error;

/// Result type for toolkit operations
pub type Result<T> = std::result::Result<T, NetsciError>;

/// Errors that can occur while analysing or perturbing a graph
#[derive(Error, Debug)]
pub enum NetsciError {
    #[error("Node not found in graph: {node}")]
    NodeNotFound { node: String },

    #[error(
        "Stopped: reached {fail_max} consecutive failed swap attempts after {successes} of {n_iter} swaps. No further swaps possible."
    )]
    SwapsExhausted {
        fail_max: usize,
        successes: usize,
        n_iter: usize,
    },

    #[error("Invalid algorithm parameter: {message}")]
    InvalidParameter { message: String },

    #[error("Graph not found: {graph_id}")]
    GraphNotFound { graph_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl NetsciError {
    pub fn node_not_found(node: impl std::fmt::Debug) -> Self {
        Self::NodeNotFound {
            node: format!("{:?}", node),
        }
    }

    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
