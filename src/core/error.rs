use thiserror::Error;

/// Errors raised by node constructors and tree analyses.
///
/// Every condition propagates straight to the caller of the top-level
/// operation; nothing is recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymError {
    /// An operation received a node of the wrong capability, e.g. a
    /// non-symbol differentiation variable or a non-integer rational part.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// Boolean-valued nodes have no derivative.
    #[error("Not differentiable: {0}")]
    NotDifferentiable(String),

    /// A visitor reached its generic fallback for an analysis that needs an
    /// explicit rule for the node kind it met.
    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid number format: '{0}'")]
    InvalidNumber(String),

    // Safety limits
    #[error("Expression nesting depth exceeds maximum limit")]
    MaxDepthExceeded,
    #[error("Expression size exceeds maximum node count limit")]
    MaxNodesExceeded,
}

impl SymError {
    pub fn invalid_operand(msg: impl Into<String>) -> Self {
        SymError::InvalidOperand(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        SymError::Unsupported(msg.into())
    }
}

/// Convenience alias used throughout the crate.
pub type SymResult<T> = Result<T, SymError>;
