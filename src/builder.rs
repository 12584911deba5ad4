//! Builder pattern API for differentiation
//!
//! Provides a fluent interface for bounding the size of the input before
//! differentiating it.
//!
//! # Example
//! ```
//! use symb_logic::{Diff, Expr, symb};
//!
//! let x = symb("x");
//! let expr = x.pow(&Expr::integer(2)).unwrap();
//!
//! let derivative = Diff::new()
//!     .max_depth(10)
//!     .max_nodes(100)
//!     .differentiate(&expr, &x)
//!     .unwrap();
//! assert_eq!(derivative.to_string(), "2*x");
//! ```

use log::debug;

use crate::core::error::{SymError, SymResult};
use crate::core::expr::Expr;
use crate::core::visitor::{count_nodes, tree_depth};

/// Builder for differentiation operations
#[derive(Debug, Clone, Default)]
pub struct Diff {
    max_depth: Option<usize>,
    max_nodes: Option<usize>,
}

impl Diff {
    /// Create a new differentiation builder with no limits
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum tree depth
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Set maximum tree node count
    #[must_use]
    pub fn max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = Some(nodes);
        self
    }

    /// Check the configured limits against `expr`.
    ///
    /// # Errors
    /// `MaxDepthExceeded` / `MaxNodesExceeded` when a limit is exceeded.
    pub fn check_limits(&self, expr: &Expr) -> SymResult<()> {
        if let Some(max_d) = self.max_depth {
            let depth = tree_depth(expr);
            if depth > max_d {
                debug!("depth {depth} exceeds limit {max_d}");
                return Err(SymError::MaxDepthExceeded);
            }
        }
        if let Some(max_n) = self.max_nodes {
            let nodes = count_nodes(expr);
            if nodes > max_n {
                debug!("{nodes} nodes exceed limit {max_n}");
                return Err(SymError::MaxNodesExceeded);
            }
        }
        Ok(())
    }

    /// Differentiate `expr` with respect to the symbol `var`.
    ///
    /// # Errors
    /// Limit violations, plus every error of [`Expr::diff`].
    pub fn differentiate(&self, expr: &Expr, var: &Expr) -> SymResult<Expr> {
        self.check_limits(expr)?;
        debug!("differentiating {expr} with respect to {var}");
        expr.diff(var)
    }
}
