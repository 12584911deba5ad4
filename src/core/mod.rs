//! Core types for the canonical-expression tree
//!
//! This module contains the fundamental types:
//! - `Expr` / `ExprKind` - immutable expression nodes
//! - `InternedSymbol` - symbol registry
//! - `SymError` - error taxonomy
//! - Canonicalizing arithmetic, display, and the visitor protocol

mod arith;
mod display;
pub(crate) mod error;
pub(crate) mod expr;
pub(crate) mod number;
pub(crate) mod symbol;
pub mod visitor;

// Public re-exports (for external API)
pub use error::{SymError, SymResult};
pub use expr::{Expr, ExprKind, Interval, PiecewiseBranch, expr_cmp};
pub use number::RealDouble;
pub use symbol::{InternedSymbol, symb, symb_interned, symbol_count, symbol_exists};
