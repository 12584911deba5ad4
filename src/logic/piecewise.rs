use std::sync::Arc;

use super::Boolean;
use crate::core::expr::{Expr, ExprKind, PiecewiseBranch};

/// Piecewise value: the first branch whose condition holds.
///
/// Branches keep the order given; it decides which value is selected, so no
/// sorting or deduplication is applied. An empty branch list is allowed.
pub fn piecewise(branches: impl IntoIterator<Item = (Expr, Boolean)>) -> Expr {
    let branches = branches
        .into_iter()
        .map(|(value, condition)| PiecewiseBranch {
            value: Arc::new(value),
            condition: Arc::new(condition.into_expr()),
        })
        .collect();
    Expr::new(ExprKind::Piecewise(branches))
}

impl Expr {
    /// Branches of a `Piecewise` node, `None` for any other kind.
    #[must_use]
    pub fn piecewise_branches(&self) -> Option<&[PiecewiseBranch]> {
        match &self.kind {
            ExprKind::Piecewise(branches) => Some(branches),
            _ => None,
        }
    }
}
