//! Set-membership predicate.

use std::cmp::Ordering;
use std::sync::Arc;

use log::trace;

use super::{Boolean, boolean};
use crate::core::error::{SymError, SymResult};
use crate::core::expr::{Expr, ExprKind, Interval};
use crate::core::number::Numeric;

impl Interval {
    /// Whether a numeric value lies in the interval, honoring open bounds.
    pub(crate) fn contains_number(&self, value: &Numeric) -> bool {
        let (Some(start), Some(end)) = (
            Numeric::from_expr(&self.start),
            Numeric::from_expr(&self.end),
        ) else {
            return false;
        };

        let above_start = match value.partial_cmp(&start) {
            Some(Ordering::Greater) => true,
            Some(Ordering::Equal) => !self.left_open,
            _ => false,
        };
        let below_end = match value.partial_cmp(&end) {
            Some(Ordering::Less) => true,
            Some(Ordering::Equal) => !self.right_open,
            _ => false,
        };
        above_start && below_end
    }
}

/// The predicate `expr ∈ set`.
///
/// `set` must be an interval or the empty set. Membership of a numeric
/// literal is decided immediately and yields `True` or `False`; any other
/// `expr` gives a `Contains` node.
///
/// # Errors
/// `InvalidOperand` if `set` is not a set.
pub fn contains(expr: &Expr, set: &Expr) -> SymResult<Boolean> {
    if !set.is_set() {
        return Err(SymError::invalid_operand(format!(
            "Contains needs an Interval or EmptySet, got {}",
            set.kind().name()
        )));
    }

    if let Some(value) = Numeric::from_expr(expr) {
        let member = match set.kind() {
            ExprKind::Interval(iv) => iv.contains_number(&value),
            _ => false,
        };
        trace!("Contains({expr}, {set}) decided: {member}");
        return Ok(boolean(member));
    }

    Ok(Boolean::from_canonical(Expr::new(ExprKind::Contains {
        expr: Arc::new(expr.clone()),
        set: Arc::new(set.clone()),
    })))
}
