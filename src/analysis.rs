//! Tree analyses built on the visitor protocol.
//!
//! - [`has_symbol`]: early-stopping occurrence check
//! - [`free_symbols`]: symbols not bound by a substitution
//! - [`coeff`]: coefficient of `x**n` in a sum of products

use std::collections::BTreeSet;

use crate::core::error::{SymError, SymResult};
use crate::core::expr::{Expr, ExprKind};
use crate::core::visitor::{StopVisitor, Visitor, preorder_traversal_stop};

// =============================================================================
// has_symbol
// =============================================================================

/// Stops at the first node equal to the borrowed symbol.
struct HasSymbolVisitor<'a> {
    symbol: &'a Expr,
    found: bool,
}

impl Visitor for HasSymbolVisitor<'_> {
    type Output = ();

    fn visit_default(&mut self, node: &Expr) {
        if node == self.symbol {
            self.found = true;
        }
    }
}

impl StopVisitor for HasSymbolVisitor<'_> {
    fn should_stop(&self) -> bool {
        self.found
    }
}

/// Whether `symbol` occurs anywhere in `tree`.
#[must_use]
pub fn has_symbol(tree: &Expr, symbol: &Expr) -> bool {
    let mut visitor = HasSymbolVisitor {
        symbol,
        found: false,
    };
    preorder_traversal_stop(tree, &mut visitor);
    visitor.found
}

// =============================================================================
// free_symbols
// =============================================================================

struct FreeSymbolsVisitor;

impl Visitor for FreeSymbolsVisitor {
    type Output = BTreeSet<Expr>;

    fn visit_default(&mut self, node: &Expr) -> BTreeSet<Expr> {
        let mut symbols = BTreeSet::new();
        let mut stack = node.args();
        while let Some(child) = stack.pop() {
            match child.kind() {
                ExprKind::Symbol(_) => {
                    symbols.insert((*child).clone());
                }
                // Only a substitution needs its own scope.
                ExprKind::Subs { .. } => symbols.extend(self.visit_subs(&child)),
                _ => stack.extend(child.args()),
            }
        }
        symbols
    }

    fn visit_symbol(&mut self, node: &Expr) -> BTreeSet<Expr> {
        BTreeSet::from([node.clone()])
    }

    fn visit_subs(&mut self, node: &Expr) -> BTreeSet<Expr> {
        let ExprKind::Subs { arg, bindings } = node.kind() else {
            return self.visit_default(node);
        };
        let mut symbols = arg.accept(self);
        for (var, _) in bindings {
            symbols.remove(&**var);
        }
        for (_, point) in bindings {
            symbols.extend(point.accept(self));
        }
        symbols
    }
}

/// Symbols occurring free in `tree`, in canonical order.
///
/// Variables bound by a `Subs` node are not free inside its argument; the
/// symbols of the substituted points are.
#[must_use]
pub fn free_symbols(tree: &Expr) -> BTreeSet<Expr> {
    tree.accept(&mut FreeSymbolsVisitor)
}

// =============================================================================
// coeff
// =============================================================================

struct CoeffVisitor<'a> {
    x: &'a Expr,
    n: &'a Expr,
}

impl CoeffVisitor<'_> {
    /// `node` itself when asking for the constant term and `x` is absent.
    fn constant_or_zero(&self, node: &Expr) -> Expr {
        if self.n.is_zero_num() && !has_symbol(node, self.x) {
            node.clone()
        } else {
            Expr::integer(0)
        }
    }

    /// Whether `factor` is exactly `x**n`.
    fn is_target_power(&self, factor: &Expr) -> bool {
        match factor.kind() {
            ExprKind::Pow(base, exp) => **base == *self.x && **exp == *self.n,
            _ => factor == self.x && self.n.is_one_num(),
        }
    }
}

impl Visitor for CoeffVisitor<'_> {
    type Output = Expr;

    fn visit_default(&mut self, node: &Expr) -> Expr {
        self.constant_or_zero(node)
    }

    fn visit_symbol(&mut self, node: &Expr) -> Expr {
        if node == self.x {
            if self.n.is_one_num() {
                Expr::integer(1)
            } else {
                Expr::integer(0)
            }
        } else {
            self.constant_or_zero(node)
        }
    }

    fn visit_pow(&mut self, node: &Expr) -> Expr {
        if self.is_target_power(node) {
            Expr::integer(1)
        } else {
            self.constant_or_zero(node)
        }
    }

    fn visit_mul(&mut self, node: &Expr) -> Expr {
        let ExprKind::Mul(factors) = node.kind() else {
            return self.visit_default(node);
        };
        match factors.iter().position(|f| self.is_target_power(f)) {
            Some(i) => Expr::product(
                factors
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .map(|(_, f)| (**f).clone()),
            ),
            None => self.constant_or_zero(node),
        }
    }

    fn visit_add(&mut self, node: &Expr) -> Expr {
        let ExprKind::Add(terms) = node.kind() else {
            return self.visit_default(node);
        };
        let coeffs: Vec<Expr> = terms.iter().map(|t| t.accept(self)).collect();
        Expr::sum(coeffs)
    }
}

/// Coefficient of `x**n` in `tree`.
///
/// Only the top-level sum-of-products structure is inspected; nothing is
/// expanded. With `n == 0` the result is the part of `tree` free of `x`.
///
/// # Errors
/// `InvalidOperand` if `x` is not a symbol.
///
/// # Example
/// ```
/// use symb_logic::{Expr, coeff, symb};
///
/// let x = symb("x");
/// let y = symb("y");
/// // 3*x**2 + y*x + 5
/// let poly = Expr::integer(3) * x.pow(&Expr::integer(2)).unwrap() + &y * &x + Expr::integer(5);
/// assert_eq!(coeff(&poly, &x, &Expr::integer(2)).unwrap(), Expr::integer(3));
/// assert_eq!(coeff(&poly, &x, &Expr::integer(1)).unwrap(), y);
/// assert_eq!(coeff(&poly, &x, &Expr::integer(0)).unwrap(), Expr::integer(5));
/// ```
pub fn coeff(tree: &Expr, x: &Expr, n: &Expr) -> SymResult<Expr> {
    if !x.is_symbol() {
        return Err(SymError::invalid_operand(format!(
            "coeff needs a Symbol, got {}",
            x.kind().name()
        )));
    }
    Ok(tree.accept(&mut CoeffVisitor { x, n }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Standard test relaxations")]
mod tests {
    use super::*;
    use crate::{contains, logical_and, symb};

    #[test]
    fn test_has_symbol() {
        let x = symb("x");
        let y = symb("y");
        let z = symb("z");
        let expr = &x * &y + Expr::integer(2);
        assert!(has_symbol(&expr, &x));
        assert!(has_symbol(&expr, &y));
        assert!(!has_symbol(&expr, &z));
    }

    #[test]
    fn test_has_symbol_in_logic() {
        let x = symb("x");
        let iv = Expr::interval(Expr::integer(0), Expr::integer(1), false, false).unwrap();
        let c = contains(&x, &iv).unwrap();
        assert!(has_symbol(&c, &x));
        assert!(!has_symbol(&c, &symb("w")));
    }

    #[test]
    fn test_free_symbols_sorted() {
        let a = symb("a");
        let b = symb("b");
        let c = symb("c");
        let expr = &c + &a * &b;
        let names: Vec<String> = free_symbols(&expr).iter().map(ToString::to_string).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_free_symbols_subs_binding() {
        let x = symb("x");
        let y = symb("y");
        let t = symb("t");
        // Subs(x + y, (x), (t)): x is bound, t is free
        let s = Expr::subs(&x + &y, [(x.clone(), t.clone())]).unwrap();
        let free = free_symbols(&s);
        assert!(!free.contains(&x));
        assert!(free.contains(&y));
        assert!(free.contains(&t));
        assert_eq!(free.len(), 2);
    }

    #[test]
    fn test_free_symbols_through_connectives() {
        let x = symb("x");
        let y = symb("y");
        let iv = Expr::interval(Expr::integer(0), Expr::integer(1), false, false).unwrap();
        let f = logical_and([contains(&x, &iv).unwrap(), contains(&y, &iv).unwrap()]);
        assert_eq!(free_symbols(&f).len(), 2);
    }

    #[test]
    fn test_coeff_rejects_non_symbol() {
        let x = symb("x");
        let res = coeff(&x, &Expr::integer(1), &Expr::integer(1));
        assert!(matches!(res, Err(SymError::InvalidOperand(_))));
    }

    #[test]
    fn test_coeff_terms() {
        let x = symb("x");
        let y = symb("y");
        let two = Expr::integer(2);
        // 2*x*y + x**2 + y
        let expr = &two * &x * &y + x.pow(&two).unwrap() + &y;
        assert_eq!(coeff(&expr, &x, &Expr::integer(1)).unwrap(), &two * &y);
        assert_eq!(coeff(&expr, &x, &two).unwrap(), Expr::integer(1));
        assert_eq!(coeff(&expr, &x, &Expr::integer(0)).unwrap(), y);
        assert_eq!(coeff(&expr, &x, &Expr::integer(3)).unwrap(), Expr::integer(0));
    }

    #[test]
    fn test_coeff_of_symbol_alone() {
        let x = symb("x");
        let y = symb("y");
        assert_eq!(coeff(&x, &x, &Expr::integer(1)).unwrap(), Expr::integer(1));
        assert_eq!(coeff(&y, &x, &Expr::integer(0)).unwrap(), y);
        assert_eq!(coeff(&y, &x, &Expr::integer(1)).unwrap(), Expr::integer(0));
    }
}
