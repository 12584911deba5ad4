//! Differentiation engine - a visitor applying the calculus rules
//!
//! Only the rules needed by the canonical tree are implemented: sums,
//! products, powers with a constant exponent, and piecewise values.
//! Boolean-valued nodes have no derivative and fail with
//! `NotDifferentiable`; sets and unevaluated substitutions fall through to
//! the visitor fallback and fail with `Unsupported`.
//!
//! Intermediate results go through the canonicalizing `Expr::sum` /
//! `Expr::product` constructors, so zero terms and unit factors disappear as
//! the derivative is built.

use std::sync::Arc;

use crate::analysis::has_symbol;
use crate::core::error::{SymError, SymResult};
use crate::core::expr::{Expr, ExprKind, PiecewiseBranch};
use crate::core::visitor::Visitor;

/// Derivative with respect to one symbol.
pub(crate) struct DiffVisitor<'a> {
    var: &'a Expr,
}

impl<'a> DiffVisitor<'a> {
    pub(crate) fn new(var: &'a Expr) -> Self {
        Self { var }
    }

    fn not_differentiable(node: &Expr) -> SymResult<Expr> {
        Err(SymError::NotDifferentiable(node.to_string()))
    }
}

impl Visitor for DiffVisitor<'_> {
    type Output = SymResult<Expr>;

    fn visit_default(&mut self, node: &Expr) -> SymResult<Expr> {
        Err(SymError::unsupported(format!(
            "derivative of {} is not defined",
            node.kind().name()
        )))
    }

    // Base cases
    fn visit_integer(&mut self, _node: &Expr) -> SymResult<Expr> {
        Ok(Expr::integer(0))
    }

    fn visit_rational(&mut self, _node: &Expr) -> SymResult<Expr> {
        Ok(Expr::integer(0))
    }

    fn visit_real_double(&mut self, _node: &Expr) -> SymResult<Expr> {
        Ok(Expr::integer(0))
    }

    fn visit_symbol(&mut self, node: &Expr) -> SymResult<Expr> {
        Ok(Expr::integer(i32::from(node == self.var)))
    }

    // Boolean-valued kinds
    fn visit_boolean_atom(&mut self, node: &Expr) -> SymResult<Expr> {
        Self::not_differentiable(node)
    }

    fn visit_contains(&mut self, node: &Expr) -> SymResult<Expr> {
        Self::not_differentiable(node)
    }

    fn visit_not(&mut self, node: &Expr) -> SymResult<Expr> {
        Self::not_differentiable(node)
    }

    fn visit_and(&mut self, node: &Expr) -> SymResult<Expr> {
        Self::not_differentiable(node)
    }

    fn visit_or(&mut self, node: &Expr) -> SymResult<Expr> {
        Self::not_differentiable(node)
    }

    // Sum rule: (a + b + c + ...)' = a' + b' + c' + ...
    fn visit_add(&mut self, node: &Expr) -> SymResult<Expr> {
        let ExprKind::Add(terms) = node.kind() else {
            return self.visit_default(node);
        };
        let derivatives = terms
            .iter()
            .map(|t| t.accept(self))
            .collect::<SymResult<Vec<_>>>()?;
        Ok(Expr::sum(derivatives))
    }

    // N-ary Product rule: (a * b * c)' = a' * b * c + a * b' * c + a * b * c'
    fn visit_mul(&mut self, node: &Expr) -> SymResult<Expr> {
        let ExprKind::Mul(factors) = node.kind() else {
            return self.visit_default(node);
        };

        let mut result_terms: Vec<Expr> = Vec::with_capacity(factors.len());
        for (i, factor) in factors.iter().enumerate() {
            let factor_prime = factor.accept(self)?;
            if factor_prime.is_zero_num() {
                continue;
            }
            let others = factors
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, f)| (**f).clone());
            result_terms.push(Expr::product(others.chain(std::iter::once(factor_prime))));
        }
        Ok(Expr::sum(result_terms))
    }

    // Power rule: (u^n)' = n * u^(n-1) * u', exponent free of the variable
    fn visit_pow(&mut self, node: &Expr) -> SymResult<Expr> {
        let ExprKind::Pow(base, exp) = node.kind() else {
            return self.visit_default(node);
        };
        if has_symbol(exp, self.var) {
            return Err(SymError::unsupported(format!(
                "derivative of {node} needs a variable-exponent rule"
            )));
        }

        let base_prime = base.accept(self)?;
        if base_prime.is_zero_num() {
            return Ok(Expr::integer(0));
        }
        let reduced = Expr::sum([(**exp).clone(), Expr::integer(-1)]);
        let power = base.pow(&reduced)?;
        Ok(Expr::product([(**exp).clone(), power, base_prime]))
    }

    // Branch-wise: conditions and branch order are kept
    fn visit_piecewise(&mut self, node: &Expr) -> SymResult<Expr> {
        let ExprKind::Piecewise(branches) = node.kind() else {
            return self.visit_default(node);
        };
        let branches = branches
            .iter()
            .map(|branch| {
                Ok(PiecewiseBranch {
                    value: Arc::new(branch.value.accept(self)?),
                    condition: Arc::clone(&branch.condition),
                })
            })
            .collect::<SymResult<Vec<_>>>()?;
        Ok(Expr::new(ExprKind::Piecewise(branches)))
    }
}

impl Expr {
    /// Derivative of this expression with respect to the symbol `var`.
    ///
    /// # Errors
    /// - `InvalidOperand` if `var` is not a symbol
    /// - `NotDifferentiable` for boolean-valued nodes
    /// - `Unsupported` for sets, substitutions and variable exponents
    ///
    /// Recurses once per tree level and applies no limits; use
    /// [`crate::diff`] or the [`crate::Diff`] builder to bound the input.
    ///
    /// # Example
    /// ```
    /// use symb_logic::{Expr, symb};
    ///
    /// let x = symb("x");
    /// let f = x.pow(&Expr::integer(3)).unwrap() + Expr::integer(2) * &x;
    /// assert_eq!(f.diff(&x).unwrap().to_string(), "2 + 3*x**2");
    /// ```
    pub fn diff(&self, var: &Expr) -> SymResult<Expr> {
        if !var.is_symbol() {
            return Err(SymError::invalid_operand(format!(
                "can only differentiate with respect to a Symbol, got {}",
                var.kind().name()
            )));
        }
        self.accept(&mut DiffVisitor::new(var))
    }
}
