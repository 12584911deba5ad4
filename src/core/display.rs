//! Display implementations for expressions.
//!
//! The rendered string is canonical: two equal expressions always print the
//! same text, whatever order they were built in.
//!
//! - Logic: `True`, `Not(x)`, `And(a, b)`, `Or(a, b)`, `Contains(x, [1, 2])`
//! - Sets: `[1, 2]`, `(1, 2]`, `EmptySet`
//! - Piecewise: `Piecewise((x, c0), (y, c1))`
//! - Arithmetic: `x + y`, `x - y`, `2*x`, `-x`, `x**2`, `x**(1/2)`, `(x + y)**2`
//! - Numbers: `3`, `1/2`, `1.5`, `2.0`
//!
//! Rendering recurses once per tree level, so very deep trees (far beyond
//! anything the `Diff` limits accept) can exhaust the thread's stack.

use std::fmt;
use std::sync::Arc;

use num_traits::Signed;

use crate::core::expr::{Expr, ExprKind, Interval, PiecewiseBranch};

#[derive(Clone, Copy)]
enum ParenContext {
    SumOrProduct,
    PowerBase,
    Exponent,
}

/// If the term has a negative leading coefficient, return its positive
/// counterpart.
fn extract_negative(expr: &Expr) -> Option<Expr> {
    match &expr.kind {
        ExprKind::Mul(factors) => {
            let coeff = &factors[0];
            if !is_negative_number(coeff) {
                return None;
            }
            let positive = -&**coeff;
            if positive.is_one_num() {
                if factors.len() == 2 {
                    return Some((*factors[1]).clone());
                }
                return Some(Expr::new(ExprKind::Mul(factors[1..].to_vec())));
            }
            let mut new_factors: Vec<Arc<Expr>> = Vec::with_capacity(factors.len());
            new_factors.push(Arc::new(positive));
            new_factors.extend_from_slice(&factors[1..]);
            Some(Expr::new(ExprKind::Mul(new_factors)))
        }
        _ if is_negative_number(expr) => Some(-expr),
        _ => None,
    }
}

fn is_negative_number(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::Integer(n) => n.is_negative(),
        ExprKind::Rational(r) => r.is_negative(),
        ExprKind::RealDouble(d) => d.value() < 0.0,
        _ => false,
    }
}

fn needs_parens(expr: &Expr, context: ParenContext) -> bool {
    match context {
        ParenContext::SumOrProduct => {
            matches!(expr.kind, ExprKind::Add(_) | ExprKind::Rational(_))
        }
        ParenContext::PowerBase => {
            matches!(
                expr.kind,
                ExprKind::Add(_) | ExprKind::Mul(_) | ExprKind::Pow(_, _) | ExprKind::Rational(_)
            ) || is_negative_number(expr)
        }
        ParenContext::Exponent => !matches!(
            expr.kind,
            ExprKind::Symbol(_) | ExprKind::Integer(_) | ExprKind::RealDouble(_)
        ) || is_negative_number(expr),
    }
}

fn format_wrapped(f: &mut fmt::Formatter<'_>, expr: &Expr, context: ParenContext) -> fmt::Result {
    if needs_parens(expr, context) {
        write!(f, "({expr})")
    } else {
        write!(f, "{expr}")
    }
}

fn format_sum(f: &mut fmt::Formatter<'_>, terms: &[Arc<Expr>]) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        match (i, extract_negative(term)) {
            (0, Some(positive)) => write!(f, "-{positive}")?,
            (0, None) => write!(f, "{term}")?,
            (_, Some(positive)) => write!(f, " - {positive}")?,
            (_, None) => write!(f, " + {term}")?,
        }
    }
    Ok(())
}

fn format_product(f: &mut fmt::Formatter<'_>, factors: &[Arc<Expr>]) -> fmt::Result {
    if let Some(positive) = extract_negative_product(factors) {
        write!(f, "-")?;
        return match &positive.kind {
            ExprKind::Mul(rest) => format_factors(f, rest),
            _ => format_wrapped(f, &positive, ParenContext::SumOrProduct),
        };
    }
    format_factors(f, factors)
}

fn extract_negative_product(factors: &[Arc<Expr>]) -> Option<Expr> {
    if factors.first().is_some_and(|c| is_negative_number(c)) {
        extract_negative(&Expr::new(ExprKind::Mul(factors.to_vec())))
    } else {
        None
    }
}

fn format_factors(f: &mut fmt::Formatter<'_>, factors: &[Arc<Expr>]) -> fmt::Result {
    for (i, factor) in factors.iter().enumerate() {
        if i > 0 {
            write!(f, "*")?;
        }
        format_wrapped(f, factor, ParenContext::SumOrProduct)?;
    }
    Ok(())
}

fn format_list(f: &mut fmt::Formatter<'_>, head: &str, ops: &[Arc<Expr>]) -> fmt::Result {
    write!(f, "{head}(")?;
    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{op}")?;
    }
    write!(f, ")")
}

fn format_piecewise(f: &mut fmt::Formatter<'_>, branches: &[PiecewiseBranch]) -> fmt::Result {
    write!(f, "Piecewise(")?;
    for (i, branch) in branches.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "({}, {})", branch.value, branch.condition)?;
    }
    write!(f, ")")
}

fn format_subs(
    f: &mut fmt::Formatter<'_>,
    arg: &Expr,
    bindings: &[(Arc<Expr>, Arc<Expr>)],
) -> fmt::Result {
    write!(f, "Subs({arg}, (")?;
    for (i, (var, _)) in bindings.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{var}")?;
    }
    write!(f, "), (")?;
    for (i, (_, point)) in bindings.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{point}")?;
    }
    write!(f, "))")
}

fn format_real_double(f: &mut fmt::Formatter<'_>, value: f64) -> fmt::Result {
    if value.is_finite() && value.fract() == 0.0 {
        write!(f, "{value}.0")
    } else {
        write!(f, "{value}")
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.left_open { "(" } else { "[" };
        let close = if self.right_open { ")" } else { "]" };
        write!(f, "{open}{}, {}{close}", self.start, self.end)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Symbol(s) => write!(f, "{}", s.name()),
            ExprKind::Integer(n) => write!(f, "{n}"),
            ExprKind::Rational(r) => write!(f, "{}/{}", r.numer(), r.denom()),
            ExprKind::RealDouble(d) => format_real_double(f, d.value()),
            ExprKind::BooleanAtom(true) => write!(f, "True"),
            ExprKind::BooleanAtom(false) => write!(f, "False"),
            ExprKind::Interval(iv) => write!(f, "{iv}"),
            ExprKind::EmptySet => write!(f, "EmptySet"),
            ExprKind::Contains { expr, set } => write!(f, "Contains({expr}, {set})"),
            ExprKind::Not(arg) => write!(f, "Not({arg})"),
            ExprKind::And(ops) => format_list(f, "And", ops),
            ExprKind::Or(ops) => format_list(f, "Or", ops),
            ExprKind::Piecewise(branches) => format_piecewise(f, branches),
            ExprKind::Add(terms) => format_sum(f, terms),
            ExprKind::Mul(factors) => format_product(f, factors),
            ExprKind::Pow(base, exp) => {
                format_wrapped(f, base, ParenContext::PowerBase)?;
                write!(f, "**")?;
                format_wrapped(f, exp, ParenContext::Exponent)
            }
            ExprKind::Subs { arg, bindings } => format_subs(f, arg, bindings),
        }
    }
}
