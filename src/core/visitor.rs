//! Double-dispatch visitor protocol for expression trees.
//!
//! New analyses are added by implementing [`Visitor`] rather than by adding
//! methods to the node kinds. Every `visit_*` method defaults to
//! [`Visitor::visit_default`], so a visitor only overrides the kinds it
//! needs to treat specially.
//!
//! # Example
//! ```
//! use symb_logic::visitor::{Visitor, preorder_traversal};
//! use symb_logic::{Expr, symb};
//!
//! #[derive(Default)]
//! struct SymbolCounter {
//!     count: usize,
//! }
//!
//! impl Visitor for SymbolCounter {
//!     type Output = ();
//!     fn visit_default(&mut self, _node: &Expr) {}
//!     fn visit_symbol(&mut self, _node: &Expr) {
//!         self.count += 1;
//!     }
//! }
//!
//! let x = symb("x");
//! let y = symb("y");
//! let mut counter = SymbolCounter::default();
//! preorder_traversal(&(&x * &y + &x), &mut counter);
//! assert_eq!(counter.count, 3);
//! ```

use std::sync::Arc;

use crate::core::expr::{Expr, ExprKind};

/// Per-kind visit methods with a shared fallback.
pub trait Visitor {
    /// Result of visiting one node.
    type Output;

    /// Fallback for every kind the visitor does not handle explicitly.
    fn visit_default(&mut self, node: &Expr) -> Self::Output;

    fn visit_symbol(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_integer(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_rational(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_real_double(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_boolean_atom(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_interval(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_empty_set(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_contains(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_not(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_and(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_or(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_piecewise(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_add(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_mul(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_pow(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
    fn visit_subs(&mut self, node: &Expr) -> Self::Output {
        self.visit_default(node)
    }
}

/// A visitor that can abort a traversal early.
pub trait StopVisitor: Visitor<Output = ()> {
    /// Once this returns true the traversal visits no further nodes.
    fn should_stop(&self) -> bool;
}

impl Expr {
    /// Dispatch to the visitor method for this node's kind.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match &self.kind {
            ExprKind::Symbol(_) => visitor.visit_symbol(self),
            ExprKind::Integer(_) => visitor.visit_integer(self),
            ExprKind::Rational(_) => visitor.visit_rational(self),
            ExprKind::RealDouble(_) => visitor.visit_real_double(self),
            ExprKind::BooleanAtom(_) => visitor.visit_boolean_atom(self),
            ExprKind::Interval(_) => visitor.visit_interval(self),
            ExprKind::EmptySet => visitor.visit_empty_set(self),
            ExprKind::Contains { .. } => visitor.visit_contains(self),
            ExprKind::Not(_) => visitor.visit_not(self),
            ExprKind::And(_) => visitor.visit_and(self),
            ExprKind::Or(_) => visitor.visit_or(self),
            ExprKind::Piecewise(_) => visitor.visit_piecewise(self),
            ExprKind::Add(_) => visitor.visit_add(self),
            ExprKind::Mul(_) => visitor.visit_mul(self),
            ExprKind::Pow(_, _) => visitor.visit_pow(self),
            ExprKind::Subs { .. } => visitor.visit_subs(self),
        }
    }
}

// Traversals keep an explicit stack, so tree depth is bounded by memory
// rather than by the call stack.

fn walk_preorder<V: Visitor + ?Sized>(node: &Expr, visitor: &mut V, stop: fn(&V) -> bool) {
    node.accept(visitor);
    if stop(visitor) {
        return;
    }
    let mut stack: Vec<Arc<Expr>> = node.args().into_iter().rev().collect();
    while let Some(current) = stack.pop() {
        current.accept(visitor);
        if stop(visitor) {
            return;
        }
        stack.extend(current.args().into_iter().rev());
    }
}

fn walk_postorder<V: Visitor + ?Sized>(node: &Expr, visitor: &mut V, stop: fn(&V) -> bool) {
    // `true` once the children of the entry have been pushed.
    let mut stack: Vec<(Arc<Expr>, bool)> = node
        .args()
        .into_iter()
        .rev()
        .map(|child| (child, false))
        .collect();
    while let Some((current, expanded)) = stack.pop() {
        if expanded {
            current.accept(visitor);
            if stop(visitor) {
                return;
            }
            continue;
        }
        let children = current.args();
        stack.push((current, true));
        stack.extend(children.into_iter().rev().map(|child| (child, false)));
    }
    node.accept(visitor);
}

/// Visit `node`, then its children in `args()` order.
pub fn preorder_traversal<V: Visitor + ?Sized>(node: &Expr, visitor: &mut V) {
    walk_preorder(node, visitor, |_| false);
}

/// Visit the children of `node` in `args()` order, then `node` itself.
pub fn postorder_traversal<V: Visitor + ?Sized>(node: &Expr, visitor: &mut V) {
    walk_postorder(node, visitor, |_| false);
}

/// Pre-order traversal that stops as soon as `visitor.should_stop()`.
pub fn preorder_traversal_stop<V: StopVisitor + ?Sized>(node: &Expr, visitor: &mut V) {
    walk_preorder(node, visitor, |v| v.should_stop());
}

/// Post-order traversal that stops as soon as `visitor.should_stop()`.
pub fn postorder_traversal_stop<V: StopVisitor + ?Sized>(node: &Expr, visitor: &mut V) {
    walk_postorder(node, visitor, |v| v.should_stop());
}

/// Counts visited nodes.
#[derive(Debug, Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl Visitor for NodeCounter {
    type Output = ();

    fn visit_default(&mut self, _node: &Expr) {
        self.count += 1;
    }
}

/// Number of nodes in `expr`, counting shared subtrees once per occurrence.
#[must_use]
pub fn count_nodes(expr: &Expr) -> usize {
    let mut counter = NodeCounter::default();
    preorder_traversal(expr, &mut counter);
    counter.count
}

/// Height of `expr`; a leaf has depth 1.
#[must_use]
pub fn tree_depth(expr: &Expr) -> usize {
    let mut max_depth = 0;
    let mut stack = vec![(Arc::new(expr.clone()), 1_usize)];
    while let Some((node, depth)) = stack.pop() {
        max_depth = max_depth.max(depth);
        stack.extend(node.args().into_iter().map(|child| (child, depth + 1)));
    }
    max_depth
}
