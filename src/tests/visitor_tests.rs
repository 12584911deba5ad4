use crate::visitor::{
    StopVisitor, Visitor, postorder_traversal, postorder_traversal_stop, preorder_traversal,
    preorder_traversal_stop,
};
use crate::{Expr, bool_true, contains, logical_and, logical_not, piecewise, symb};

/// Stops after `limit` visits.
struct Budget {
    limit: usize,
    seen: Vec<String>,
}

impl Budget {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            seen: Vec::new(),
        }
    }
}

impl Visitor for Budget {
    type Output = ();
    fn visit_default(&mut self, node: &Expr) {
        self.seen.push(node.to_string());
    }
}

impl StopVisitor for Budget {
    fn should_stop(&self) -> bool {
        self.seen.len() >= self.limit
    }
}

/// Names the kind reached through dispatch.
struct KindName;

impl Visitor for KindName {
    type Output = &'static str;

    fn visit_default(&mut self, _node: &Expr) -> &'static str {
        "other"
    }
    fn visit_symbol(&mut self, _node: &Expr) -> &'static str {
        "symbol"
    }
    fn visit_boolean_atom(&mut self, _node: &Expr) -> &'static str {
        "boolean"
    }
    fn visit_contains(&mut self, _node: &Expr) -> &'static str {
        "contains"
    }
    fn visit_not(&mut self, _node: &Expr) -> &'static str {
        "not"
    }
    fn visit_and(&mut self, _node: &Expr) -> &'static str {
        "and"
    }
    fn visit_piecewise(&mut self, _node: &Expr) -> &'static str {
        "piecewise"
    }
    fn visit_interval(&mut self, _node: &Expr) -> &'static str {
        "interval"
    }
}

fn unit() -> Expr {
    Expr::interval(Expr::integer(0), Expr::integer(1), false, false).unwrap()
}

#[test]
fn test_dispatch_reaches_kind_method() {
    let x = symb("x");
    let c = contains(&x, &unit()).unwrap();
    let d = contains(&symb("y"), &unit()).unwrap();

    assert_eq!(x.accept(&mut KindName), "symbol");
    assert_eq!(bool_true().accept(&mut KindName), "boolean");
    assert_eq!(c.accept(&mut KindName), "contains");
    assert_eq!(logical_not(&c).accept(&mut KindName), "not");
    assert_eq!(logical_and([c.clone(), d]).accept(&mut KindName), "and");
    assert_eq!(unit().accept(&mut KindName), "interval");
    assert_eq!(piecewise([(x.clone(), c)]).accept(&mut KindName), "piecewise");
    // No override: falls back to visit_default
    assert_eq!(Expr::integer(4).accept(&mut KindName), "other");
    assert_eq!((&x + Expr::integer(1)).accept(&mut KindName), "other");
}

#[test]
fn test_preorder_stop_after_first() {
    let x = symb("x");
    let y = symb("y");
    let expr = &x * &y;
    let mut budget = Budget::new(1);
    preorder_traversal_stop(&expr, &mut budget);
    assert_eq!(budget.seen, ["x*y"]);
}

#[test]
fn test_postorder_stop_before_root() {
    let x = symb("x");
    let y = symb("y");
    let expr = &x * &y;
    let mut budget = Budget::new(1);
    postorder_traversal_stop(&expr, &mut budget);
    assert_eq!(budget.seen, ["x"]);
}

#[test]
fn test_stop_traversal_without_stopping_matches_plain() {
    let x = symb("x");
    let c = contains(&x, &unit()).unwrap();
    let tree = logical_not(&c).into_expr();

    let mut plain = Budget::new(usize::MAX);
    preorder_traversal(&tree, &mut plain);
    let mut stoppable = Budget::new(usize::MAX);
    preorder_traversal_stop(&tree, &mut stoppable);
    assert_eq!(plain.seen, stoppable.seen);

    let mut plain = Budget::new(usize::MAX);
    postorder_traversal(&tree, &mut plain);
    let mut stoppable = Budget::new(usize::MAX);
    postorder_traversal_stop(&tree, &mut stoppable);
    assert_eq!(plain.seen, stoppable.seen);
    assert_eq!(plain.seen.last().map(String::as_str), Some("Not(Contains(x, [0, 1]))"));
}

#[test]
fn test_preorder_visits_interval_bounds() {
    let x = symb("x");
    let c = contains(&x, &unit()).unwrap();
    let mut all = Budget::new(usize::MAX);
    preorder_traversal(&c, &mut all);
    assert_eq!(all.seen, ["Contains(x, [0, 1])", "x", "[0, 1]", "0", "1"]);
}
