use crate::{
    Boolean, Expr, ExprKind, SymError, bool_false, bool_true, boolean, contains, diff,
    logical_and, logical_not, logical_or, piecewise, symb,
};

fn interval(lo: i64, hi: i64, left_open: bool, right_open: bool) -> Expr {
    Expr::interval(Expr::integer(lo), Expr::integer(hi), left_open, right_open).unwrap()
}

fn member(name: &str, set: &Expr) -> Boolean {
    contains(&symb(name), set).unwrap()
}

#[test]
fn test_boolean_atoms_are_singletons() {
    let t1 = bool_true();
    let t2 = boolean(true);
    assert_eq!(t1, t2);
    assert_eq!(t1.id(), t2.id());
    assert_eq!(t1.to_string(), "True");
    assert_eq!(bool_false().to_string(), "False");
    assert!(t1.args().is_empty());
    assert!(bool_false().args().is_empty());
    assert_ne!(bool_true(), bool_false());
}

#[test]
fn test_contains_numeric_decided() {
    let unit = interval(1, 2, false, false);
    assert_eq!(contains(&Expr::real_double(1.5), &unit).unwrap(), bool_true());
    assert_eq!(contains(&Expr::integer(3), &unit).unwrap(), bool_false());
    assert_eq!(
        contains(&Expr::rational(3, 2).unwrap(), &unit).unwrap(),
        bool_true()
    );
}

#[test]
fn test_contains_open_bounds() {
    let half_open = interval(1, 2, true, false);
    assert_eq!(contains(&Expr::integer(1), &half_open).unwrap(), bool_false());
    assert_eq!(contains(&Expr::integer(2), &half_open).unwrap(), bool_true());
    let open = interval(1, 2, true, true);
    assert_eq!(contains(&Expr::integer(2), &open).unwrap(), bool_false());
}

#[test]
fn test_contains_symbolic_renders() {
    let x = symb("x");
    let c = contains(&x, &interval(1, 2, false, false)).unwrap();
    assert_eq!(c.to_string(), "Contains(x, [1, 2])");
    assert_eq!(c.args().len(), 2);
    assert_eq!(c.args()[0].to_string(), "x");
    assert_eq!(c.args()[1].to_string(), "[1, 2]");
}

#[test]
fn test_contains_empty_set() {
    let x = symb("x");
    assert_eq!(
        contains(&Expr::integer(0), &Expr::empty_set()).unwrap(),
        bool_false()
    );
    assert_eq!(
        contains(&x, &Expr::empty_set()).unwrap().to_string(),
        "Contains(x, EmptySet)"
    );
}

#[test]
fn test_contains_rejects_non_set() {
    let x = symb("x");
    assert!(matches!(
        contains(&x, &symb("y")),
        Err(SymError::InvalidOperand(_))
    ));
}

#[test]
fn test_piecewise_scenario() {
    let x = symb("x");
    let y = symb("y");
    let c1 = contains(&x, &interval(1, 2, true, false)).unwrap();
    let c2 = contains(&x, &interval(2, 5, true, false)).unwrap();
    let c3 = contains(&x, &interval(5, 10, true, false)).unwrap();

    let p = piecewise([
        (x.clone(), c1.clone()),
        (y.clone(), c2.clone()),
        (&x + &y, c3.clone()),
    ]);
    assert_eq!(
        p.to_string(),
        "Piecewise((x, Contains(x, (1, 2])), (y, Contains(x, (2, 5])), (x + y, Contains(x, (5, 10])))"
    );

    let expected = piecewise([
        (Expr::integer(1), c1),
        (Expr::integer(0), c2),
        (Expr::integer(1), c3),
    ]);
    assert_eq!(diff(&p, &x).unwrap(), expected);
}

#[test]
fn test_or_keeps_absorbable_operands() {
    let iv = interval(1, 2, false, false);
    let a = member("a", &iv);
    let b = member("b", &iv);
    let and_ab = logical_and([a.clone(), b.clone()]);
    let or = logical_or([a.clone(), and_ab.clone()]);
    match or.kind() {
        ExprKind::Or(ops) => {
            assert_eq!(ops.len(), 2);
            assert!(ops.iter().any(|op| **op == *a));
            assert!(ops.iter().any(|op| **op == *and_ab));
        }
        other => panic!("expected Or, got {other:?}"),
    }
}

#[test]
fn test_nested_and_flattens() {
    let iv = interval(1, 2, false, false);
    let (a, b, c, d) = (
        member("a", &iv),
        member("b", &iv),
        member("c", &iv),
        member("d", &iv),
    );
    let nested = logical_and([
        logical_and([a.clone(), b.clone()]),
        logical_and([c.clone(), d.clone()]),
    ]);
    let flat = logical_and([a, b, c, d]);
    assert_eq!(nested, flat);
    assert_eq!(nested.args().len(), 4);
    assert_eq!(
        nested.to_string(),
        "And(Contains(a, [1, 2]), Contains(b, [1, 2]), Contains(c, [1, 2]), Contains(d, [1, 2]))"
    );
}

#[test]
fn test_or_does_not_flatten_into_and() {
    let iv = interval(1, 2, false, false);
    let a = member("a", &iv);
    let b = member("b", &iv);
    let c = member("c", &iv);
    let mixed = logical_and([logical_or([a, b]), c]);
    assert_eq!(mixed.args().len(), 2);
}

#[test]
fn test_de_morgan() {
    let iv = interval(1, 2, false, false);
    let a = member("a", &iv);
    let b = member("b", &iv);
    let negated = logical_not(&logical_and([a.clone(), b.clone()]));
    assert_eq!(negated, logical_or([logical_not(&a), logical_not(&b)]));
    assert_eq!(
        negated.to_string(),
        "Or(Not(Contains(a, [1, 2])), Not(Contains(b, [1, 2])))"
    );
}

#[test]
fn test_double_negation_kept() {
    let a = member("a", &interval(1, 2, false, false));
    let twice = logical_not(&logical_not(&a));
    assert_ne!(twice, a);
    assert_eq!(twice.to_string(), "Not(Not(Contains(a, [1, 2])))");
    assert_eq!(logical_not(&bool_true()), bool_false());
}

#[test]
fn test_boolean_try_from() {
    let x = symb("x");
    assert!(matches!(
        Boolean::try_from(x),
        Err(SymError::InvalidOperand(_))
    ));
    let t = Boolean::try_from(Expr::from(bool_true())).unwrap();
    assert!(t.is_true());
}

#[test]
fn test_diff_boolean_kinds_fail() {
    let x = symb("x");
    let iv = interval(1, 2, false, false);
    let a = member("a", &iv);
    let b = member("b", &iv);
    let cases = [
        bool_true(),
        bool_false(),
        a.clone(),
        logical_not(&a),
        logical_and([a.clone(), b.clone()]),
        logical_or([a, b]),
    ];
    for case in cases {
        assert!(
            matches!(case.diff(&x), Err(SymError::NotDifferentiable(_))),
            "{case} should not be differentiable"
        );
    }
}
