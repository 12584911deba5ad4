use crate::{
    DEFAULT_MAX_DEPTH, Diff, Expr, SymError, coeff, contains, diff, free_symbols, piecewise,
    symb,
};

#[test]
fn test_builder_configuration() {
    let x = symb("x");
    let expr = x.pow(&Expr::integer(2)).unwrap();
    let res = Diff::new().differentiate(&expr, &x).unwrap();
    assert_eq!(format!("{res}"), "2*x");

    let limited = Diff::new().max_depth(1).max_nodes(1);
    assert_eq!(
        limited.differentiate(&expr, &x),
        Err(SymError::MaxDepthExceeded)
    );
    assert_eq!(
        Diff::new().max_nodes(1).differentiate(&expr, &x),
        Err(SymError::MaxNodesExceeded)
    );
}

#[test]
fn test_top_level_diff_enforces_default_depth() {
    let x = symb("x");
    let mut nested = x.clone();
    for _ in 0..DEFAULT_MAX_DEPTH {
        nested = wrap_once(&nested, &x);
    }
    assert_eq!(diff(&nested, &x), Err(SymError::MaxDepthExceeded));
}

/// `(e + 1) * x`: two levels deeper each time, and never collapsed.
fn wrap_once(e: &Expr, x: &Expr) -> Expr {
    Expr::product([Expr::sum([e.clone(), Expr::integer(1)]), x.clone()])
}

#[test]
fn test_polynomial() {
    let x = symb("x");
    let y = symb("y");
    // 3*x**2*y + 5*x - 7
    let f = Expr::integer(3) * x.pow(&Expr::integer(2)).unwrap() * &y
        + Expr::integer(5) * &x
        - Expr::integer(7);
    let df = diff(&f, &x).unwrap();
    assert_eq!(coeff(&df, &x, &Expr::integer(1)).unwrap(), Expr::integer(6) * &y);
    assert_eq!(coeff(&df, &x, &Expr::integer(0)).unwrap(), Expr::integer(5));

    let dfy = diff(&f, &y).unwrap();
    assert_eq!(dfy, Expr::integer(3) * x.pow(&Expr::integer(2)).unwrap());
}

#[test]
fn test_quotient_through_negative_power() {
    let x = symb("x");
    let inv = Expr::integer(1).div(&x).unwrap();
    assert_eq!(inv.to_string(), "x**(-1)");
    let expected = Expr::integer(-1) * x.pow(&Expr::integer(-2)).unwrap();
    assert_eq!(diff(&inv, &x).unwrap(), expected);
}

#[test]
fn test_second_derivative() {
    let x = symb("x");
    let cube = x.pow(&Expr::integer(3)).unwrap();
    let d1 = diff(&cube, &x).unwrap();
    let d2 = diff(&d1, &x).unwrap();
    assert_eq!(d2, Expr::integer(6) * &x);
    let d4 = diff(&diff(&d2, &x).unwrap(), &x).unwrap();
    assert_eq!(d4, Expr::integer(0));
}

#[test]
fn test_piecewise_conditions_untouched() {
    let x = symb("x");
    let t = symb("t");
    let iv = Expr::interval(Expr::integer(0), Expr::integer(1), false, true).unwrap();
    let cond = contains(&t, &iv).unwrap();
    let p = piecewise([(&x * &t, cond.clone())]);
    let dp = diff(&p, &x).unwrap();
    assert_eq!(dp, piecewise([(t.clone(), cond)]));
    assert!(free_symbols(&dp).contains(&t));
}

#[test]
fn test_subs_unsupported() {
    let x = symb("x");
    let s = Expr::subs(&x * &x, [(x.clone(), Expr::integer(2))]).unwrap();
    assert!(matches!(diff(&s, &x), Err(SymError::Unsupported(_))));
}
