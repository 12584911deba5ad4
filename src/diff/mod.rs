//! Symbolic differentiation (`Expr::diff`).

mod engine;
