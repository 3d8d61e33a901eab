//! Property-based checks of the tableau's structural/feasibility invariants
//! and of the add-then-remove solution-equivalence guarantee, exercised over
//! randomly generated linear constraints rather than the fixed scenarios in
//! [`crate::solver`]'s own test module.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::expr::{Expression, Variable, WithStrength};
use crate::solver::Solver;
use crate::strength::Strength;

fn three_vars() -> (Variable, Variable, Variable) {
    (Variable::new("a"), Variable::new("b"), Variable::new("c"))
}

fn assert_structural_invariants(solver: &Solver) {
    let basics: HashSet<_> = solver.rows_for_dump().keys().copied().collect();
    for (&basic, row) in solver.rows_for_dump() {
        if basic.is_slack() || basic.is_error() {
            assert!(row.constant >= -1e-6, "primal feasibility violated: {basic:?} = {}", row.constant);
        }
        assert!(!row.contains(basic), "basic row contains its own symbol: {basic:?}");
        for (symbol, _) in row.iter() {
            assert!(!basics.contains(&symbol), "row cell {symbol:?} is itself a basic symbol");
        }
    }
}

proptest! {
    /// After any sequence of attempted (possibly rejected) random linear
    /// constraints, the tableau's structural and primal-feasibility
    /// invariants still hold.
    #[test]
    fn structural_invariants_hold_after_random_constraints(
        terms in proptest::collection::vec((-5.0f64..5.0, -5.0f64..5.0, -5.0f64..5.0, -20.0f64..20.0, 0u8..3), 1..12)
    ) {
        let mut solver = Solver::new();
        let (a, b, c) = three_vars();

        for (ca, cb, cc, k, op) in terms {
            let expr = a.clone() * ca + b.clone() * cb + c.clone() * cc + k;
            let constraint = match op {
                0 => expr.equal_to(0.0),
                1 => expr.less_than_or_equal_to(0.0),
                _ => expr.greater_than_or_equal_to(0.0),
            };
            // Most random coefficients land on satisfiable constraints; a
            // rejected one must leave the tableau exactly as it was, which
            // the invariant check below verifies either way.
            let _ = solver.add_constraint(constraint);
            assert_structural_invariants(&solver);
        }
    }

    /// Adding a required constraint and immediately removing it again
    /// leaves every variable at the value it had before the add.
    #[test]
    fn add_then_remove_restores_solution(k in -50.0f64..50.0) {
        let mut solver = Solver::new();
        let (a, b, _c) = three_vars();
        solver.add_constraint(Expression::from(a.clone()).equal_to(3.0).with_strength(Strength::STRONG)).unwrap();
        solver.add_constraint(Expression::from(b.clone()).equal_to(7.0).with_strength(Strength::STRONG)).unwrap();
        solver.update_variables();
        let before = (a.value(), b.value());

        let extra = (a.clone() + b.clone()).equal_to(k);
        if solver.add_constraint(extra.clone()).is_ok() {
            solver.remove_constraint(&extra).unwrap();
        }
        solver.update_variables();

        prop_assert!((before.0 - a.value()).abs() < 1e-6);
        prop_assert!((before.1 - b.value()).abs() < 1e-6);
    }
}
