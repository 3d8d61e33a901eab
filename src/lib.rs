//! An incremental implementation of the Cassowary linear constraint solving
//! algorithm (Badros, Stuckey, Marriott 2001): add and remove linear
//! equalities and inequalities over `f64` variables, each carrying a
//! priority [`Strength`], and cheaply re-solve as constraints come and go or
//! as suggested edit values change.
//!
//! ```
//! use cassowary::{Expression, Solver, Strength, Variable};
//!
//! let mut solver = Solver::new();
//! let left = Variable::new("left");
//! let width = Variable::new("width");
//! let right = Variable::new("right");
//!
//! solver.add_constraint(Expression::from(left.clone()).equal_to(0.0)).unwrap();
//! solver
//!     .add_constraint((left.clone() + width.clone()).equal_to(right.clone()))
//!     .unwrap();
//! solver.add_edit_variable(&width, Strength::STRONG).unwrap();
//! solver.suggest_value(&width, 100.0).unwrap();
//! solver.update_variables();
//!
//! assert!((right.value() - 100.0).abs() < 1e-9);
//! ```
//!
//! What this crate is not: a general linear or integer programming solver,
//! a layout engine, or anything with I/O, threads, or persistence attached.
//! It is the solver core only; composing it into a widget tree or a
//! document model is left to the caller.

mod constraint;
mod dump;
mod error;
mod expr;
mod row;
mod solver;
mod strength;
mod symbol;

pub use constraint::{Constraint, RelationalOperator};
pub use error::{Result, SolverError};
pub use expr::{Expression, Term, Variable, WithStrength};
pub use solver::Solver;
pub use strength::Strength;

#[cfg(test)]
mod proptest_invariants;
