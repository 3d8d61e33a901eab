//! The solver's closed, signalled error taxonomy.

use thiserror::Error;

use crate::constraint::Constraint;
use crate::expr::Variable;

/// Errors raised by [`Solver`](crate::Solver) operations.
///
/// Every variant carries the offending object so callers can recover it for
/// diagnostics. `add_constraint` and `add_edit_variable` are transactional:
/// on any `Err`, the solver's persistent state is unchanged.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// The constraint is already present in the solver.
    #[error("constraint already added to the solver")]
    DuplicateConstraint(Constraint),

    /// The constraint was not found in the solver.
    #[error("constraint not found in the solver")]
    UnknownConstraint(Constraint),

    /// The variable is already registered as an edit variable.
    #[error("variable '{}' is already an edit variable", .0.name())]
    DuplicateEditVariable(Variable),

    /// The variable is not registered as an edit variable.
    #[error("variable '{}' is not an edit variable", .0.name())]
    UnknownEditVariable(Variable),

    /// `REQUIRED` strength was used where only a soft strength is allowed.
    #[error("REQUIRED strength is not allowed here")]
    BadRequiredStrength,

    /// A required constraint is inconsistent with the required constraints
    /// already in the solver.
    #[error("constraint is unsatisfiable given the solver's required constraints")]
    UnsatisfiableConstraint(Constraint),

    /// An internal invariant was violated; indicates a solver bug rather
    /// than a user error.
    #[error("internal solver error: {0}")]
    InternalSolverError(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;
