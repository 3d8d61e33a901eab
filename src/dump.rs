//! Debug-only tableau dump, kept separate from [`crate::solver`] so the
//! solver's core logic isn't cluttered with formatting concerns.

use std::fmt::{self, Write};

use crate::solver::Solver;

/// Render a snapshot of `solver`'s internal state: the live objective row,
/// every tableau row keyed by its basic symbol, every tracked variable's
/// current value, and the edit/constraint counts. Format is unstable and
/// exists for debugging, not for programmatic consumption.
pub(crate) fn render(solver: &Solver, out: &mut dyn Write) -> fmt::Result {
    writeln!(out, "objective: {:?}", solver.objective_for_dump())?;

    writeln!(out, "tableau ({} rows):", solver.rows_for_dump().len())?;
    for (basic, row) in solver.rows_for_dump() {
        writeln!(out, "  {basic:?} = {row:?}")?;
    }

    writeln!(out, "variables:")?;
    for (variable, symbol) in solver.variables_for_dump() {
        writeln!(out, "  {} ({:?}) = {}", variable.name(), symbol, variable.value())?;
    }

    writeln!(
        out,
        "edit variables: {}, constraints: {}, infeasible work-list: {:?}",
        solver.edit_count_for_dump(),
        solver.constraint_count_for_dump(),
        solver.infeasible_rows_for_dump(),
    )?;

    Ok(())
}
