//! The incremental Cassowary solver: tableau, add/remove protocol, primal
//! and dual optimization, and the edit-variable suggest-value path.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::constraint::{Constraint, ConstraintKey, RelationalOperator};
use crate::error::{Result, SolverError};
use crate::expr::{Expression, Variable, WithStrength};
use crate::row::{near_zero, Row, EPSILON};
use crate::strength::Strength;
use crate::symbol::{Role, Symbol, SymbolGenerator};

/// The marker (and, for soft equalities, the paired "other") symbol a
/// constraint introduced when it entered the tableau. Populated by
/// `create_row`, consumed by `remove_constraint`.
#[derive(Debug, Clone, Copy)]
struct Tag {
    marker: Symbol,
    other: Symbol,
}

impl Tag {
    const NONE: Tag = Tag { marker: Symbol::INVALID, other: Symbol::INVALID };
}

#[derive(Debug, Clone, Copy)]
struct ConstraintRecord {
    tag: Tag,
    strength: f64,
}

/// Per-edit-variable bookkeeping: the tag of its backing weak equality, that
/// constraint's table key, and the last value it was suggested with.
#[derive(Debug, Clone)]
struct EditInfo {
    tag: Tag,
    constraint_key: ConstraintKey,
    prev_value: f64,
}

/// A snapshot of every field `add_constraint` can mutate, so a failed
/// attempt can be rolled back and leave the solver exactly as it was.
struct Snapshot {
    objective: Row,
    rows: IndexMap<Symbol, Row>,
    var_symbols: HashMap<usize, (Variable, Symbol)>,
    constraints: HashMap<ConstraintKey, ConstraintRecord>,
    next_symbol_id: u64,
}

/// The incremental Cassowary constraint solver.
///
/// A `Solver` is a plain, non-thread-safe value: all operations are
/// synchronous, there is no internal locking, and `Variable` handles are
/// `Rc`-based, so a solver and the variables it manages must stay on one
/// thread. Multiple independent solvers may run on independent threads.
#[derive(Debug, Default)]
pub struct Solver {
    objective: Row,
    rows: IndexMap<Symbol, Row>,
    var_symbols: HashMap<usize, (Variable, Symbol)>,
    constraints: HashMap<ConstraintKey, ConstraintRecord>,
    edits: HashMap<usize, EditInfo>,
    infeasible_rows: Vec<Symbol>,
    symbol_gen: SymbolGenerator,
}

impl Solver {
    /// Create an empty solver.
    pub fn new() -> Self {
        Solver::default()
    }

    /// Reset the solver to the empty state, as if newly constructed. Does
    /// not touch the values already written into any `Variable` handles.
    pub fn reset(&mut self) {
        *self = Solver::new();
    }

    // ---- Public constraint protocol -----------------------------------

    /// True if an equivalent constraint (same reduced terms, constant, and
    /// operator) is already present, regardless of strength.
    pub fn has_constraint(&self, constraint: &Constraint) -> bool {
        self.constraints.contains_key(&constraint.key())
    }

    /// Add a constraint to the solver.
    ///
    /// Transactional: if this returns `Err`, the solver's state is exactly
    /// as it was before the call.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<()> {
        let key = constraint.key();
        if self.constraints.contains_key(&key) {
            return Err(SolverError::DuplicateConstraint(constraint));
        }

        let snapshot = self.snapshot();
        match self.try_add_constraint(&constraint, key) {
            Ok(()) => {
                tracing::trace!(rows = self.rows.len(), "constraint added");
                Ok(())
            }
            Err(err) => {
                tracing::debug!(%err, "add_constraint failed, rolling back");
                self.restore(snapshot);
                Err(err)
            }
        }
    }

    /// Remove a previously-added constraint.
    pub fn remove_constraint(&mut self, constraint: &Constraint) -> Result<()> {
        let key = constraint.key();
        let record = self.constraints.remove(&key).ok_or_else(|| SolverError::UnknownConstraint(constraint.clone()))?;
        self.remove_constraint_record(record)
    }

    // ---- Public edit-variable protocol ----------------------------------

    pub fn has_edit_variable(&self, variable: &Variable) -> bool {
        self.edits.contains_key(&variable.identity())
    }

    /// Register `variable` as editable at the given (non-required) strength.
    /// Internally adds the soft equality `variable == variable.value() | strength`.
    pub fn add_edit_variable(&mut self, variable: &Variable, strength: Strength) -> Result<()> {
        if strength.is_required() || strength.value() <= 0.0 {
            return Err(SolverError::BadRequiredStrength);
        }
        let identity = variable.identity();
        if self.edits.contains_key(&identity) {
            return Err(SolverError::DuplicateEditVariable(variable.clone()));
        }

        let initial = variable.value();
        let constraint = Expression::from_variable(variable.clone()).equal_to(initial).with_strength(strength);
        let key = constraint.key();
        self.add_constraint(constraint)?;

        let tag = self.constraints.get(&key).expect("just-added constraint is present").tag;
        self.edits.insert(identity, EditInfo { tag, constraint_key: key, prev_value: initial });
        Ok(())
    }

    pub fn remove_edit_variable(&mut self, variable: &Variable) -> Result<()> {
        let identity = variable.identity();
        let info = self
            .edits
            .remove(&identity)
            .ok_or_else(|| SolverError::UnknownEditVariable(variable.clone()))?;
        let record = self
            .constraints
            .remove(&info.constraint_key)
            .expect("edit variable's backing constraint must still exist");
        self.remove_constraint_record(record)
    }

    /// Suggest a new value for an edit variable, propagating the delta
    /// through the tableau and restoring feasibility via `dual_optimize`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn suggest_value(&mut self, variable: &Variable, value: f64) -> Result<()> {
        let identity = variable.identity();
        let (tag, prev_value) = {
            let info = self.edits.get(&identity).ok_or_else(|| SolverError::UnknownEditVariable(variable.clone()))?;
            (info.tag, info.prev_value)
        };

        let delta = value - prev_value;
        self.edits.get_mut(&identity).expect("checked above").prev_value = value;
        if near_zero(delta) {
            return Ok(());
        }

        if let Some(row) = self.rows.get_mut(&tag.marker) {
            row.add_constant(-delta);
            if row.constant < -EPSILON {
                self.infeasible_rows.push(tag.marker);
            }
        } else if let Some(row) = self.rows.get_mut(&tag.other) {
            row.add_constant(delta);
            if row.constant < -EPSILON {
                self.infeasible_rows.push(tag.other);
            }
        } else {
            let basics: Vec<Symbol> = self.rows.keys().copied().collect();
            for basic in basics {
                let row = self.rows.get_mut(&basic).expect("basic symbol listed from its own keys");
                let c_plus = row.coefficient(tag.marker);
                if !near_zero(c_plus) {
                    row.add_constant(c_plus * delta);
                    if row.constant < -EPSILON {
                        self.infeasible_rows.push(basic);
                    }
                }
                let c_minus = row.coefficient(tag.other);
                if !near_zero(c_minus) {
                    row.add_constant(-c_minus * delta);
                    if row.constant < -EPSILON {
                        self.infeasible_rows.push(basic);
                    }
                }
            }
        }

        tracing::trace!(delta, infeasible = self.infeasible_rows.len(), "suggest_value propagated");
        self.dual_optimize()
    }

    /// Write the solved value of every tracked external variable back into
    /// its `Variable` handle. The only place user-visible state is written.
    pub fn update_variables(&mut self) {
        for (variable, symbol) in self.var_symbols.values() {
            let value = self.rows.get(symbol).map(|row| row.constant).unwrap_or(0.0);
            variable.set_value(value);
        }
    }

    /// Render a human-readable dump of the tableau, objective, variable and
    /// edit maps, constraint count, and infeasibility work-list. Not part
    /// of the stable API; format may change at any time.
    pub fn dump(&self, out: &mut dyn std::fmt::Write) -> std::fmt::Result {
        crate::dump::render(self, out)
    }

    // ---- Internals: row construction -----------------------------------

    fn symbol_for_variable(&mut self, variable: &Variable) -> Symbol {
        let identity = variable.identity();
        if let Some((_, symbol)) = self.var_symbols.get(&identity) {
            return *symbol;
        }
        let symbol = self.symbol_gen.next(Role::External);
        self.var_symbols.insert(identity, (variable.clone(), symbol));
        symbol
    }

    /// Build a tableau row for `constraint`, normalized so a feasible basis
    /// has `row.constant >= 0`, plus the marker/other tag the row's slack,
    /// error, or dummy columns were tagged with.
    fn create_row(&mut self, constraint: &Constraint) -> (Row, Tag) {
        let mut row = Row::new(constraint.expression().constant);

        for term in &constraint.expression().terms {
            if near_zero(term.coefficient) {
                continue;
            }
            let symbol = self.symbol_for_variable(&term.variable);
            if let Some(basic_row) = self.rows.get(&symbol) {
                row.insert_row(basic_row, term.coefficient);
            } else {
                row.insert(symbol, term.coefficient);
            }
        }

        let mut tag = Tag::NONE;
        match constraint.operator {
            RelationalOperator::LessOrEqual | RelationalOperator::GreaterOrEqual => {
                let coeff = if constraint.operator == RelationalOperator::LessOrEqual { 1.0 } else { -1.0 };
                let slack = self.symbol_gen.next(Role::Slack);
                tag.marker = slack;
                row.set(slack, coeff);

                if !constraint.strength.is_required() {
                    let error = self.symbol_gen.next(Role::Error);
                    tag.other = error;
                    row.set(error, -coeff);
                    self.objective.insert(error, constraint.strength.value());
                }
            }
            RelationalOperator::Equal => {
                if constraint.strength.is_required() {
                    let dummy = self.symbol_gen.next(Role::Dummy);
                    tag.marker = dummy;
                    row.set(dummy, 1.0);
                } else {
                    let error_plus = self.symbol_gen.next(Role::Error);
                    let error_minus = self.symbol_gen.next(Role::Error);
                    tag.marker = error_plus;
                    tag.other = error_minus;
                    row.set(error_plus, -1.0);
                    row.set(error_minus, 1.0);
                    self.objective.insert(error_plus, constraint.strength.value());
                    self.objective.insert(error_minus, constraint.strength.value());
                }
            }
        }

        if row.constant < 0.0 {
            row.reverse_sign();
        }

        (row, tag)
    }

    fn choose_subject(row: &Row, tag: &Tag) -> Option<Symbol> {
        for (symbol, _) in row.iter() {
            if symbol.is_external() {
                return Some(symbol);
            }
        }
        if tag.marker.is_pivotable() && row.coefficient(tag.marker) < -EPSILON {
            return Some(tag.marker);
        }
        if tag.other.is_pivotable() && row.coefficient(tag.other) < -EPSILON {
            return Some(tag.other);
        }
        None
    }

    // ---- Internals: add/remove protocol ---------------------------------

    fn try_add_constraint(&mut self, constraint: &Constraint, key: ConstraintKey) -> Result<()> {
        let (mut row, tag) = self.create_row(constraint);
        let subject = Self::choose_subject(&row, &tag);

        if let Some(subject) = subject {
            row.solve_for(subject);
            self.substitute_everywhere(subject, &row);
            self.rows.insert(subject, row);
        } else if row.iter().all(|(symbol, _)| symbol.is_dummy()) {
            if !near_zero(row.constant) {
                return Err(SolverError::UnsatisfiableConstraint(constraint.clone()));
            }
            // The constraint is redundant with what's already required; it
            // is still tracked so `has_constraint`/`remove_constraint` see it.
        } else {
            let feasible = self.add_with_artificial_variable(row)?;
            if !feasible {
                return Err(SolverError::UnsatisfiableConstraint(constraint.clone()));
            }
        }

        self.constraints.insert(key, ConstraintRecord { tag, strength: constraint.strength.value() });
        self.optimize()
    }

    /// Phase-1: introduce an artificial variable standing for `row`, drive
    /// it to zero by minimizing it as its own objective, then eliminate its
    /// column entirely. Returns whether the row was feasible (driven to 0).
    fn add_with_artificial_variable(&mut self, row: Row) -> Result<bool> {
        let art = self.symbol_gen.next(Role::Slack);

        let mut art_row = Row::new(row.constant);
        let mut artificial_objective = Row::new(-row.constant);
        for (symbol, coeff) in row.iter() {
            if symbol.is_dummy() {
                continue;
            }
            art_row.set(symbol, coeff);
            artificial_objective.set(symbol, -coeff);
        }

        self.rows.insert(art, art_row);
        self.optimize_artificial(&mut artificial_objective)?;
        let feasible = near_zero(artificial_objective.constant);

        if let Some(mut leftover) = self.rows.remove(&art) {
            if !leftover.is_empty_of_cells() {
                let entering = leftover.iter().map(|(symbol, _)| symbol).min().expect("row has at least one cell");
                leftover.solve_for_pivot(art, entering);
                self.substitute_everywhere(entering, &leftover);
                self.rows.insert(entering, leftover);
            }
        }

        for row in self.rows.values_mut() {
            row.remove(art);
        }
        self.objective.remove(art);

        Ok(feasible)
    }

    fn remove_constraint_record(&mut self, record: ConstraintRecord) -> Result<()> {
        self.remove_constraint_effects(record.tag, record.strength);

        if self.rows.remove(&record.tag.marker).is_none() {
            let leaving = self.find_leaving_row_for_marker(record.tag.marker)?;
            let mut row = self.rows.remove(&leaving).expect("leaving row is basic");
            row.solve_for_pivot(leaving, record.tag.marker);
            self.substitute_everywhere(record.tag.marker, &row);
            // `row` (now expressing the old `leaving` symbol) is deliberately
            // dropped rather than reinserted: the marker is leaving the
            // problem for good, not becoming a real basic variable.
        }

        for row in self.rows.values_mut() {
            if record.tag.marker.is_error() {
                row.remove(record.tag.marker);
            }
            if record.tag.other.is_error() {
                row.remove(record.tag.other);
            }
        }

        self.optimize()
    }

    /// Undo the objective contribution a constraint's error symbols made
    /// when it was created, whether those symbols are currently basic
    /// (subtract `strength * their row`) or not (subtract `strength`
    /// directly from their own column).
    fn remove_constraint_effects(&mut self, tag: Tag, strength: f64) {
        if tag.marker.is_error() {
            self.subtract_error_column(tag.marker, strength);
        }
        if tag.other.is_error() {
            self.subtract_error_column(tag.other, strength);
        }
    }

    fn subtract_error_column(&mut self, symbol: Symbol, strength: f64) {
        if let Some(row) = self.rows.get(&symbol).cloned() {
            self.objective.insert_row(&row, -strength);
        } else {
            self.objective.insert(symbol, -strength);
        }
    }

    /// Find the row to pivot `marker` into when it must leave the problem
    /// but isn't currently basic: the smallest non-negative ratio of
    /// `row.constant / row.coefficient(marker)`, preferring Error-basic rows
    /// over External-basic rows on a tie (keeps external variables
    /// feasible), then the lower `Symbol` for full determinism.
    fn find_leaving_row_for_marker(&self, marker: Symbol) -> Result<Symbol> {
        let mut best: Option<(f64, Symbol)> = None;
        for (&basic, row) in &self.rows {
            let coeff = row.coefficient(marker);
            if near_zero(coeff) {
                continue;
            }
            let ratio = row.constant / coeff;
            if ratio < -EPSILON {
                continue;
            }
            let ratio = ratio.max(0.0);
            let take = match best {
                None => true,
                Some((best_ratio, best_symbol)) => {
                    if ratio < best_ratio - EPSILON {
                        true
                    } else if (ratio - best_ratio).abs() <= EPSILON {
                        tie_break_rank(basic) < tie_break_rank(best_symbol)
                            || (tie_break_rank(basic) == tie_break_rank(best_symbol) && basic < best_symbol)
                    } else {
                        false
                    }
                }
            };
            if take {
                best = Some((ratio, basic));
            }
        }
        best.map(|(_, symbol)| symbol)
            .ok_or_else(|| SolverError::InternalSolverError("no leaving row found while removing a constraint".into()))
    }

    // ---- Internals: pivot machinery shared by primal and dual phases ----

    fn substitute_everywhere(&mut self, symbol: Symbol, row: &Row) {
        for r in self.rows.values_mut() {
            r.substitute(symbol, row);
        }
        self.objective.substitute(symbol, row);
    }

    /// Exchange `leaving` out of the basis and `entering` in, substituting
    /// the resulting row through the whole tableau, the live objective, and
    /// (during phase 1) the standalone artificial objective.
    fn pivot(&mut self, leaving: Symbol, entering: Symbol, extra_objective: Option<&mut Row>) {
        let mut row = self.rows.remove(&leaving).expect("leaving row must be basic");
        row.solve_for_pivot(leaving, entering);
        self.substitute_everywhere(entering, &row);
        if let Some(extra) = extra_objective {
            extra.substitute(entering, &row);
        }
        self.rows.insert(entering, row);
    }

    fn find_entering(objective: &Row) -> Option<Symbol> {
        let mut best: Option<(f64, Symbol)> = None;
        for (symbol, coeff) in objective.iter() {
            if symbol.is_dummy() || coeff >= -EPSILON {
                continue;
            }
            best = Some(match best {
                None => (coeff, symbol),
                Some((best_coeff, best_symbol)) => {
                    if coeff < best_coeff - EPSILON || ((coeff - best_coeff).abs() <= EPSILON && symbol < best_symbol) {
                        (coeff, symbol)
                    } else {
                        (best_coeff, best_symbol)
                    }
                }
            });
        }
        best.map(|(_, symbol)| symbol)
    }

    /// The standard primal ratio test: the basic row with a strictly
    /// negative coefficient on `entering` that minimizes `constant /
    /// -coefficient`, excluding External-basic rows (they may never leave).
    fn find_leaving_primal(&self, entering: Symbol) -> Result<Symbol> {
        let mut best: Option<(f64, Symbol)> = None;
        for (&basic, row) in &self.rows {
            if basic.is_external() {
                continue;
            }
            let coeff = row.coefficient(entering);
            if coeff < -EPSILON {
                let ratio = row.constant / -coeff;
                best = Some(match best {
                    None => (ratio, basic),
                    Some((best_ratio, best_symbol)) => {
                        if ratio < best_ratio - EPSILON || ((ratio - best_ratio).abs() <= EPSILON && basic < best_symbol) {
                            (ratio, basic)
                        } else {
                            (best_ratio, best_symbol)
                        }
                    }
                });
            }
        }
        best.map(|(_, symbol)| symbol)
            .ok_or_else(|| SolverError::InternalSolverError("objective is unbounded".into()))
    }

    /// Primal simplex over the live objective row (spec ​§4.5).
    fn optimize(&mut self) -> Result<()> {
        loop {
            let Some(entering) = Self::find_entering(&self.objective) else {
                return Ok(());
            };
            let leaving = self.find_leaving_primal(entering)?;
            self.pivot(leaving, entering, None);
        }
    }

    /// Primal simplex over a standalone phase-1 artificial objective.
    fn optimize_artificial(&mut self, artificial: &mut Row) -> Result<()> {
        loop {
            let Some(entering) = Self::find_entering(artificial) else {
                return Ok(());
            };
            let leaving = self.find_leaving_primal(entering)?;
            self.pivot(leaving, entering, Some(artificial));
        }
    }

    /// Restore primal feasibility after a mutation (typically
    /// `suggest_value`) left some basic rows with a negative constant
    /// (spec §4.6).
    fn dual_optimize(&mut self) -> Result<()> {
        while let Some(leaving) = self.infeasible_rows.pop() {
            let still_infeasible = matches!(self.rows.get(&leaving), Some(row) if row.constant < -EPSILON);
            if !still_infeasible {
                continue;
            }

            let cells: Vec<(Symbol, f64)> = self.rows.get(&leaving).expect("checked above").iter().collect();
            let mut best: Option<(f64, Symbol)> = None;
            for (symbol, coeff) in cells {
                if symbol.is_dummy() || coeff >= -EPSILON {
                    continue;
                }
                let ratio = self.objective.coefficient(symbol) / coeff;
                best = Some(match best {
                    None => (ratio, symbol),
                    Some((best_ratio, best_symbol)) => {
                        if ratio < best_ratio - EPSILON || ((ratio - best_ratio).abs() <= EPSILON && symbol < best_symbol) {
                            (ratio, symbol)
                        } else {
                            (best_ratio, best_symbol)
                        }
                    }
                });
            }

            let entering = best
                .map(|(_, symbol)| symbol)
                .ok_or_else(|| SolverError::InternalSolverError("dual optimize found no entering candidate".into()))?;
            self.pivot(leaving, entering, None);
        }
        Ok(())
    }

    // ---- Internals: transactional snapshot/restore ----------------------

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            objective: self.objective.clone(),
            rows: self.rows.clone(),
            var_symbols: self.var_symbols.clone(),
            constraints: self.constraints.clone(),
            next_symbol_id: self.symbol_gen.peek(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.objective = snapshot.objective;
        self.rows = snapshot.rows;
        self.var_symbols = snapshot.var_symbols;
        self.constraints = snapshot.constraints;
        self.symbol_gen.reset_to(snapshot.next_symbol_id);
    }

    pub(crate) fn objective_for_dump(&self) -> &Row {
        &self.objective
    }

    pub(crate) fn rows_for_dump(&self) -> &IndexMap<Symbol, Row> {
        &self.rows
    }

    pub(crate) fn variables_for_dump(&self) -> impl Iterator<Item = (&Variable, Symbol)> {
        self.var_symbols.values().map(|(v, s)| (v, *s))
    }

    pub(crate) fn edit_count_for_dump(&self) -> usize {
        self.edits.len()
    }

    pub(crate) fn constraint_count_for_dump(&self) -> usize {
        self.constraints.len()
    }

    pub(crate) fn infeasible_rows_for_dump(&self) -> &[Symbol] {
        &self.infeasible_rows
    }
}

/// Secondary tie-break rank used by [`Solver::find_leaving_row_for_marker`]:
/// Error rows are preferred over External rows (to preserve external
/// feasibility), with Slack/Dummy ranked in between since they carry no
/// user-visible value either way.
fn tie_break_rank(symbol: Symbol) -> u8 {
    match symbol.role() {
        Role::Error => 0,
        Role::Slack | Role::Dummy => 1,
        Role::External => 2,
        Role::Invalid => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strength::Strength;

    fn var(name: &str) -> Variable {
        Variable::new(name)
    }

    /// Installs a subscriber so `#[tracing::instrument]`'d solver calls are
    /// visible under `cargo test -- --nocapture`; harmless to call from
    /// every test since the second and later calls are no-ops.
    fn init_tracing() {
        let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("cassowary=trace").try_init();
    }

    #[test]
    fn centering_scenario() {
        init_tracing();
        let mut solver = Solver::new();
        let x_l = var("x_l");
        let x_r = var("x_r");
        let x_m = var("x_m");
        let w = var("w");

        solver.add_constraint((x_l.clone() + 10.0).less_than_or_equal_to(x_r.clone())).unwrap();
        solver
            .add_constraint(Expression::from(x_m.clone()).equal_to((x_l.clone() + x_r.clone()) / 2.0))
            .unwrap();
        solver.add_constraint((x_r.clone() - x_l.clone()).equal_to(w.clone())).unwrap();
        solver.add_constraint(Expression::from(x_l.clone()).greater_than_or_equal_to(0.0)).unwrap();

        solver.add_edit_variable(&w, Strength::STRONG).unwrap();
        solver.suggest_value(&w, 100.0).unwrap();
        solver.update_variables();

        assert!((x_l.value() - 0.0).abs() < 1e-6);
        assert!((x_r.value() - 100.0).abs() < 1e-6);
        assert!((x_m.value() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn stay_priority_scenario() {
        let mut solver = Solver::new();
        let a = var("a");
        let b = var("b");

        solver.add_constraint((a.clone() + b.clone()).equal_to(20.0)).unwrap();
        solver.add_constraint(Expression::from(a.clone()).equal_to(0.0).with_strength(Strength::WEAK)).unwrap();
        solver.add_constraint(Expression::from(b.clone()).equal_to(0.0).with_strength(Strength::WEAK)).unwrap();

        solver.update_variables();
        assert!((a.value() + b.value() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn unsatisfiable_required_leaves_state_unchanged() {
        let mut solver = Solver::new();
        let x = var("x");

        let c1 = Expression::from(x.clone()).greater_than_or_equal_to(10.0);
        solver.add_constraint(c1.clone()).unwrap();

        let c2 = Expression::from(x.clone()).less_than_or_equal_to(5.0);
        let err = solver.add_constraint(c2.clone());
        assert!(matches!(err, Err(SolverError::UnsatisfiableConstraint(_))));

        assert!(solver.has_constraint(&c1));
        assert!(!solver.has_constraint(&c2));

        solver.update_variables();
        assert!(x.value() >= 10.0 - 1e-6);
    }

    #[test]
    fn suggest_value_on_unknown_variable_errors() {
        let mut solver = Solver::new();
        let x = var("x");
        let err = solver.suggest_value(&x, 5.0);
        assert!(matches!(err, Err(SolverError::UnknownEditVariable(_))));
    }

    #[test]
    fn remove_restores_previous_solution() {
        let mut solver = Solver::new();
        let a = var("a");

        solver.add_constraint(Expression::from(a.clone()).equal_to(0.0).with_strength(Strength::STRONG)).unwrap();
        let required = Expression::from(a.clone()).equal_to(5.0);
        solver.add_constraint(required.clone()).unwrap();

        solver.update_variables();
        assert!((a.value() - 5.0).abs() < 1e-6);

        solver.remove_constraint(&required).unwrap();
        solver.update_variables();
        assert!((a.value() - 0.0).abs() < 1e-6);
    }

    #[test]
    fn strength_ordering_prefers_stronger_constraint() {
        let mut solver = Solver::new();
        let a = var("a");

        solver.add_constraint(Expression::from(a.clone()).equal_to(10.0).with_strength(Strength::WEAK)).unwrap();
        solver.add_constraint(Expression::from(a.clone()).equal_to(20.0).with_strength(Strength::MEDIUM)).unwrap();

        solver.update_variables();
        assert!((a.value() - 20.0).abs() < 1e-6);
    }

    #[test]
    fn duplicate_constraint_is_rejected() {
        let mut solver = Solver::new();
        let x = var("x");
        let c = Expression::from(x).equal_to(1.0);
        solver.add_constraint(c.clone()).unwrap();
        assert!(matches!(solver.add_constraint(c), Err(SolverError::DuplicateConstraint(_))));
    }

    #[test]
    fn unknown_constraint_removal_is_rejected() {
        let mut solver = Solver::new();
        let x = var("x");
        let c = Expression::from(x).equal_to(1.0);
        assert!(matches!(solver.remove_constraint(&c), Err(SolverError::UnknownConstraint(_))));
    }

    #[test]
    fn required_strength_rejected_for_edit_variables() {
        let mut solver = Solver::new();
        let x = var("x");
        assert!(matches!(
            solver.add_edit_variable(&x, Strength::REQUIRED),
            Err(SolverError::BadRequiredStrength)
        ));
    }

    #[test]
    fn duplicate_edit_variable_is_rejected() {
        let mut solver = Solver::new();
        let x = var("x");
        solver.add_edit_variable(&x, Strength::STRONG).unwrap();
        assert!(matches!(
            solver.add_edit_variable(&x, Strength::STRONG),
            Err(SolverError::DuplicateEditVariable(_))
        ));
    }

    #[test]
    fn remove_edit_variable_then_unknown() {
        let mut solver = Solver::new();
        let x = var("x");
        solver.add_edit_variable(&x, Strength::STRONG).unwrap();
        solver.remove_edit_variable(&x).unwrap();
        assert!(matches!(solver.remove_edit_variable(&x), Err(SolverError::UnknownEditVariable(_))));
    }

    #[test]
    fn suggest_value_converges_when_feasible() {
        let mut solver = Solver::new();
        let x = var("x");
        solver.add_constraint(Expression::from(x.clone()).greater_than_or_equal_to(0.0)).unwrap();
        solver.add_edit_variable(&x, Strength::STRONG).unwrap();

        for target in [5.0, 42.0, -3.0_f64.max(0.0), 17.5] {
            solver.suggest_value(&x, target).unwrap();
            solver.update_variables();
            assert!((x.value() - target).abs() < 1e-6, "expected {target}, got {}", x.value());
        }
    }

    #[test]
    fn inequality_with_weak_equality_preference() {
        let mut solver = Solver::new();
        let x = var("x");
        solver.add_constraint(Expression::from(x.clone()).greater_than_or_equal_to(50.0)).unwrap();
        solver.add_constraint(Expression::from(x.clone()).equal_to(100.0).with_strength(Strength::WEAK)).unwrap();

        solver.update_variables();
        assert!(x.value() >= 50.0 - 1e-6);
    }

    #[test]
    fn reset_clears_all_state() {
        let mut solver = Solver::new();
        let x = var("x");
        solver.add_constraint(Expression::from(x.clone()).equal_to(5.0)).unwrap();
        solver.reset();
        assert!(!solver.has_constraint(&Expression::from(x).equal_to(5.0)));
    }
}
