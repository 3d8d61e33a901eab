//! [`Constraint`]: a reduced expression, a relational operator, and a
//! clipped strength.

use crate::expr::Expression;
use crate::strength::Strength;

/// The relation between a constraint's expression and zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationalOperator {
    LessOrEqual,
    Equal,
    GreaterOrEqual,
}

/// An immutable `(expression, operator, strength)` triple: `expression OP 0`.
///
/// Constructing a `Constraint` reduces its expression (merging terms that
/// share a variable, in order of first occurrence) and clips its strength
/// into `[0, REQUIRED]`. `Constraint`s compare by identity of their reduced
/// content for the solver's duplicate-detection table (derived `PartialEq`
/// over the reduced expression, operator, and strength).
#[derive(Debug, Clone)]
pub struct Constraint {
    pub(crate) expression: Expression,
    pub operator: RelationalOperator,
    pub strength: Strength,
}

impl Constraint {
    pub(crate) fn new(expression: Expression, operator: RelationalOperator, strength: Strength) -> Self {
        Constraint { expression: expression.reduce_terms(), operator, strength: Strength::new(strength.value()) }
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    /// A stable key by which this constraint can be recognized as "the
    /// same" constraint for duplicate/membership checks: its reduced terms'
    /// variable identities plus coefficients, constant, and operator. Two
    /// constraints built from the same variables, coefficients, constant
    /// and operator collide regardless of strength, matching how
    /// `add_constraint` is expected to reject re-adding an already-present
    /// constraint even if its strength differs on the second attempt.
    pub(crate) fn key(&self) -> ConstraintKey {
        let mut terms: Vec<(usize, u64)> = self
            .expression
            .terms
            .iter()
            .map(|t| (t.variable.identity(), t.coefficient.to_bits()))
            .collect();
        terms.sort_unstable();
        ConstraintKey { terms, constant_bits: self.expression.constant.to_bits(), operator: self.operator }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ConstraintKey {
    terms: Vec<(usize, u64)>,
    constant_bits: u64,
    operator: RelationalOperator,
}
