//! Tagged identifiers for tableau columns.
//!
//! Every quantity the solver pivots on — a user variable, a slack, an error
//! penalty, or a dummy marker — is represented uniformly as a `Symbol`: a
//! small `Copy` struct pairing a role tag with a unique id, cheap to use as
//! a map key.

use std::fmt;

/// The role a [`Symbol`] plays in the tableau.
///
/// Variant order is significant: it defines the tie-break used when several
/// rows qualify as the leaving row during a pivot (see [`Symbol`]'s `Ord`
/// impl). Role order is Invalid < External < Slack < Error < Dummy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub(crate) enum Role {
    /// Sentinel role; all `Invalid` symbols compare equal regardless of id.
    Invalid = 0,
    /// A column corresponding to a user [`crate::Variable`].
    External = 1,
    /// A non-negative column introduced by an inequality.
    Slack = 2,
    /// A penalty column for a soft constraint's violation.
    Error = 3,
    /// A zero-cost marker column for a required equality.
    Dummy = 4,
}

/// A tagged column identifier: a [`Role`] plus a unique id.
///
/// `Invalid` symbols compare equal to one another regardless of id (there is
/// only ever one meaningful "no symbol" value); distinct roles with the same
/// id are always distinct symbols.
#[derive(Clone, Copy, Eq, Hash)]
pub(crate) struct Symbol {
    role: Role,
    id: u64,
}

impl Symbol {
    pub(crate) const INVALID: Symbol = Symbol { role: Role::Invalid, id: 0 };

    pub(crate) fn new(role: Role, id: u64) -> Self {
        Symbol { role, id }
    }

    pub(crate) fn role(self) -> Role {
        self.role
    }

    pub(crate) fn is_invalid(self) -> bool {
        self.role == Role::Invalid
    }

    pub(crate) fn is_external(self) -> bool {
        self.role == Role::External
    }

    pub(crate) fn is_slack(self) -> bool {
        self.role == Role::Slack
    }

    pub(crate) fn is_error(self) -> bool {
        self.role == Role::Error
    }

    pub(crate) fn is_dummy(self) -> bool {
        self.role == Role::Dummy
    }

    /// Slack and error symbols are the only ones that may leave the basis
    /// when installing a new row without resorting to an artificial variable.
    pub(crate) fn is_pivotable(self) -> bool {
        self.is_slack() || self.is_error()
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        match (self.role, other.role) {
            (Role::Invalid, Role::Invalid) => true,
            (Role::Invalid, _) | (_, Role::Invalid) => false,
            _ => self.role == other.role && self.id == other.id,
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.role.cmp(&other.role).then(self.id.cmp(&other.id))
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role {
            Role::Invalid => write!(f, "inv"),
            Role::External => write!(f, "v{}", self.id),
            Role::Slack => write!(f, "s{}", self.id),
            Role::Error => write!(f, "e{}", self.id),
            Role::Dummy => write!(f, "d{}", self.id),
        }
    }
}

/// Monotonic issuer of unique [`Symbol`]s for one solver's lifetime.
#[derive(Debug, Default)]
pub(crate) struct SymbolGenerator {
    next_id: u64,
}

impl SymbolGenerator {
    pub(crate) fn next(&mut self, role: Role) -> Symbol {
        let id = self.next_id;
        self.next_id += 1;
        Symbol::new(role, id)
    }

    /// The id the next-issued symbol would get, without issuing it. Used to
    /// snapshot a solver before a speculative mutation.
    pub(crate) fn peek(&self) -> u64 {
        self.next_id
    }

    /// Roll the counter back to a value previously returned by `peek`.
    pub(crate) fn reset_to(&mut self, id: u64) {
        self.next_id = id;
    }
}
