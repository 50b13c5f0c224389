#![forbid(unsafe_code)]

//! Column width resolution for a cluster.
//!
//! The first width-bearing codepoint fixes the cluster's width. Joiners,
//! joined codepoints, and anything after the width is fixed contribute
//! nothing.

use crate::oracle::{UnicodeOracle, ZWJ};
use crate::policy::JoinScope;

/// Widest cluster the resolver reports, in columns.
pub const MAX_CLUSTER_WIDTH: usize = 2;

/// Outcome of feeding one codepoint to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthStep {
    /// Keep scanning.
    Continue,
    /// Whitespace control: the cluster ends after this codepoint at one column.
    ForceEnd,
    /// Control character outside the whitespace set.
    Prohibited,
}

/// Per-cluster width accumulator and join state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthState {
    columns: usize,
    joined: bool,
    after_joiner: bool,
    scope: JoinScope,
}

impl WidthState {
    #[must_use]
    pub const fn new(scope: JoinScope) -> Self {
        Self {
            columns: 0,
            joined: false,
            after_joiner: false,
            scope,
        }
    }

    /// Columns assigned so far; zero means not yet assigned.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Whether the join state is active.
    #[must_use]
    pub const fn joined(&self) -> bool {
        self.joined
    }

    /// Whether the last codepoint fed was a zero-width joiner.
    #[must_use]
    pub const fn ends_on_joiner(&self) -> bool {
        self.after_joiner
    }

    fn assign(&mut self, columns: usize) {
        if self.columns == 0 {
            self.columns = columns.min(MAX_CLUSTER_WIDTH);
        }
    }
}

/// Feed `ch` to the resolver.
///
/// On [`WidthStep::ForceEnd`] the accumulator is set to one column.
pub fn resolve<O>(oracle: &O, ch: char, state: &mut WidthState) -> WidthStep
where
    O: UnicodeOracle + ?Sized,
{
    if ch == ZWJ {
        state.joined = true;
        state.after_joiner = true;
        return WidthStep::Continue;
    }
    state.after_joiner = false;
    if state.joined {
        if state.scope == JoinScope::NextCodepoint {
            state.joined = false;
        }
        return WidthStep::Continue;
    }

    let columns = match oracle.width_of(ch) {
        Some(columns) => columns,
        None if oracle.is_whitespace_control(ch) => {
            state.columns = 1;
            return WidthStep::ForceEnd;
        }
        None if oracle.is_control(ch) => return WidthStep::Prohibited,
        // No width but not a control either: assume one column.
        None => 1,
    };
    state.assign(columns);
    WidthStep::Continue
}
