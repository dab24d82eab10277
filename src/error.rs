//! Error types for layout construction.
//!
//! All input validation happens when a simulation or packing run is built;
//! a constructed engine never fails at tick time. Failing to converge is
//! not an error — see [`Convergence`].

use thiserror::Error;

/// Rejected input, detected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A link references a node id that is not in the node set.
    #[error("link {index} references unknown node id `{id}`")]
    DanglingLink {
        /// Position of the offending link in the input list.
        index: usize,
        /// The unresolved node id.
        id: String,
    },

    /// A node was supplied with a NaN or infinite starting coordinate.
    #[error("node `{id}` has a non-finite initial position")]
    NonFinitePosition {
        /// The offending node id.
        id: String,
    },

    /// A tree leaf carried a negative weight.
    #[error("negative weight {value} at `{name}`")]
    NegativeWeight {
        /// Name of the offending tree node.
        name: String,
        /// The rejected value.
        value: f32,
    },

    /// A tree leaf carried a NaN or infinite weight.
    #[error("non-finite weight at `{name}`")]
    NonFiniteWeight {
        /// Name of the offending tree node.
        name: String,
    },
}

/// Outcome of driving a simulation to rest.
///
/// `Incomplete` is best-effort, not fatal: the layout computed so far is
/// still returned and the caller may re-run with relaxed parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convergence {
    /// Alpha reached the minimum (or the fixed iteration budget ran out,
    /// which is the normal end of a `FixedIterations` run).
    Settled {
        /// Ticks executed.
        ticks: u32,
    },
    /// The tick budget ran out before alpha reached the minimum.
    Incomplete {
        /// Ticks executed.
        ticks: u32,
    },
    /// The per-tick callback requested a stop.
    Cancelled {
        /// Ticks executed before cancellation.
        ticks: u32,
    },
}

impl Convergence {
    /// Whether the simulation came to rest on its own.
    pub fn is_settled(self) -> bool {
        matches!(self, Convergence::Settled { .. })
    }

    /// Ticks executed, regardless of outcome.
    pub fn ticks(self) -> u32 {
        match self {
            Convergence::Settled { ticks }
            | Convergence::Incomplete { ticks }
            | Convergence::Cancelled { ticks } => ticks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LayoutError::DanglingLink {
            index: 3,
            id: "ghost".to_string(),
        };
        assert_eq!(format!("{}", err), "link 3 references unknown node id `ghost`");
    }

    #[test]
    fn test_convergence_accessors() {
        assert!(Convergence::Settled { ticks: 12 }.is_settled());
        assert!(!Convergence::Incomplete { ticks: 500 }.is_settled());
        assert_eq!(Convergence::Cancelled { ticks: 7 }.ticks(), 7);
    }
}
