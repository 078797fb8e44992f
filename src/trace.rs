//! Step-by-step derivation traces emitted by the parser drivers.

use crate::error::GrammarError;
use std::fmt;

/// One row of a derivation trace: the driver's stack, the remaining
/// input, and the action taken at that configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceStep {
    /// Stack contents, bottom to top
    pub stack: String,
    /// Remaining input, lookahead first
    pub input: String,
    /// Action taken: `Match t`, `A → rhs`, `shift j`, `reduce A → rhs`,
    /// `accept`, or `error`
    pub action: String,
}

impl TraceStep {
    /// Creates a new trace step.
    pub fn new(
        stack: impl Into<String>,
        input: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            stack: stack.into(),
            input: input.into(),
            action: action.into(),
        }
    }
}

/// A complete parse run.
///
/// Drivers fail fast on the first stuck configuration; the steps up to and
/// including the failing one are always preserved.
#[derive(Debug)]
pub struct Trace {
    /// The recorded steps, in order
    pub steps: Vec<TraceStep>,
    /// `Ok(())` on accept, the failure otherwise
    pub result: Result<(), GrammarError>,
}

impl Trace {
    /// Whether the driver accepted the input.
    pub fn accepted(&self) -> bool {
        self.result.is_ok()
    }
}

impl fmt::Display for Trace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<30}{:<30}{}", "Stack", "Input", "Action")?;
        writeln!(f, "{}", "-".repeat(72))?;
        for step in &self.steps {
            writeln!(f, "{:<30}{:<30}{}", step.stack, step.input, step.action)?;
        }
        Ok(())
    }
}
