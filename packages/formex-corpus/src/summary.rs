//! Success/failure counters accumulated over one build.

use std::fmt;

/// Counts for one named step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepCounter {
    pub name: String,
    pub ok: usize,
    pub failed: usize,
}

/// Step counters in the order the steps first reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    steps: Vec<StepCounter>,
}

impl PipelineSummary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the counter for a named step.
    pub fn counter(&mut self, name: &str) -> &mut StepCounter {
        let index = match self.steps.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.steps.push(StepCounter {
                    name: name.to_string(),
                    ..StepCounter::default()
                });
                self.steps.len() - 1
            }
        };
        &mut self.steps[index]
    }

    pub fn steps(&self) -> &[StepCounter] {
        &self.steps
    }

    /// Whether any step recorded a failure.
    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|s| s.failed > 0)
    }

    /// Log one line per step.
    pub fn log(&self) {
        for step in &self.steps {
            tracing::info!(step = %step.name, ok = step.ok, failed = step.failed, "Step summary");
        }
    }
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            write!(f, "{}: {} ok", step.name, step.ok)?;
            if step.failed > 0 {
                write!(f, "  {} failed", step.failed)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
