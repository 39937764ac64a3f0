use crate::SnapRule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Settling,
    Active,
    Unmounted,
}

/// Owns the single global snap rule for one page lifetime.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnapCoordinator {
    phase: Phase,
    rule: Option<SnapRule>,
}

impl SnapCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rule(&self) -> Option<&SnapRule> {
        self.rule.as_ref()
    }

    /// Applies the installed rule, or passes `value` through when none is installed.
    pub fn snap_to(&self, value: f64) -> f64 {
        match &self.rule {
            Some(rule) => rule.snap_to(value),
            None => value,
        }
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    pub(crate) fn replace_rule(&mut self, rule: Option<SnapRule>) -> Option<SnapRule> {
        std::mem::replace(&mut self.rule, rule)
    }
}
