use std::time::Duration;

use crate::SnapRule;

/// Side effects the host page performs on behalf of the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapEffect {
    /// Start the settle timer.
    ScheduleSettle(Duration),
    /// Clear a pending settle timer.
    CancelSettle,
    /// Install the global snap rule.
    InstallSnap(SnapRule),
    /// Remove the currently installed global snap rule.
    RemoveSnap,
    /// Ask the scroll-tracking layer to recompute trigger positions.
    RefreshTriggers,
}
