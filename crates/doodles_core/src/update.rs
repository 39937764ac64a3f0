use doodles_logging::doodles_debug;

use crate::{Phase, PinnedSection, SnapCoordinator, SnapEffect, SnapMsg, SnapRule, SETTLE_DELAY};

/// Pure update function: applies a message to the coordinator and returns any effects.
pub fn update(mut state: SnapCoordinator, msg: SnapMsg) -> (SnapCoordinator, Vec<SnapEffect>) {
    if state.phase() == Phase::Unmounted {
        return (state, Vec::new());
    }

    let effects = match msg {
        SnapMsg::Mounted => {
            if state.phase() == Phase::Idle {
                state.set_phase(Phase::Settling);
                vec![SnapEffect::ScheduleSettle(SETTLE_DELAY)]
            } else {
                Vec::new()
            }
        }
        SnapMsg::SettleElapsed {
            sections,
            max_scroll,
        } => {
            if state.phase() != Phase::Settling {
                return (state, Vec::new());
            }
            state.set_phase(Phase::Active);
            let rule = build_rule(&sections, max_scroll);
            state.replace_rule(rule.clone());
            match rule {
                Some(rule) => vec![SnapEffect::InstallSnap(rule)],
                None => Vec::new(),
            }
        }
        SnapMsg::Resized => match state.phase() {
            Phase::Settling | Phase::Active => vec![SnapEffect::RefreshTriggers],
            Phase::Idle | Phase::Unmounted => Vec::new(),
        },
        SnapMsg::Remeasured {
            sections,
            max_scroll,
        } => {
            if state.phase() != Phase::Active {
                return (state, Vec::new());
            }
            let next = build_rule(&sections, max_scroll);
            if state.rule() == next.as_ref() {
                return (state, Vec::new());
            }
            let previous = state.replace_rule(next.clone());
            let mut effects = Vec::with_capacity(2);
            if previous.is_some() {
                effects.push(SnapEffect::RemoveSnap);
            }
            if let Some(rule) = next {
                effects.push(SnapEffect::InstallSnap(rule));
            }
            effects
        }
        SnapMsg::Unmounted => {
            let mut effects = Vec::new();
            if state.phase() == Phase::Settling {
                effects.push(SnapEffect::CancelSettle);
            }
            if state.replace_rule(None).is_some() {
                effects.push(SnapEffect::RemoveSnap);
            }
            state.set_phase(Phase::Unmounted);
            effects
        }
    };

    (state, effects)
}

fn build_rule(sections: &[PinnedSection], max_scroll: f64) -> Option<SnapRule> {
    let rule = SnapRule::from_sections(sections, max_scroll);
    match &rule {
        Some(rule) => doodles_debug!(
            "snap rule built from {} pinned section(s), max_scroll={}",
            rule.ranges().len(),
            max_scroll
        ),
        None => doodles_debug!(
            "no snap rule: {} pinned section(s), max_scroll={}; free scroll everywhere",
            sections.len(),
            max_scroll
        ),
    }
    rule
}
