use std::cmp::Ordering;
use std::time::Duration;

/// Half-width of the band around each pinned range inside which snapping applies.
pub const SNAP_BUFFER: f64 = 0.02;

/// Delay after mount before pinned sections are sampled.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// A pinned section as registered by the scroll-tracking layer, in absolute scroll units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedSection {
    pub start: f64,
    pub end: Option<f64>,
}

impl PinnedSection {
    pub fn new(start: f64, end: Option<f64>) -> Self {
        Self { start, end }
    }
}

/// A pinned section normalized to scroll fractions of the total extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinnedRange {
    pub start: f64,
    pub end: f64,
    pub center: f64,
}

impl PinnedRange {
    fn from_section(section: &PinnedSection, max_scroll: f64) -> Self {
        let end = section
            .end
            .filter(|end| end.is_finite())
            .unwrap_or(section.start)
            .max(section.start);
        let start = section.start / max_scroll;
        let end = end / max_scroll;
        Self {
            start,
            end,
            center: start + (end - start) * 0.5,
        }
    }

    pub fn contains_buffered(&self, value: f64, buffer: f64) -> bool {
        value >= self.start - buffer && value <= self.end + buffer
    }
}

/// Easing curve for the snap tween (`power2.out` in the animation layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Power2Out,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        match self {
            Ease::Power2Out => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Tuning for the snap tween. Carries no correctness invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    pub duration_min: Duration,
    pub duration_max: Duration,
    pub delay: Duration,
    pub ease: Ease,
}

impl Default for SnapAnimation {
    fn default() -> Self {
        Self {
            duration_min: Duration::from_millis(150),
            duration_max: Duration::from_millis(350),
            delay: Duration::ZERO,
            ease: Ease::Power2Out,
        }
    }
}

impl SnapAnimation {
    /// Tween duration for a snap covering `distance` (a scroll fraction).
    pub fn duration_for(&self, distance: f64) -> Duration {
        let t = distance.abs();
        let t = if t.is_finite() { t.min(1.0) } else { 0.0 };
        let eased = self.ease.apply(t);
        let max = self.duration_max.max(self.duration_min);
        if eased <= 0.0 {
            return self.duration_min;
        }
        if eased >= 1.0 {
            return max;
        }
        self.duration_min + (max - self.duration_min).mul_f64(eased)
    }
}

/// Where a scroll release should settle and how long the tween takes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPlan {
    pub target: f64,
    pub duration: Duration,
}

/// The single global snap rule built from every pinned section on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapRule {
    ranges: Vec<PinnedRange>,
    buffer: f64,
    animation: SnapAnimation,
}

impl SnapRule {
    /// Builds the rule, or `None` when there is nothing to snap to.
    ///
    /// `max_scroll` must be a positive, finite extent; sections with a
    /// non-finite start are ignored.
    pub fn from_sections(sections: &[PinnedSection], max_scroll: f64) -> Option<Self> {
        if !(max_scroll.is_finite() && max_scroll > 0.0) {
            return None;
        }

        let mut ordered: Vec<&PinnedSection> =
            sections.iter().filter(|s| s.start.is_finite()).collect();
        if ordered.is_empty() {
            return None;
        }
        // Stable: equal starts keep registration order.
        ordered.sort_by(|a, b| a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal));

        let ranges = ordered
            .into_iter()
            .map(|section| PinnedRange::from_section(section, max_scroll))
            .collect();

        Some(Self {
            ranges,
            buffer: SNAP_BUFFER,
            animation: SnapAnimation::default(),
        })
    }

    pub fn ranges(&self) -> &[PinnedRange] {
        &self.ranges
    }

    pub fn buffer(&self) -> f64 {
        self.buffer
    }

    pub fn animation(&self) -> &SnapAnimation {
        &self.animation
    }

    /// Maps a scroll fraction to its snap target.
    ///
    /// Values outside every buffered range pass through unchanged. Otherwise the
    /// center nearest to `value` wins; on an exact tie the earlier range wins.
    pub fn snap_to(&self, value: f64) -> f64 {
        let in_pinned = self
            .ranges
            .iter()
            .any(|range| range.contains_buffered(value, self.buffer));
        if !in_pinned {
            return value;
        }

        let Some(first) = self.ranges.first() else {
            return value;
        };
        self.ranges.iter().fold(first.center, |closest, range| {
            if (range.center - value).abs() < (closest - value).abs() {
                range.center
            } else {
                closest
            }
        })
    }

    pub fn plan(&self, value: f64) -> SnapPlan {
        let target = self.snap_to(value);
        SnapPlan {
            target,
            duration: self.animation.duration_for(target - value),
        }
    }
}
