use crate::PinnedSection;

#[derive(Debug, Clone, PartialEq)]
pub enum SnapMsg {
    /// The page mounted; pinned sections are still registering.
    Mounted,
    /// The settle delay elapsed; the host sampled every registered pinned section.
    SettleElapsed {
        sections: Vec<PinnedSection>,
        max_scroll: f64,
    },
    /// The viewport was resized.
    Resized,
    /// Scroll triggers were refreshed after a resize and sampled again.
    Remeasured {
        sections: Vec<PinnedSection>,
        max_scroll: f64,
    },
    /// The page is being torn down.
    Unmounted,
}
