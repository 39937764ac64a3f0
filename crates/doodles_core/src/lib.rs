//! Doodles core: pure scroll-snap state machine and URL collection helpers.
mod effect;
mod msg;
mod snap;
mod state;
mod update;
mod urls;

pub use effect::SnapEffect;
pub use msg::SnapMsg;
pub use snap::{
    Ease, PinnedRange, PinnedSection, SnapAnimation, SnapPlan, SnapRule, SETTLE_DELAY, SNAP_BUFFER,
};
pub use state::{Phase, SnapCoordinator};
pub use update::update;
pub use urls::{
    extract_sitemap_urls, normalize_cli_urls, partition_by_host, url_host, HostPartition, UrlSet,
};
