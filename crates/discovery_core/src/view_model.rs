use crate::{Activity, DiscoveryParams};

/// Header banner above the feed. At most one is visible.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BannerState {
    Onboarding,
    ActivitySampler(Activity),
    #[default]
    Nothing,
}

/// Snapshot of the screen for renderers and debugging.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoveryView {
    pub params: Option<DiscoveryParams>,
    pub has_projects: bool,
    pub project_count: usize,
    pub banner: BannerState,
    pub logged_in: bool,
    pub loading_projects: bool,
    pub loading_activities: bool,
}
