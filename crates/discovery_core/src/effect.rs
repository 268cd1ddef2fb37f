use crate::{Activity, DiscoveryParams, Project, RefTag};

/// Pairs a fetch effect with its completion message.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchProjects {
        request_id: RequestId,
        params: DiscoveryParams,
    },
    FetchActivities {
        request_id: RequestId,
    },
    /// Advance the "seen up to" activity threshold preference.
    SaveActivitySampleCursor(i64),
    Track(AnalyticsEvent),
    Emit(Output),
}

/// Values pushed to the view, one variant per output stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Sampled activity, or `None` while the sampler is hidden.
    Activity(Option<Activity>),
    ProjectList(Vec<Project>),
    ShouldShowEmptySavedView(bool),
    ShouldShowOnboardingView(bool),
    /// Pulse.
    ShowActivityFeed,
    /// Pulse.
    ShowLoginTout,
    StartProjectActivity { project: Project, ref_tag: RefTag },
    StartUpdateActivity(Activity),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticsEvent {
    DiscoverListView,
    ViewedUpdate,
}

impl AnalyticsEvent {
    pub fn name(self) -> &'static str {
        match self {
            AnalyticsEvent::DiscoverListView => "Discover List View",
            AnalyticsEvent::ViewedUpdate => "Viewed Update",
        }
    }
}
