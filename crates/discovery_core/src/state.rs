use crate::view_model::{BannerState, DiscoveryView};
use crate::{Activity, Category, DiscoveryParams, Project, RequestId, User};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoveryState {
    last_request_id: RequestId,
    /// Latest selection, as seen by the banners and the project-click router.
    params: Option<DiscoveryParams>,
    /// First selection received; the banners only show while params equal it.
    seed: Option<DiscoveryParams>,
    root_categories: Option<Vec<Category>>,
    /// Params the feed was last started with.
    feed_params: Option<DiscoveryParams>,
    /// `None` until the first project list has been emitted.
    projects: Option<Vec<Project>>,
    projects_request: Option<RequestId>,
    session_seen: bool,
    session: Option<User>,
    activities_request: Option<RequestId>,
    sample: Option<Activity>,
    /// Id of the newest sample already shown and written to the cursor.
    seen_sample: Option<u64>,
    last_empty_saved_view: Option<bool>,
}

impl DiscoveryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> DiscoveryView {
        DiscoveryView {
            params: self.params.clone(),
            has_projects: self.has_projects(),
            project_count: self.projects.as_ref().map_or(0, Vec::len),
            banner: self.banner(),
            logged_in: self.session.is_some(),
            loading_projects: self.projects_request.is_some(),
            loading_activities: self.activities_pending(),
        }
    }

    pub fn params(&self) -> Option<&DiscoveryParams> {
        self.params.as_ref()
    }

    pub fn has_projects(&self) -> bool {
        self.projects.as_ref().is_some_and(|projects| !projects.is_empty())
    }

    pub(crate) fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn set_params(&mut self, params: DiscoveryParams) {
        if self.seed.is_none() {
            self.seed = Some(params.clone());
        }
        self.params = Some(params);
    }

    /// Re-resolves a seed that arrived before the root categories.
    pub(crate) fn resolve_seed(&mut self) {
        let Some(roots) = self.root_categories.as_deref() else {
            return;
        };
        if let Some(seed) = self.seed.take() {
            self.seed = Some(seed.resolve_category(roots));
        }
    }

    pub(crate) fn root_categories(&self) -> Option<&[Category]> {
        self.root_categories.as_deref()
    }

    /// Stores root categories; returns false if they were already known.
    pub(crate) fn set_root_categories(&mut self, categories: Vec<Category>) -> bool {
        let first = self.root_categories.is_none();
        self.root_categories = Some(categories);
        first
    }

    pub(crate) fn feed_params(&self) -> Option<&DiscoveryParams> {
        self.feed_params.as_ref()
    }

    pub(crate) fn projects_emitted(&self) -> bool {
        self.projects.is_some()
    }

    pub(crate) fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = Some(projects);
    }

    /// Starts a new feed request, superseding any request in flight.
    pub(crate) fn begin_projects_request(&mut self, params: DiscoveryParams) -> RequestId {
        let request_id = self.next_request_id();
        self.feed_params = Some(params);
        self.projects_request = Some(request_id);
        request_id
    }

    /// Claims the in-flight project request; false for stale completions.
    pub(crate) fn settle_projects_request(&mut self, request_id: RequestId) -> bool {
        if self.projects_request == Some(request_id) {
            self.projects_request = None;
            true
        } else {
            false
        }
    }

    /// Records a derived empty-saved-view value; true when it changed.
    pub(crate) fn record_empty_saved_view(&mut self, value: bool) -> bool {
        let changed = self.last_empty_saved_view != Some(value);
        self.last_empty_saved_view = Some(value);
        changed
    }

    /// Applies a session notification; returns true for the first one.
    pub(crate) fn set_session(&mut self, session: Option<User>) -> bool {
        let initial = !self.session_seen;
        self.session_seen = true;
        self.session = session;
        self.sample = None;
        self.activities_request = None;
        initial
    }

    pub(crate) fn begin_activities_request(&mut self) -> RequestId {
        let request_id = self.next_request_id();
        self.activities_request = Some(request_id);
        request_id
    }

    pub(crate) fn activities_pending(&self) -> bool {
        self.activities_request.is_some()
    }

    pub(crate) fn settle_activities_request(&mut self, request_id: RequestId) -> bool {
        if self.activities_request == Some(request_id) {
            self.activities_request = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn set_sample(&mut self, sample: Option<Activity>) {
        self.sample = sample;
    }

    /// Records that the sampler showed `id`; true when the cursor must move.
    pub(crate) fn mark_sample_seen(&mut self, id: u64) -> bool {
        if self.seen_sample.is_some_and(|seen| seen >= id) {
            return false;
        }
        self.seen_sample = Some(id);
        true
    }

    /// Banner the current session and params call for. Nothing until params
    /// exist, and nothing once they differ from the seed.
    pub(crate) fn banner(&self) -> BannerState {
        let Some(params) = &self.params else {
            return BannerState::Nothing;
        };
        if self.seed.as_ref() != Some(params) {
            return BannerState::Nothing;
        }
        match (&self.session, &self.sample) {
            (None, _) => BannerState::Onboarding,
            (Some(_), Some(activity)) => BannerState::ActivitySampler(activity.clone()),
            (Some(_), None) => BannerState::Nothing,
        }
    }
}

/// Picks the newest activity whose id is strictly above `threshold`.
pub fn select_activity_sample(activities: &[Activity], threshold: i64) -> Option<Activity> {
    activities
        .iter()
        .filter(|activity| i64::try_from(activity.id).map_or(true, |id| id > threshold))
        .max_by_key(|activity| activity.id)
        .cloned()
}
