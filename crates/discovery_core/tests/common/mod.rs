#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Once;

use discovery_core::{
    update, Activity, ActivityCategory, AnalyticsEvent, Category, DiscoveryParams,
    DiscoveryState, Effect, FetchFailed, Msg, Output, Project, RequestId, Sort, User,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(discovery_logging::initialize_for_tests);
}

type ProjectsFn = Box<dyn Fn(&DiscoveryParams) -> Result<Vec<Project>, FetchFailed>>;

enum PendingFetch {
    Projects(RequestId, DiscoveryParams),
    Activities(RequestId),
}

/// Drives `update` synchronously, answering fetch effects from canned data.
pub struct Harness {
    state: DiscoveryState,
    outputs: Vec<Output>,
    tracked: Vec<AnalyticsEvent>,
    pending: VecDeque<PendingFetch>,
    projects: ProjectsFn,
    activities: Result<Vec<Activity>, FetchFailed>,
    threshold: i64,
    saved_cursors: Vec<i64>,
    auto_resolve: bool,
    project_fetches: usize,
    activity_fetches: usize,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_session(None)
    }

    /// Starts with `session` as the initial session value. A fetch it
    /// triggers stays pending until the next message is sent.
    pub fn with_session(session: Option<User>) -> Self {
        init_logging();
        let mut harness = Self {
            state: DiscoveryState::new(),
            outputs: Vec::new(),
            tracked: Vec::new(),
            pending: VecDeque::new(),
            projects: Box::new(|_| Ok(projects())),
            activities: Ok(Vec::new()),
            threshold: 0,
            saved_cursors: Vec::new(),
            auto_resolve: false,
            project_fetches: 0,
            activity_fetches: 0,
        };
        harness.send(Msg::SessionChanged(session));
        harness.auto_resolve = true;
        harness
    }

    pub fn with_projects(
        mut self,
        projects: impl Fn(&DiscoveryParams) -> Result<Vec<Project>, FetchFailed> + 'static,
    ) -> Self {
        self.projects = Box::new(projects);
        self
    }

    pub fn with_activities(mut self, activities: Result<Vec<Activity>, FetchFailed>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_threshold(mut self, threshold: i64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Leave fetches pending until `resolve_next` is called.
    pub fn deferred(mut self) -> Self {
        self.auto_resolve = false;
        self
    }

    pub fn send(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        for effect in effects {
            match effect {
                Effect::Emit(output) => self.outputs.push(output),
                Effect::Track(event) => self.tracked.push(event),
                Effect::FetchProjects { request_id, params } => {
                    self.project_fetches += 1;
                    self.pending
                        .push_back(PendingFetch::Projects(request_id, params));
                }
                Effect::FetchActivities { request_id } => {
                    self.activity_fetches += 1;
                    self.pending.push_back(PendingFetch::Activities(request_id));
                }
                // Behaves like the persisted preference: later samples read it.
                Effect::SaveActivitySampleCursor(cursor) => {
                    self.saved_cursors.push(cursor);
                    self.threshold = cursor;
                }
            }
        }
        if self.auto_resolve {
            while self.resolve_next() {}
        }
    }

    /// Completes the oldest pending fetch. Returns false if none was pending.
    pub fn resolve_next(&mut self) -> bool {
        let Some(fetch) = self.pending.pop_front() else {
            return false;
        };
        let msg = match fetch {
            PendingFetch::Projects(request_id, params) => Msg::ProjectsLoaded {
                request_id,
                result: (self.projects)(&params),
            },
            PendingFetch::Activities(request_id) => Msg::ActivitiesLoaded {
                request_id,
                result: self.activities.clone(),
                threshold: self.threshold,
            },
        };
        let auto = std::mem::replace(&mut self.auto_resolve, false);
        self.send(msg);
        self.auto_resolve = auto;
        true
    }

    /// Completes the newest pending fetch first.
    pub fn resolve_last(&mut self) -> bool {
        let Some(fetch) = self.pending.pop_back() else {
            return false;
        };
        self.pending.push_front(fetch);
        self.resolve_next()
    }

    pub fn state(&self) -> &DiscoveryState {
        &self.state
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn tracked(&self) -> Vec<&'static str> {
        self.tracked.iter().map(|event| event.name()).collect()
    }

    pub fn project_fetches(&self) -> usize {
        self.project_fetches
    }

    pub fn activity_fetches(&self) -> usize {
        self.activity_fetches
    }

    pub fn saved_cursors(&self) -> &[i64] {
        &self.saved_cursors
    }

    pub fn has_projects(&self) -> Vec<bool> {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::ProjectList(projects) => Some(!projects.is_empty()),
                _ => None,
            })
            .collect()
    }

    pub fn non_empty_project_lists(&self) -> usize {
        self.has_projects().into_iter().filter(|has| *has).count()
    }

    pub fn onboarding(&self) -> Vec<bool> {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::ShouldShowOnboardingView(show) => Some(*show),
                _ => None,
            })
            .collect()
    }

    pub fn activity_ids(&self) -> Vec<Option<u64>> {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::Activity(activity) => Some(activity.as_ref().map(|a| a.id)),
                _ => None,
            })
            .collect()
    }

    pub fn empty_saved_view(&self) -> Vec<bool> {
        self.outputs
            .iter()
            .filter_map(|output| match output {
                Output::ShouldShowEmptySavedView(show) => Some(*show),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, wanted: fn(&Output) -> bool) -> usize {
        self.outputs.iter().filter(|output| wanted(output)).count()
    }

    pub fn seed_home(&mut self) {
        self.seed(home_params());
    }

    pub fn seed(&mut self, params: DiscoveryParams) {
        self.send(Msg::ParamsSelected(params));
        self.send(Msg::RootCategoriesLoaded(root_categories()));
    }
}

pub fn home_params() -> DiscoveryParams {
    DiscoveryParams::builder().sort(Sort::Home).build()
}

pub fn saved_params() -> DiscoveryParams {
    DiscoveryParams::builder().saved_only(true).build()
}

pub fn art_category() -> Category {
    Category {
        id: 1,
        name: "Art".to_string(),
        slug: "art".to_string(),
        parent_id: None,
    }
}

pub fn root_categories() -> Vec<Category> {
    vec![
        art_category(),
        Category {
            id: 12,
            name: "Games".to_string(),
            slug: "games".to_string(),
            parent_id: None,
        },
    ]
}

pub fn project(id: u64) -> Project {
    Project {
        id,
        name: format!("Project {id}"),
        blurb: None,
        category: None,
    }
}

pub fn projects() -> Vec<Project> {
    vec![project(1), project(2)]
}

pub fn user() -> User {
    User {
        id: 42,
        name: "Ada".to_string(),
    }
}

pub fn activity(id: u64) -> Activity {
    Activity {
        id,
        category: ActivityCategory::Backing,
        project: Some(project(7)),
        user: Some(user()),
    }
}

pub fn update_activity() -> Activity {
    Activity {
        category: ActivityCategory::Update,
        ..activity(5)
    }
}
