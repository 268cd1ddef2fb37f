#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use discovery_core::{
    Activity, ActivityCategory, AnalyticsEvent, Category, DiscoveryParams, Project, Sort, User,
};
use discovery_engine::{
    ActivityEnvelope, AnalyticsSink, ApiClient, ApiError, CurrentUser, DiscoverEnvelope,
    DiscoveryViewModel, Environment, FailureKind, InMemoryIntPreference,
};
use tokio::sync::mpsc;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(discovery_logging::initialize_for_tests);
}

type ProjectsFn = dyn Fn(&DiscoveryParams) -> Result<Vec<Project>, ApiError> + Send + Sync;
type DelayFn = dyn Fn(&DiscoveryParams) -> Duration + Send + Sync;

/// Canned API answering from closures.
pub struct MockApiClient {
    projects: Box<ProjectsFn>,
    delay: Box<DelayFn>,
    activities: Result<Vec<Activity>, ApiError>,
    project_calls: AtomicUsize,
    activity_calls: AtomicUsize,
}

impl MockApiClient {
    pub fn new() -> Self {
        Self {
            projects: Box::new(|_| Ok(projects())),
            delay: Box::new(|_| Duration::ZERO),
            activities: Ok(Vec::new()),
            project_calls: AtomicUsize::new(0),
            activity_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_projects(
        mut self,
        projects: impl Fn(&DiscoveryParams) -> Result<Vec<Project>, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.projects = Box::new(projects);
        self
    }

    pub fn with_delay(
        mut self,
        delay: impl Fn(&DiscoveryParams) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.delay = Box::new(delay);
        self
    }

    pub fn with_activities(mut self, activities: Result<Vec<Activity>, ApiError>) -> Self {
        self.activities = activities;
        self
    }

    pub fn project_calls(&self) -> usize {
        self.project_calls.load(Ordering::SeqCst)
    }

    pub fn activity_calls(&self) -> usize {
        self.activity_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ApiClient for MockApiClient {
    async fn fetch_projects(&self, params: &DiscoveryParams) -> Result<DiscoverEnvelope, ApiError> {
        self.project_calls.fetch_add(1, Ordering::SeqCst);
        let delay = (self.delay)(params);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        (self.projects)(params).map(|projects| DiscoverEnvelope { projects })
    }

    async fn fetch_activities(&self) -> Result<ActivityEnvelope, ApiError> {
        self.activity_calls.fetch_add(1, Ordering::SeqCst);
        self.activities
            .clone()
            .map(|activities| ActivityEnvelope { activities })
    }
}

#[derive(Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|event| event.name())
            .collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Accumulates every value a receiver has seen so far.
pub struct Recorder<T: Clone> {
    rx: mpsc::UnboundedReceiver<T>,
    seen: Vec<T>,
}

impl<T: Clone> Recorder<T> {
    pub fn new(rx: mpsc::UnboundedReceiver<T>) -> Self {
        Self {
            rx,
            seen: Vec::new(),
        }
    }

    pub fn values(&mut self) -> Vec<T> {
        while let Ok(value) = self.rx.try_recv() {
            self.seen.push(value);
        }
        self.seen.clone()
    }
}

pub struct Fixture {
    pub vm: DiscoveryViewModel,
    pub api: Arc<MockApiClient>,
    pub session: Arc<CurrentUser>,
    pub analytics: Arc<RecordingAnalytics>,
    pub preference: Arc<InMemoryIntPreference>,
}

impl Fixture {
    pub fn new(api: MockApiClient) -> Self {
        Self::with_preference(api, 0)
    }

    pub fn with_preference(api: MockApiClient, threshold: i64) -> Self {
        init_logging();
        let api = Arc::new(api);
        let session = Arc::new(CurrentUser::default());
        let analytics = Arc::new(RecordingAnalytics::default());
        let preference = Arc::new(InMemoryIntPreference::new(threshold));
        let vm = DiscoveryViewModel::new(Environment {
            api: api.clone(),
            current_user: session.clone(),
            activity_sample_preference: preference.clone(),
            analytics: analytics.clone(),
        });
        Self {
            vm,
            api,
            session,
            analytics,
            preference,
        }
    }

    pub async fn seed_home(&self) {
        self.vm.select_params(home_params());
        self.vm.root_categories(root_categories());
        self.vm.flush().await;
    }
}

pub fn network_error() -> ApiError {
    ApiError {
        kind: FailureKind::Network,
        message: "connection reset".to_string(),
    }
}

pub fn home_params() -> DiscoveryParams {
    DiscoveryParams::builder().sort(Sort::Home).build()
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
    vec![art_category()]
}

pub fn project(id: u64) -> Project {
    Project {
        id,
        name: format!("Project {id}"),
        blurb: Some("A project".to_string()),
        category: None,
    }
}

pub fn projects() -> Vec<Project> {
    vec![project(1), project(2), project(3)]
}

pub fn user() -> User {
    User {
        id: 7,
        name: "Grace".to_string(),
    }
}

pub fn activity(id: u64) -> Activity {
    Activity {
        id,
        category: ActivityCategory::Backing,
        project: Some(project(1)),
        user: Some(user()),
    }
}
