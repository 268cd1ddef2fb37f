use std::sync::{Arc, Mutex};

use discovery_core::{Activity, Output, Project, RefTag};
use tokio::sync::mpsc;

/// Unbounded per-subscriber delivery: every receiver sees every value
/// published after it subscribed, however far behind it is.
#[derive(Debug)]
struct Fanout<T> {
    subscribers: Arc<Mutex<Vec<mpsc::UnboundedSender<T>>>>,
}

impl<T> Clone for Fanout<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<T> Default for Fanout<T> {
    fn default() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> Fanout<T> {
    fn subscribe(&self) -> mpsc::UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.push(tx);
        }
        rx
    }

    /// Dropped receivers are pruned here.
    fn send(&self, value: T) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(value.clone()).is_ok());
        }
    }
}

/// Fan-out of view-model outputs.
///
/// Each accessor returns a fresh receiver that sees only values published
/// after it was created. Pulses arrive as `true`.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOutputs {
    activity: Fanout<Option<Activity>>,
    project_list: Fanout<Vec<Project>>,
    has_projects: Fanout<bool>,
    should_show_empty_saved_view: Fanout<bool>,
    should_show_onboarding_view: Fanout<bool>,
    show_activity_feed: Fanout<bool>,
    show_login_tout: Fanout<bool>,
    start_project_activity: Fanout<(Project, RefTag)>,
    start_update_activity: Fanout<Activity>,
}

impl DiscoveryOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(&self) -> mpsc::UnboundedReceiver<Option<Activity>> {
        self.activity.subscribe()
    }

    pub fn project_list(&self) -> mpsc::UnboundedReceiver<Vec<Project>> {
        self.project_list.subscribe()
    }

    /// Non-emptiness of every `project_list` value, in the same order.
    pub fn has_projects(&self) -> mpsc::UnboundedReceiver<bool> {
        self.has_projects.subscribe()
    }

    pub fn should_show_empty_saved_view(&self) -> mpsc::UnboundedReceiver<bool> {
        self.should_show_empty_saved_view.subscribe()
    }

    pub fn should_show_onboarding_view(&self) -> mpsc::UnboundedReceiver<bool> {
        self.should_show_onboarding_view.subscribe()
    }

    pub fn show_activity_feed(&self) -> mpsc::UnboundedReceiver<bool> {
        self.show_activity_feed.subscribe()
    }

    pub fn show_login_tout(&self) -> mpsc::UnboundedReceiver<bool> {
        self.show_login_tout.subscribe()
    }

    pub fn start_project_activity(&self) -> mpsc::UnboundedReceiver<(Project, RefTag)> {
        self.start_project_activity.subscribe()
    }

    pub fn start_update_activity(&self) -> mpsc::UnboundedReceiver<Activity> {
        self.start_update_activity.subscribe()
    }

    /// Sends an output to current subscribers. Unobserved outputs are dropped.
    pub(crate) fn publish(&self, output: Output) {
        match output {
            Output::Activity(activity) => self.activity.send(activity),
            Output::ProjectList(projects) => {
                self.has_projects.send(!projects.is_empty());
                self.project_list.send(projects);
            }
            Output::ShouldShowEmptySavedView(show) => self.should_show_empty_saved_view.send(show),
            Output::ShouldShowOnboardingView(show) => self.should_show_onboarding_view.send(show),
            Output::ShowActivityFeed => self.show_activity_feed.send(true),
            Output::ShowLoginTout => self.show_login_tout.send(true),
            Output::StartProjectActivity { project, ref_tag } => {
                self.start_project_activity.send((project, ref_tag));
            }
            Output::StartUpdateActivity(activity) => self.start_update_activity.send(activity),
        }
    }
}
