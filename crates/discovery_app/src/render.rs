use discovery_core::{Activity, BannerState, DiscoveryView, Project, RefTag};
use discovery_engine::DiscoveryOutputs;
use tokio::sync::mpsc;

/// Text stand-in for the Discover screen: collects outputs and renders lines.
pub struct ScreenPrinter {
    project_list: mpsc::UnboundedReceiver<Vec<Project>>,
    onboarding: mpsc::UnboundedReceiver<bool>,
    activity: mpsc::UnboundedReceiver<Option<Activity>>,
    empty_saved: mpsc::UnboundedReceiver<bool>,
    start_project: mpsc::UnboundedReceiver<(Project, RefTag)>,
}

impl ScreenPrinter {
    pub fn subscribe(outputs: &DiscoveryOutputs) -> Self {
        Self {
            project_list: outputs.project_list(),
            onboarding: outputs.should_show_onboarding_view(),
            activity: outputs.activity(),
            empty_saved: outputs.should_show_empty_saved_view(),
            start_project: outputs.start_project_activity(),
        }
    }

    /// Lines for every output received since the last call.
    pub fn pending_lines(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for projects in drain(&mut self.project_list) {
            lines.extend(project_lines(&projects));
        }
        for show in drain(&mut self.onboarding) {
            lines.push(format!("onboarding banner: {}", on_off(show)));
        }
        for sample in drain(&mut self.activity) {
            lines.push(match sample {
                Some(activity) => format!("activity sampler: {}", describe_activity(&activity)),
                None => "activity sampler: off".to_string(),
            });
        }
        for show in drain(&mut self.empty_saved) {
            lines.push(format!("empty saved view: {}", on_off(show)));
        }
        for (project, ref_tag) in drain(&mut self.start_project) {
            lines.push(format!("open project {} (ref {})", project.name, ref_tag));
        }
        lines
    }
}

pub fn project_lines(projects: &[Project]) -> Vec<String> {
    if projects.is_empty() {
        return vec!["projects: (cleared)".to_string()];
    }
    let mut lines = Vec::with_capacity(projects.len() + 1);
    lines.push(format!("projects: {}", projects.len()));
    for project in projects {
        match &project.blurb {
            Some(blurb) => lines.push(format!("  - {}: {}", project.name, blurb)),
            None => lines.push(format!("  - {}", project.name)),
        }
    }
    lines
}

pub fn summary_line(view: &DiscoveryView) -> String {
    let banner = match &view.banner {
        BannerState::Onboarding => "onboarding".to_string(),
        BannerState::ActivitySampler(activity) => format!("sampler #{}", activity.id),
        BannerState::Nothing => "none".to_string(),
    };
    format!(
        "summary: {} projects, banner {}, {}",
        view.project_count,
        banner,
        if view.logged_in { "logged in" } else { "logged out" }
    )
}

fn describe_activity(activity: &Activity) -> String {
    let who = activity
        .user
        .as_ref()
        .map_or("someone", |user| user.name.as_str());
    match &activity.project {
        Some(project) => format!("{who} {:?} {}", activity.category, project.name),
        None => format!("{who} {:?}", activity.category),
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

fn drain<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> Vec<T> {
    let mut values = Vec::new();
    while let Ok(value) = rx.try_recv() {
        values.push(value);
    }
    values
}
