use crate::state::select_activity_sample;
use crate::{
    AnalyticsEvent, BannerState, DiscoveryParams, DiscoveryState, Effect, Msg, Output, RefTag,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Effects are ordered; `Effect::Emit` values must reach the view in the order
/// returned, before the effects of any later message.
pub fn update(mut state: DiscoveryState, msg: Msg) -> (DiscoveryState, Vec<Effect>) {
    let mut effects = Vec::new();
    match msg {
        Msg::ParamsSelected(params) => {
            let params = params.resolve_category(state.root_categories().unwrap_or_default());
            state.set_params(params.clone());
            // Before root categories arrive the selection is only held.
            if state.root_categories().is_some() {
                start_over(&mut state, params, &mut effects);
            }
            emit_onboarding(&state, &mut effects);
            emit_activity(&mut state, &mut effects);
        }
        Msg::RootCategoriesLoaded(categories) => {
            if state.set_root_categories(categories) {
                state.resolve_seed();
                if let Some(params) = state.params().cloned() {
                    let resolved =
                        params.resolve_category(state.root_categories().unwrap_or_default());
                    state.set_params(resolved.clone());
                    start_over(&mut state, resolved, &mut effects);
                }
            }
        }
        Msg::SessionChanged(session) => {
            let logged_in = session.is_some();
            let initial = state.set_session(session);
            if !initial {
                if let Some(params) = state.feed_params().cloned() {
                    start_over(&mut state, params, &mut effects);
                }
            }
            emit_onboarding(&state, &mut effects);
            if logged_in {
                // The activity output waits for the sample fetch to settle.
                let request_id = state.begin_activities_request();
                effects.push(Effect::FetchActivities { request_id });
            } else {
                emit_activity(&mut state, &mut effects);
            }
        }
        Msg::ClearPage => {
            state.set_projects(Vec::new());
            effects.push(Effect::Emit(Output::ProjectList(Vec::new())));
        }
        Msg::ProjectsLoaded { request_id, result } => {
            if !state.settle_projects_request(request_id) {
                return (state, effects);
            }
            let Ok(projects) = result else {
                return (state, effects);
            };
            let saved_only = state
                .feed_params()
                .is_some_and(DiscoveryParams::is_saved_projects);
            let empty_saved = saved_only && projects.is_empty();
            state.set_projects(projects.clone());
            effects.push(Effect::Emit(Output::ProjectList(projects)));
            if state.record_empty_saved_view(empty_saved) {
                effects.push(Effect::Emit(Output::ShouldShowEmptySavedView(empty_saved)));
            }
            effects.push(Effect::Track(AnalyticsEvent::DiscoverListView));
        }
        Msg::ActivitiesLoaded {
            request_id,
            result,
            threshold,
        } => {
            if !state.settle_activities_request(request_id) {
                return (state, effects);
            }
            let Ok(activities) = result else {
                return (state, effects);
            };
            state.set_sample(select_activity_sample(&activities, threshold));
            emit_activity(&mut state, &mut effects);
        }
        Msg::SeeActivityClicked(_card) => {
            effects.push(Effect::Emit(Output::ShowActivityFeed));
        }
        Msg::ActivityUpdateClicked(activity) => {
            effects.push(Effect::Emit(Output::StartUpdateActivity(activity)));
            effects.push(Effect::Track(AnalyticsEvent::ViewedUpdate));
        }
        Msg::LoginToutClicked => {
            effects.push(Effect::Emit(Output::ShowLoginTout));
        }
        Msg::ProjectCardClicked(project) => {
            let ref_tag = state
                .params()
                .map_or_else(RefTag::discovery, RefTag::for_params);
            effects.push(Effect::Emit(Output::StartProjectActivity { project, ref_tag }));
        }
    }

    (state, effects)
}

/// Resets the page (when something is showing) and fetches `params`.
fn start_over(state: &mut DiscoveryState, params: DiscoveryParams, effects: &mut Vec<Effect>) {
    if state.projects_emitted() {
        state.set_projects(Vec::new());
        effects.push(Effect::Emit(Output::ProjectList(Vec::new())));
    }
    let request_id = state.begin_projects_request(params.clone());
    effects.push(Effect::FetchProjects { request_id, params });
}

fn emit_onboarding(state: &DiscoveryState, effects: &mut Vec<Effect>) {
    if state.params().is_none() {
        return;
    }
    let show = state.banner() == BannerState::Onboarding;
    effects.push(Effect::Emit(Output::ShouldShowOnboardingView(show)));
}

/// Emits the sampler output; showing a sample for the first time moves the
/// threshold cursor past it.
fn emit_activity(state: &mut DiscoveryState, effects: &mut Vec<Effect>) {
    if state.params().is_none() {
        return;
    }
    let sample = match state.banner() {
        BannerState::ActivitySampler(activity) => Some(activity),
        BannerState::Onboarding | BannerState::Nothing => None,
    };
    let seen = sample
        .as_ref()
        .map(|activity| activity.id)
        .filter(|id| state.mark_sample_seen(*id));
    effects.push(Effect::Emit(Output::Activity(sample)));
    if let Some(id) = seen {
        let cursor = i64::try_from(id).unwrap_or(i64::MAX);
        effects.push(Effect::SaveActivitySampleCursor(cursor));
    }
}
