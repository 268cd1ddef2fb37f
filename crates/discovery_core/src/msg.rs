use crate::{Activity, Category, DiscoveryParams, Project, RequestId, User};

/// Marker for a fetch that failed at the collaborator boundary.
///
/// Details are logged by whoever ran the fetch; the core only needs to know
/// that the attempt produced nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchFailed;

/// Sub-card of the activity sampler that offered the "see activity" button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplerCard {
    FriendBacking,
    FriendFollow,
    Project,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Navigation seed or user selection replaced the feed parameters.
    ParamsSelected(DiscoveryParams),
    /// Root categories became available; unblocks the first feed load.
    RootCategoriesLoaded(Vec<Category>),
    /// Session collaborator reported the current identity.
    SessionChanged(Option<User>),
    /// Blank the project list without re-fetching.
    ClearPage,
    /// Completion of a project fetch.
    ProjectsLoaded {
        request_id: RequestId,
        result: Result<Vec<Project>, FetchFailed>,
    },
    /// Completion of an activity fetch, with the threshold read at sampling time.
    ActivitiesLoaded {
        request_id: RequestId,
        result: Result<Vec<Activity>, FetchFailed>,
        threshold: i64,
    },
    /// User clicked "see activity" on a sampler card.
    SeeActivityClicked(SamplerCard),
    /// User clicked the update shown on the project sampler card.
    ActivityUpdateClicked(Activity),
    /// User clicked login on the onboarding banner.
    LoginToutClicked,
    /// User clicked a project card.
    ProjectCardClicked(Project),
}
