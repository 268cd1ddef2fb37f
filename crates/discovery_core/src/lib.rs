//! Discovery core: pure state machine behind the Discover feed screen.
mod effect;
mod models;
mod msg;
mod params;
mod ref_tag;
mod state;
mod update;
mod view_model;

pub use effect::{AnalyticsEvent, Effect, Output, RequestId};
pub use models::{Activity, ActivityCategory, Category, Project, User};
pub use msg::{FetchFailed, Msg, SamplerCard};
pub use params::{DiscoveryParams, DiscoveryParamsBuilder, Sort};
pub use ref_tag::RefTag;
pub use state::{select_activity_sample, DiscoveryState};
pub use update::update;
pub use view_model::{BannerState, DiscoveryView};
