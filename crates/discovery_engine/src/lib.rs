//! Discovery engine: collaborators and the async runner for the core state machine.
mod analytics;
mod api;
mod engine;
mod outputs;
mod preference;
mod session;
mod types;

pub use analytics::{AnalyticsSink, LogAnalytics};
pub use api::{ApiClient, ApiSettings, ReqwestApiClient};
pub use engine::{DiscoveryViewModel, Environment};
pub use outputs::DiscoveryOutputs;
pub use preference::{InMemoryIntPreference, IntPreference, PreferenceError, RonIntPreference};
pub use session::{CurrentUser, SessionProvider};
pub use types::{ActivityEnvelope, ApiError, DiscoverEnvelope, FailureKind};
