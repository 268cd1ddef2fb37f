use discovery_core::AnalyticsEvent;
use discovery_logging::discovery_info;

/// Destination for tracked screen events.
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: AnalyticsEvent);
}

/// Writes every event to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAnalytics;

impl AnalyticsSink for LogAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        discovery_info!("analytics event=\"{}\"", event.name());
    }
}
