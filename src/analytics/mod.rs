//! Usage analytics.
//!
//! Events are fire-and-forget: recording never returns an error and never
//! influences navigation. When analytics is disabled, or no site identifier
//! is configured, [`Analytics::track`] does nothing.

use crate::config::ResolvedConfig;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

/// Tracing target carrying analytics records.
pub const ANALYTICS_TARGET: &str = "analytics";

/// Named analytics events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventName {
    /// Application start with the initial location.
    PageView,
    /// A card was opened from the grid.
    CheatSheetExpand,
    /// The detail overlay became visible.
    ModalOpen,
    ModalClose,
    /// Previous/next stepping inside the detail overlay.
    CardNavigate,
    /// An in-body cross reference was followed.
    CardClick,
    CardBack,
    ImageView,
    OutboundLinkClick,
}

impl EventName {
    pub fn as_str(self) -> &'static str {
        match self {
            EventName::PageView => "page-view",
            EventName::CheatSheetExpand => "cheat-sheet-expand",
            EventName::ModalOpen => "modal-open",
            EventName::ModalClose => "modal-close",
            EventName::CardNavigate => "card-navigate",
            EventName::CardClick => "card-click",
            EventName::CardBack => "card-back",
            EventName::ImageView => "image-view",
            EventName::OutboundLinkClick => "outbound-link-click",
        }
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: EventName,
    pub data: Value,
    pub timestamp: DateTime<Utc>,
    pub website_id: String,
}

/// Destination for analytics events.
pub trait TelemetrySink: Send + Sync {
    /// Record an event. Implementations swallow their own failures.
    fn record(&self, event: &AnalyticsEvent);
}

/// Writes each event as an `info` record on the [`ANALYTICS_TARGET`] target.
#[derive(Debug, Default)]
pub struct TracingSink;

impl TelemetrySink for TracingSink {
    fn record(&self, event: &AnalyticsEvent) {
        info!(
            target: ANALYTICS_TARGET,
            event = event.name.as_str(),
            website_id = %event.website_id,
            data = %event.data,
        );
    }
}

/// Appends each event as one JSON object per line.
#[derive(Debug)]
pub struct JsonLinesSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesSink {
    /// Open `path` for appending, creating it if needed.
    pub fn open(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(file),
        })
    }
}

impl TelemetrySink for JsonLinesSink {
    fn record(&self, event: &AnalyticsEvent) {
        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to serialize analytics event");
                return;
            }
        };

        let Ok(mut file) = self.file.lock() else {
            warn!(path = %self.path.display(), "Analytics sink lock poisoned");
            return;
        };
        if let Err(e) = writeln!(file, "{line}") {
            warn!(path = %self.path.display(), error = %e, "Failed to write analytics event");
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Names of the recorded events, oldest first.
    pub fn names(&self) -> Vec<EventName> {
        self.events().into_iter().map(|event| event.name).collect()
    }
}

impl TelemetrySink for MemorySink {
    fn record(&self, event: &AnalyticsEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Analytics handle threaded through the application state.
#[derive(Clone)]
pub struct Analytics {
    website_id: String,
    enabled: bool,
    sinks: Vec<Arc<dyn TelemetrySink>>,
}

impl fmt::Debug for Analytics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Analytics")
            .field("website_id", &self.website_id)
            .field("enabled", &self.enabled)
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Analytics {
    /// Handle that records nothing.
    pub fn disabled() -> Self {
        Self {
            website_id: String::new(),
            enabled: false,
            sinks: Vec::new(),
        }
    }

    /// Enabled handle writing to the given sinks.
    ///
    /// An empty `website_id` still disables recording.
    pub fn new(website_id: impl Into<String>, sinks: Vec<Arc<dyn TelemetrySink>>) -> Self {
        let website_id = website_id.into();
        Self {
            enabled: !website_id.is_empty() && !sinks.is_empty(),
            website_id,
            sinks,
        }
    }

    /// Build the handle from resolved configuration.
    ///
    /// The tracing sink is always attached when enabled. A JSON-lines sink
    /// is added when `analytics_sink_path` is set and the file can be
    /// opened; otherwise a warning is logged and tracing alone is used.
    pub fn from_config(config: &ResolvedConfig) -> Self {
        if !config.analytics_enabled || config.website_id.is_empty() {
            return Self::disabled();
        }

        let mut sinks: Vec<Arc<dyn TelemetrySink>> = vec![Arc::new(TracingSink)];
        if let Some(path) = &config.analytics_sink_path {
            match JsonLinesSink::open(path) {
                Ok(sink) => sinks.push(Arc::new(sink)),
                Err(e) => warn!(path = %path.display(), error = %e, "Cannot open analytics sink"),
            }
        }
        Self::new(config.website_id.clone(), sinks)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record an event on every sink. No-op when disabled.
    pub fn track(&self, name: EventName, data: Value) {
        if !self.enabled {
            return;
        }

        let event = AnalyticsEvent {
            name,
            data,
            timestamp: Utc::now(),
            website_id: self.website_id.clone(),
        };
        for sink in &self.sinks {
            sink.record(&event);
        }
    }

    /// Record an external link being opened.
    pub fn track_outbound_link(&self, url: &str, link_text: &str) {
        self.track(
            EventName::OutboundLinkClick,
            serde_json::json!({ "url": url, "linkText": link_text }),
        );
    }
}

impl Default for Analytics {
    fn default() -> Self {
        Self::disabled()
    }
}
