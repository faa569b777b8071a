//! Progress reporting

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A user-facing progress message emitted during a deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// General information
    Info(String),
    /// A step is starting
    Step(String),
    /// Something completed
    Success(String),
    /// Something needs attention but the run continues
    Warning(String),
    /// Something failed
    Error(String),
}

impl Notice {
    /// The message text
    pub fn message(&self) -> &str {
        match self {
            Self::Info(m) | Self::Step(m) | Self::Success(m) | Self::Warning(m) | Self::Error(m) => m,
        }
    }
}

/// Trait for reporting deployment progress
pub trait Reporter: Send + Sync {
    /// Handle a notice
    fn report(&self, notice: &Notice);
}

/// Simple reporter that logs to tracing
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, notice: &Notice) {
        match notice {
            Notice::Info(m) | Notice::Step(m) | Notice::Success(m) => tracing::info!("{}", m),
            Notice::Warning(m) => tracing::warn!("{}", m),
            Notice::Error(m) => tracing::error!("{}", m),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
/// Reporter that collects notices for later inspection (useful for testing)
#[derive(Debug, Default)]
pub struct CollectingReporter {
    notices: Mutex<Vec<Notice>>,
}

#[cfg(any(test, feature = "testing"))]
impl CollectingReporter {
    /// Get all collected notices
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    /// Whether any notice contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .any(|n| n.message().contains(needle))
    }
}

#[cfg(any(test, feature = "testing"))]
impl Reporter for CollectingReporter {
    fn report(&self, notice: &Notice) {
        self.notices.lock().unwrap().push(notice.clone());
    }
}
