use std::fmt;

/// Reachability of a target as observed by one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthState {
    Online,
    /// The service answered, but not with 200.
    Unstable(u16),
    /// No HTTP answer at all: timeout, DNS, refused connection, TLS.
    Down,
}

impl HealthState {
    pub fn from_status(status: u16) -> Self {
        if status == 200 {
            Self::Online
        } else {
            Self::Unstable(status)
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Online => "🟢",
            Self::Unstable(_) => "🟡",
            Self::Down => "🔴",
        }
    }

    pub fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}

impl fmt::Display for HealthState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "Online"),
            Self::Unstable(code) => write!(f, "Unstable ({})", code),
            Self::Down => write!(f, "Down"),
        }
    }
}

/// Result of asking the deploy provider to redeploy a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemediationOutcome {
    Triggered(u16),
    Failed(u16),
    Error(String),
}

impl RemediationOutcome {
    pub fn from_status(status: u16) -> Self {
        if (200..300).contains(&status) {
            Self::Triggered(status)
        } else {
            Self::Failed(status)
        }
    }

    pub fn is_triggered(&self) -> bool {
        matches!(self, Self::Triggered(_))
    }
}

impl fmt::Display for RemediationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triggered(code) => write!(f, "Redeploy triggered ✅ ({})", code),
            Self::Failed(code) => write!(f, "Deploy failed ({})", code),
            Self::Error(message) => write!(f, "Error: {}", message),
        }
    }
}
