//! Decision-log event vocabulary
//!
//! Every consequential request-handling decision (allow, block, inject) emits
//! one structured event tagged with these kinds. The tags are stable wire
//! values consumed by the log pipeline and the demo narration tooling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of decision being logged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DecisionKind {
    /// Request allowed to proceed
    Allow,
    /// Request rejected (auth failure, rate limit)
    Block,
    /// Chaos engine acted on the request or configuration
    Chaos,
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Allow => "ALLOW",
            Self::Block => "BLOCK",
            Self::Chaos => "CHAOS",
        };
        write!(f, "{tag}")
    }
}

/// The chaos action behind a `Chaos` decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChaosType {
    /// Latency was injected
    SlowMode,
    /// A synthetic backend failure was returned
    FailBackend,
    /// The request was dropped
    DropPercent,
    /// The configuration was cleared (manually or by expiry)
    Recovery,
}

impl fmt::Display for ChaosType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::SlowMode => "SLOW_MODE",
            Self::FailBackend => "FAIL_BACKEND",
            Self::DropPercent => "DROP_PERCENT",
            Self::Recovery => "RECOVERY",
        };
        write!(f, "{tag}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_kind_tags() {
        assert_eq!(DecisionKind::Allow.to_string(), "ALLOW");
        assert_eq!(DecisionKind::Block.to_string(), "BLOCK");
        assert_eq!(DecisionKind::Chaos.to_string(), "CHAOS");
    }

    #[test]
    fn chaos_type_tags() {
        assert_eq!(ChaosType::SlowMode.to_string(), "SLOW_MODE");
        assert_eq!(ChaosType::FailBackend.to_string(), "FAIL_BACKEND");
        assert_eq!(ChaosType::DropPercent.to_string(), "DROP_PERCENT");
        assert_eq!(ChaosType::Recovery.to_string(), "RECOVERY");
    }

    #[test]
    fn chaos_type_serde_uses_wire_tags() {
        let json = serde_json::to_string(&ChaosType::SlowMode).unwrap();
        assert_eq!(json, "\"SLOW_MODE\"");
        let back: ChaosType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ChaosType::SlowMode);
    }
}
