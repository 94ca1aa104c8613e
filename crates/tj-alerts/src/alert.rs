//! Emitted alert records and their shared vocabulary.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tj_core::CriterionId;
use uuid::Uuid;

// ── Priority ─────────────────────────────────────────────────────────────────

/// Severity carried from a rule onto the alerts it emits.
///
/// Serialized with the dashboard's Portuguese tokens (`alta`, `media`,
/// `baixa`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Urgent; additionally surfaced as a toast by the runtime.
    #[serde(rename = "alta")]
    High,
    /// Standard priority.
    #[serde(rename = "media")]
    Medium,
    /// Informational.
    #[serde(rename = "baixa")]
    Low,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::High => "alta",
            Priority::Medium => "media",
            Priority::Low => "baixa",
        };
        f.write_str(s)
    }
}

// ── Alert kind ───────────────────────────────────────────────────────────────

/// What condition produced an alert.
///
/// The kind participates in the 24-hour dedup key together with the
/// criterion id, so two rules of the same kind matching one criterion
/// still yield a single alert per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// Deadline approaching or passed.
    #[serde(rename = "vencimento")]
    DueDate,
    /// Measured value short of the target.
    #[serde(rename = "meta")]
    TargetShortfall,
    /// Reserved for status-change notifications.
    #[serde(rename = "status")]
    Status,
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertKind::DueDate => "vencimento",
            AlertKind::TargetShortfall => "meta",
            AlertKind::Status => "status",
        };
        f.write_str(s)
    }
}

// ── Alert ────────────────────────────────────────────────────────────────────

/// A rendered notification produced by one evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Unique id, assigned at emission.
    pub id: Uuid,
    /// The criterion that triggered this alert.
    pub criterion_id: CriterionId,
    /// Trigger category.
    pub kind: AlertKind,
    /// Fully rendered message text.
    pub message: String,
    /// Severity inherited from the matching rule.
    pub priority: Priority,
    /// When the evaluation pass emitted this alert.
    pub emitted_at: NaiveDateTime,
    /// Whether a dashboard user has seen it.
    pub read: bool,
}

impl Alert {
    /// Build a fresh, unread alert with a new v4 id.
    pub fn new(
        criterion_id: CriterionId,
        kind: AlertKind,
        message: String,
        priority: Priority,
        emitted_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            criterion_id,
            kind,
            message,
            priority,
            emitted_at,
            read: false,
        }
    }

    /// Mark the alert as seen.
    pub fn mark_read(&mut self) {
        self.read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn moment() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn new_alerts_are_unread_with_distinct_ids() {
        let a = Alert::new(
            "crit-1".into(),
            AlertKind::DueDate,
            "vence amanhã".into(),
            Priority::High,
            moment(),
        );
        let b = Alert::new(
            "crit-1".into(),
            AlertKind::DueDate,
            "vence amanhã".into(),
            Priority::High,
            moment(),
        );
        assert!(!a.read);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn priority_and_kind_use_portuguese_tokens() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"alta\"");
        assert_eq!(serde_json::to_string(&Priority::Low).unwrap(), "\"baixa\"");
        assert_eq!(
            serde_json::to_string(&AlertKind::DueDate).unwrap(),
            "\"vencimento\""
        );
        assert_eq!(
            serde_json::to_string(&AlertKind::TargetShortfall).unwrap(),
            "\"meta\""
        );
        assert_eq!(Priority::Medium.to_string(), "media");
        assert_eq!(AlertKind::Status.to_string(), "status");
    }

    #[test]
    fn mark_read_flips_the_flag() {
        let mut a = Alert::new(
            "crit-2".into(),
            AlertKind::TargetShortfall,
            "abaixo da meta".into(),
            Priority::Medium,
            moment(),
        );
        a.mark_read();
        assert!(a.read);
    }
}
