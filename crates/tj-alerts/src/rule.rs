//! Alert rules: trigger conditions, department filters, channels.

use serde::{Deserialize, Serialize};
use tj_core::{ensure, Result, RuleId};

use crate::alert::{AlertKind, Priority};

// ── Trigger ──────────────────────────────────────────────────────────────────

/// The condition under which a rule fires, with its payload.
///
/// Only due-date and target-shortfall triggers are evaluated;
/// `StatusChange` and `Inactivity` are reserved kinds that never fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Trigger {
    /// Fire relative to the criterion's due date.
    ///
    /// Offset `0` fires for anything due today or overdue. Offset `N > 0`
    /// fires only when exactly `N` days remain, a single-day window, so
    /// multiple rules at different offsets do not all fire every day as
    /// the deadline approaches.
    DueDate {
        /// Days before the due date at which to fire.
        days_offset: i64,
    },
    /// Fire when the completion percentage falls below a threshold.
    TargetShortfall {
        /// Threshold on the 0-100 scale; fires when `pct < threshold`.
        threshold_pct: f64,
    },
    /// Reserved; never fires.
    StatusChange,
    /// Reserved; never fires.
    Inactivity,
}

impl Trigger {
    /// The alert kind this trigger produces (part of the dedup key).
    pub fn alert_kind(&self) -> AlertKind {
        match self {
            Trigger::DueDate { .. } => AlertKind::DueDate,
            Trigger::TargetShortfall { .. } => AlertKind::TargetShortfall,
            Trigger::StatusChange | Trigger::Inactivity => AlertKind::Status,
        }
    }
}

// ── Channels ─────────────────────────────────────────────────────────────────

/// Where alerts from a rule are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSet {
    /// Show in the dashboard alert panel.
    #[serde(default = "default_true")]
    pub dashboard: bool,
    /// Forward to the email dispatch queue (requires a configured
    /// mailer; silently skipped otherwise).
    #[serde(default)]
    pub email: bool,
    /// Reserved for push notifications.
    #[serde(default)]
    pub push: bool,
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self {
            dashboard: true,
            email: false,
            push: false,
        }
    }
}

fn default_true() -> bool {
    true
}

// ── AlertRule ────────────────────────────────────────────────────────────────

/// A user-configurable alert rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    /// Host-assigned identity.
    pub id: RuleId,
    /// Display name.
    pub name: String,
    /// Disabled rules are skipped without evaluation.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Firing condition and payload.
    pub trigger: Trigger,
    /// Severity stamped onto emitted alerts.
    pub priority: Priority,
    /// Message template; see the placeholder table in the evaluator docs.
    pub template: String,
    /// Department keys this rule applies to; empty means all.
    #[serde(default)]
    pub departments: Vec<String>,
    /// Delivery channels.
    #[serde(default)]
    pub channels: ChannelSet,
    /// Suppress emissions when "now" is not a working day (ORed with
    /// the evaluator's global flag).
    #[serde(default)]
    pub business_days_only: bool,
}

impl AlertRule {
    /// Return `true` if this rule applies to `department`.
    pub fn applies_to(&self, department: &str) -> bool {
        self.departments.is_empty() || self.departments.iter().any(|d| d == department)
    }

    /// Check the trigger payload invariants.
    ///
    /// The evaluator skips (and logs) rules that fail validation rather
    /// than surfacing an error mid-pass.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.id.is_empty(), "rule id must not be empty");
        match self.trigger {
            Trigger::DueDate { days_offset } => {
                ensure!(
                    days_offset >= 0,
                    "rule {}: day offset must be non-negative, got {}",
                    self.id,
                    days_offset
                );
            }
            Trigger::TargetShortfall { threshold_pct } => {
                ensure!(
                    threshold_pct > 0.0 && threshold_pct <= 100.0,
                    "rule {}: shortfall threshold must be in (0, 100], got {}",
                    self.id,
                    threshold_pct
                );
            }
            Trigger::StatusChange | Trigger::Inactivity => {}
        }
        Ok(())
    }
}

// ── Default rule set ─────────────────────────────────────────────────────────

/// The four rules the dashboard ships with.
///
/// Two advance due-date warnings, an overdue notice, and a 50% target
/// shortfall, all enabled, all with the email channel on. Due-date
/// rules defer to working days; the shortfall rule fires any day.
pub fn default_rules() -> Vec<AlertRule> {
    let email = ChannelSet {
        dashboard: true,
        email: true,
        push: false,
    };
    vec![
        AlertRule {
            id: "vencimento-7-dias".into(),
            name: "Vencimento em 7 dias".into(),
            enabled: true,
            trigger: Trigger::DueDate { days_offset: 7 },
            priority: Priority::Medium,
            template: "Critério \"{nome}\" vence em {diasRestantes} dias".into(),
            departments: Vec::new(),
            channels: email,
            business_days_only: true,
        },
        AlertRule {
            id: "vencimento-3-dias".into(),
            name: "Vencimento em 3 dias".into(),
            enabled: true,
            trigger: Trigger::DueDate { days_offset: 3 },
            priority: Priority::High,
            template: "Critério \"{nome}\" vence em {diasRestantes} dias".into(),
            departments: Vec::new(),
            channels: email,
            business_days_only: true,
        },
        AlertRule {
            id: "vencido".into(),
            name: "Critério vencido".into(),
            enabled: true,
            trigger: Trigger::DueDate { days_offset: 0 },
            priority: Priority::High,
            template: "Critério \"{nome}\" está vencido desde {dataVencimento}".into(),
            departments: Vec::new(),
            channels: email,
            business_days_only: true,
        },
        AlertRule {
            id: "meta-50".into(),
            name: "Meta abaixo de 50%".into(),
            enabled: true,
            trigger: Trigger::TargetShortfall { threshold_pct: 50.0 },
            priority: Priority::Medium,
            template: "Critério \"{nome}\" está {percentualDiferenca}% abaixo da meta".into(),
            departments: Vec::new(),
            channels: email,
            business_days_only: false,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due_rule(days_offset: i64) -> AlertRule {
        AlertRule {
            id: "r1".into(),
            name: "teste".into(),
            enabled: true,
            trigger: Trigger::DueDate { days_offset },
            priority: Priority::Medium,
            template: "{nome}".into(),
            departments: Vec::new(),
            channels: ChannelSet::default(),
            business_days_only: false,
        }
    }

    #[test]
    fn empty_department_filter_matches_everything() {
        let mut rule = due_rule(3);
        assert!(rule.applies_to("Educação"));
        assert!(rule.applies_to("Saúde"));

        rule.departments = vec!["Educação".into()];
        assert!(rule.applies_to("Educação"));
        assert!(!rule.applies_to("Saúde"));
    }

    #[test]
    fn validate_rejects_negative_offset() {
        assert!(due_rule(0).validate().is_ok());
        assert!(due_rule(7).validate().is_ok());
        assert!(due_rule(-1).validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let mut rule = due_rule(0);
        for bad in [0.0, -10.0, 100.1] {
            rule.trigger = Trigger::TargetShortfall { threshold_pct: bad };
            assert!(rule.validate().is_err(), "threshold {bad} should fail");
        }
        rule.trigger = Trigger::TargetShortfall {
            threshold_pct: 100.0,
        };
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn trigger_maps_to_alert_kind() {
        assert_eq!(
            Trigger::DueDate { days_offset: 3 }.alert_kind(),
            AlertKind::DueDate
        );
        assert_eq!(
            Trigger::TargetShortfall { threshold_pct: 50.0 }.alert_kind(),
            AlertKind::TargetShortfall
        );
        assert_eq!(Trigger::StatusChange.alert_kind(), AlertKind::Status);
        assert_eq!(Trigger::Inactivity.alert_kind(), AlertKind::Status);
    }

    #[test]
    fn default_rules_are_valid_and_enabled() {
        let rules = default_rules();
        assert_eq!(rules.len(), 4);
        for rule in &rules {
            assert!(rule.enabled, "rule {} should ship enabled", rule.id);
            assert!(rule.validate().is_ok(), "rule {} should be valid", rule.id);
            assert!(rule.channels.email, "rule {} should email", rule.id);
            assert!(rule.applies_to("Qualquer Secretaria"));
        }
        let offsets: Vec<i64> = rules
            .iter()
            .filter_map(|r| match r.trigger {
                Trigger::DueDate { days_offset } => Some(days_offset),
                _ => None,
            })
            .collect();
        assert_eq!(offsets, vec![7, 3, 0]);
    }

    #[test]
    fn trigger_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Trigger::DueDate { days_offset: 7 }).unwrap();
        assert_eq!(json, "{\"kind\":\"due-date\",\"days_offset\":7}");

        let back: Trigger =
            serde_json::from_str("{\"kind\":\"target-shortfall\",\"threshold_pct\":50.0}").unwrap();
        assert_eq!(
            back,
            Trigger::TargetShortfall {
                threshold_pct: 50.0
            }
        );
    }

    #[test]
    fn channel_set_defaults_to_dashboard_only() {
        let channels = ChannelSet::default();
        assert!(channels.dashboard);
        assert!(!channels.email);
        assert!(!channels.push);
    }
}
