//! Tracked compliance indicators ("critérios").
//!
//! A [`Criterion`] is the unit the dashboard monitors: a measurable
//! value against a target, owned by a department, with a due date and a
//! verification periodicity. The evaluator treats criteria as read-only
//! input; creation, editing, and completion marks belong to the host
//! application.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tj_core::{ensure, CriterionId, Percent, Result, UserId};

// ── Periodicity ──────────────────────────────────────────────────────────────

/// How often a criterion must be re-verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periodicity {
    /// Every fifteen days.
    #[serde(rename = "15-dias")]
    Every15Days,
    /// Every thirty days (distinct from calendar-monthly).
    #[serde(rename = "30-dias")]
    Every30Days,
    /// Once per calendar month.
    #[serde(rename = "mensal")]
    Monthly,
    /// Every two months.
    #[serde(rename = "bimestral")]
    Bimonthly,
    /// Twice a year.
    #[serde(rename = "semestral")]
    Semiannual,
    /// Once a year.
    #[serde(rename = "anual")]
    Annual,
}

impl Periodicity {
    /// Number of verification periods in a calendar year.
    pub fn periods_per_year(self) -> u32 {
        match self {
            Periodicity::Every15Days => 24,
            Periodicity::Every30Days | Periodicity::Monthly => 12,
            Periodicity::Bimonthly => 6,
            Periodicity::Semiannual => 2,
            Periodicity::Annual => 1,
        }
    }
}

// ── Completion state ─────────────────────────────────────────────────────────

/// One user's completion mark on a criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionState {
    /// Whether the user has marked the criterion as done.
    pub completed: bool,
    /// When the mark was last set, if ever.
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl CompletionState {
    /// A completion mark set at `at`.
    pub fn done(at: NaiveDateTime) -> Self {
        Self {
            completed: true,
            completed_at: Some(at),
        }
    }
}

// ── Criterion ────────────────────────────────────────────────────────────────

/// A tracked indicator: current value vs. target, due date, ownership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    /// Host-assigned identity.
    pub id: CriterionId,
    /// Display name, e.g. `"Coleta Seletiva"`.
    pub name: String,
    /// Current measured value (percentage-like).
    pub value: f64,
    /// Target value. Must be positive; see [`Criterion::validate`].
    pub target: f64,
    /// Deadline for the current verification period.
    pub due_date: NaiveDate,
    /// Name of the responsible party.
    pub responsible: String,
    /// Owning department key, e.g. `"Meio Ambiente"`.
    pub department: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Verification cadence.
    pub periodicity: Periodicity,
    /// Per-user completion marks.
    #[serde(default)]
    pub completions: HashMap<UserId, CompletionState>,
}

impl Criterion {
    /// Completion percentage (`100 * value / target`), or `None` when
    /// the target is non-positive and the ratio is meaningless.
    pub fn completion_pct(&self) -> Option<Percent> {
        if self.target > 0.0 {
            Some(100.0 * self.value / self.target)
        } else {
            None
        }
    }

    /// Return `true` if `user` has marked this criterion completed.
    pub fn is_completed_by(&self, user: &str) -> bool {
        self.completions.get(user).is_some_and(|c| c.completed)
    }

    /// Check the host-supplied data invariants.
    ///
    /// The evaluator itself never assumes a valid target (shortfall
    /// rules simply skip criteria where the ratio is undefined), but
    /// hosts should validate on intake.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.id.is_empty(), "criterion id must not be empty");
        ensure!(
            self.target > 0.0,
            "criterion {}: target must be positive, got {}",
            self.id,
            self.target
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Criterion {
        Criterion {
            id: "crit-1".into(),
            name: "Coleta Seletiva".into(),
            value: 40.0,
            target: 100.0,
            due_date: NaiveDate::from_ymd_opt(2024, 6, 14).unwrap(),
            responsible: "Maria Souza".into(),
            department: "Meio Ambiente".into(),
            description: String::new(),
            periodicity: Periodicity::Monthly,
            completions: HashMap::new(),
        }
    }

    #[test]
    fn completion_pct_is_value_over_target() {
        let c = sample();
        assert_relative_eq!(c.completion_pct().unwrap(), 40.0);
    }

    #[test]
    fn completion_pct_undefined_for_non_positive_target() {
        let mut c = sample();
        c.target = 0.0;
        assert_eq!(c.completion_pct(), None);
        c.target = -5.0;
        assert_eq!(c.completion_pct(), None);
    }

    #[test]
    fn validate_rejects_non_positive_target() {
        let mut c = sample();
        assert!(c.validate().is_ok());
        c.target = 0.0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn completion_marks_are_per_user() {
        let mut c = sample();
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        c.completions.insert("user-7".into(), CompletionState::done(at));
        assert!(c.is_completed_by("user-7"));
        assert!(!c.is_completed_by("user-8"));
    }

    #[test]
    fn periodicity_serializes_in_portuguese() {
        let tokens = [
            (Periodicity::Every15Days, "\"15-dias\""),
            (Periodicity::Every30Days, "\"30-dias\""),
            (Periodicity::Monthly, "\"mensal\""),
            (Periodicity::Bimonthly, "\"bimestral\""),
            (Periodicity::Semiannual, "\"semestral\""),
            (Periodicity::Annual, "\"anual\""),
        ];
        for (p, expected) in tokens {
            assert_eq!(serde_json::to_string(&p).unwrap(), expected);
            assert_eq!(serde_json::from_str::<Periodicity>(expected).unwrap(), p);
        }
    }

    #[test]
    fn periods_per_year_table() {
        assert_eq!(Periodicity::Every15Days.periods_per_year(), 24);
        assert_eq!(Periodicity::Every30Days.periods_per_year(), 12);
        assert_eq!(Periodicity::Monthly.periods_per_year(), 12);
        assert_eq!(Periodicity::Bimonthly.periods_per_year(), 6);
        assert_eq!(Periodicity::Semiannual.periods_per_year(), 2);
        assert_eq!(Periodicity::Annual.periods_per_year(), 1);
    }
}
