//! The alert evaluation pass.
//!
//! [`AlertEvaluator`] owns the two pieces of state that survive between
//! passes (the emission history used for dedup and the daily counter)
//! and computes which alerts fire for a given set of criteria and
//! rules at a given moment. A pass is deterministic in (criteria,
//! rules, history, counter, now); all delivery, bus, and email work
//! belongs to the caller.
//!
//! ## Template placeholders
//!
//! Criterion fields: `{nome}`, `{dataVencimento}` (DD/MM/YYYY),
//! `{responsavel}`, `{secretaria}`, `{valor}`, `{meta}`. Contextual:
//! `{diasRestantes}` (absolute days until due) and, for shortfall
//! matches, `{percentualDiferenca}` (rounded `threshold - pct`).
//! Unknown placeholders stay verbatim.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, info, warn};

use tj_calendar::BusinessCalendar;
use tj_core::RuleId;

use crate::alert::{Alert, AlertKind};
use crate::config::EvaluatorConfig;
use crate::criterion::Criterion;
use crate::history::{AlertHistory, DailyCounter};
use crate::rule::{AlertRule, ChannelSet, Trigger};
use crate::template;

// ── Due-date arithmetic ──────────────────────────────────────────────────────

/// Whole days from `now` until `due` at midnight, rounded up.
///
/// Due later today (or exactly at midnight) is `0`; due tomorrow is
/// `1`; overdue is negative, one per full day elapsed.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use tj_alerts::evaluator::days_until_due;
///
/// let due = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
/// let morning = NaiveDate::from_ymd_opt(2024, 6, 14)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// assert_eq!(days_until_due(due, morning), 0);
/// ```
pub fn days_until_due(due: NaiveDate, now: NaiveDateTime) -> i64 {
    let due_midnight = due.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
    let secs = (due_midnight - now).num_seconds();
    (secs + 86_399).div_euclid(86_400)
}

// ── Emission ─────────────────────────────────────────────────────────────────

/// One alert produced by a pass, with the routing data the caller
/// needs to forward it.
#[derive(Debug, Clone, PartialEq)]
pub struct Emission {
    /// The emitted alert.
    pub alert: Alert,
    /// The rule that fired.
    pub rule_id: RuleId,
    /// The rule's delivery channels.
    pub channels: ChannelSet,
}

/// A matched trigger, carrying the context the template needs.
struct TriggerMatch {
    kind: AlertKind,
    days_remaining: i64,
    pct_shortfall: Option<f64>,
}

// ── Evaluator ────────────────────────────────────────────────────────────────

/// Evaluates alert rules against criteria, carrying dedup history and
/// the daily emission counter across passes.
#[derive(Debug)]
pub struct AlertEvaluator {
    config: EvaluatorConfig,
    calendar: Arc<dyn BusinessCalendar>,
    history: AlertHistory,
    counter: DailyCounter,
}

impl AlertEvaluator {
    /// Build an evaluator with empty history and a zeroed counter.
    pub fn new(config: EvaluatorConfig, calendar: Arc<dyn BusinessCalendar>) -> Self {
        Self {
            config,
            calendar,
            history: AlertHistory::new(),
            counter: DailyCounter::default(),
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Alerts emitted so far today.
    pub fn alerts_today(&self) -> u32 {
        self.counter.count()
    }

    /// The retained emission history.
    pub fn history(&self) -> &AlertHistory {
        &self.history
    }

    /// Zero the daily counter for `today`.
    ///
    /// The counter also rolls by itself on the first pass of a new
    /// date; this explicit reset lets the runtime's midnight task log
    /// the rollover at a predictable moment.
    pub fn reset_daily_counter(&mut self, today: NaiveDate) {
        self.counter.reset(today);
        info!(day = %today, "daily alert counter reset");
    }

    /// Run one evaluation pass.
    ///
    /// Emissions come out in rule-then-criterion order. An empty result
    /// means nothing fired, the evaluator is disabled, or the daily cap
    /// was already reached when the pass started (the cap is not
    /// re-checked mid-pass).
    pub fn run_pass(
        &mut self,
        criteria: &[Criterion],
        rules: &[AlertRule],
        now: NaiveDateTime,
    ) -> Vec<Emission> {
        self.counter.roll(now.date());
        self.history.prune(now);

        if !self.config.enabled {
            debug!("evaluator disabled; skipping pass");
            return Vec::new();
        }
        if self.counter.is_exhausted(self.config.max_alerts_per_day) {
            warn!(
                emitted = self.counter.count(),
                cap = self.config.max_alerts_per_day,
                "daily alert cap reached; skipping pass"
            );
            return Vec::new();
        }

        let mut out = Vec::new();
        for rule in rules.iter().filter(|r| r.enabled) {
            if let Err(e) = rule.validate() {
                warn!(rule = %rule.id, error = %e, "skipping malformed rule");
                continue;
            }
            for criterion in criteria.iter().filter(|c| rule.applies_to(&c.department)) {
                if let Some(emission) = self.evaluate_one(rule, criterion, now) {
                    out.push(emission);
                }
            }
        }
        if !out.is_empty() {
            info!(emitted = out.len(), "evaluation pass emitted alerts");
        }
        out
    }

    /// Evaluate one (rule, criterion) pair at `now`.
    fn evaluate_one(
        &mut self,
        rule: &AlertRule,
        criterion: &Criterion,
        now: NaiveDateTime,
    ) -> Option<Emission> {
        let matched = match rule.trigger {
            Trigger::DueDate { days_offset } => {
                let remaining = days_until_due(criterion.due_date, now);
                let fires = if days_offset == 0 {
                    // due today or overdue
                    remaining <= 0
                } else {
                    // single-day window, exactly N days out
                    remaining == days_offset
                };
                if !fires {
                    return None;
                }
                TriggerMatch {
                    kind: AlertKind::DueDate,
                    days_remaining: remaining,
                    pct_shortfall: None,
                }
            }
            Trigger::TargetShortfall { threshold_pct } => {
                let pct = match criterion.completion_pct() {
                    Some(p) => p,
                    None => {
                        debug!(
                            criterion = %criterion.id,
                            "non-positive target; shortfall rule skipped"
                        );
                        return None;
                    }
                };
                if pct >= threshold_pct {
                    return None;
                }
                TriggerMatch {
                    kind: AlertKind::TargetShortfall,
                    days_remaining: days_until_due(criterion.due_date, now),
                    pct_shortfall: Some(threshold_pct - pct),
                }
            }
            Trigger::StatusChange | Trigger::Inactivity => return None,
        };

        if (self.config.business_days_only || rule.business_days_only)
            && !self.calendar.is_working_day(now.date())
        {
            let deferred = self.calendar.next_working_day(now.date());
            debug!(
                rule = %rule.id,
                criterion = %criterion.id,
                deferred = %deferred,
                "non-working day; emission suppressed"
            );
            return None;
        }

        if self
            .history
            .was_recently_emitted(&criterion.id, matched.kind, now)
        {
            debug!(
                rule = %rule.id,
                criterion = %criterion.id,
                kind = %matched.kind,
                "suppressed by 24h dedup"
            );
            return None;
        }

        let message = template::render(&rule.template, &render_vars(criterion, &matched));
        let alert = Alert::new(
            criterion.id.clone(),
            matched.kind,
            message,
            rule.priority,
            now,
        );
        self.history.record(criterion.id.clone(), matched.kind, now);
        self.counter.record();
        debug!(
            rule = %rule.id,
            criterion = %criterion.id,
            kind = %matched.kind,
            "alert emitted"
        );
        Some(Emission {
            alert,
            rule_id: rule.id.clone(),
            channels: rule.channels,
        })
    }
}

/// Build the placeholder table for one matched (rule, criterion) pair.
fn render_vars(criterion: &Criterion, matched: &TriggerMatch) -> Vec<(&'static str, String)> {
    let mut vars = vec![
        ("nome", criterion.name.clone()),
        (
            "dataVencimento",
            criterion.due_date.format("%d/%m/%Y").to_string(),
        ),
        ("responsavel", criterion.responsible.clone()),
        ("secretaria", criterion.department.clone()),
        ("valor", criterion.value.to_string()),
        ("meta", criterion.target.to_string()),
        ("diasRestantes", matched.days_remaining.abs().to_string()),
    ];
    if let Some(diff) = matched.pct_shortfall {
        vars.push(("percentualDiferenca", (diff.round() as i64).to_string()));
    }
    vars
}
