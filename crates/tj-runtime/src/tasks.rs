//! Background tasks: the periodic evaluation loop and the midnight
//! counter reset.
//!
//! Both are plain `tokio::spawn`ed loops returning their
//! [`JoinHandle`]s; hosts abort them on shutdown. Criteria and rules
//! are pulled through closures on every tick so the loop always sees
//! the host's current data without holding a reference to its storage.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use tj_alerts::{AlertRule, Criterion};

use crate::service::AlertService;

/// Spawn the periodic evaluation loop.
///
/// Runs a pass immediately, then every
/// [`check_interval_minutes`](tj_alerts::EvaluatorConfig::check_interval_minutes)
/// minutes. `criteria_fn` and `rules_fn` are called once per tick.
pub fn spawn_evaluation_loop<C, R>(
    service: Arc<AlertService>,
    criteria_fn: C,
    rules_fn: R,
) -> JoinHandle<()>
where
    C: Fn() -> Vec<Criterion> + Send + 'static,
    R: Fn() -> Vec<AlertRule> + Send + 'static,
{
    let period = Duration::from_secs(service.config().check_interval_minutes * 60);
    tokio::spawn(async move {
        info!(period_secs = period.as_secs(), "evaluation loop started");
        let mut ticker = tokio::time::interval(period);
        loop {
            // First tick completes immediately.
            ticker.tick().await;
            let criteria = criteria_fn();
            let rules = rules_fn();
            let emissions = service.check_now(&criteria, &rules);
            debug!(
                criteria = criteria.len(),
                emitted = emissions.len(),
                "periodic evaluation pass finished"
            );
        }
    })
}

/// Spawn the task that zeroes the daily alert counter at midnight.
pub fn spawn_midnight_reset(service: Arc<AlertService>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let pause = until_next_midnight(service.clock().now());
            tokio::time::sleep(pause).await;
            service.reset_daily_counter();
        }
    })
}

/// Time from `now` until the next midnight, floored at one second so a
/// reset landing exactly on the boundary cannot spin.
fn until_next_midnight(now: NaiveDateTime) -> Duration {
    let next = now
        .date()
        .succ_opt()
        .expect("calendar date range exhausted")
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time");
    let secs = (next - now).num_seconds().max(1);
    Duration::from_secs(secs as u64)
}
