//! The scheduler service: timer loop, live reconfiguration, fire dispatch.

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use {
    chrono::{DateTime, Utc},
    chrono_tz::Tz,
    cron::Schedule,
    tokio::{
        sync::{Mutex, Notify, RwLock},
        task::JoinHandle,
    },
    tracing::{debug, info, warn},
};

use crate::{
    error::{Error, Result},
    schedule::{BROADCAST_TZ, next_fire, validate_expr},
};

/// Callback invoked on every scheduled fire.
pub type BroadcastFn =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// Introspection snapshot of the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerStatus {
    pub running: bool,
    pub expr: String,
    pub next_fire_at: Option<DateTime<Tz>>,
}

struct Trigger {
    expr: String,
    schedule: Schedule,
}

/// Owns the single recurring broadcast trigger.
///
/// The trigger is inert until [`start`](Self::start) is called (the caller
/// gates that on platform readiness), and [`reconfigure`](Self::reconfigure)
/// swaps the live schedule so the *next* fire uses the new timing. A fire
/// already dispatched is never affected.
pub struct RantScheduler {
    trigger: RwLock<Trigger>,
    on_fire: BroadcastFn,
    wake: Notify,
    running: RwLock<bool>,
    timer_handle: Mutex<Option<JoinHandle<()>>>,
}

impl RantScheduler {
    /// Build an inert scheduler around `expr`.
    pub fn with_expr(expr: &str, on_fire: BroadcastFn) -> Result<Arc<Self>> {
        let schedule = validate_expr(expr)?;
        Ok(Arc::new(Self {
            trigger: RwLock::new(Trigger {
                expr: expr.to_string(),
                schedule,
            }),
            on_fire,
            wake: Notify::new(),
            running: RwLock::new(false),
            timer_handle: Mutex::new(None),
        }))
    }

    /// Activate the trigger. No fire can happen before this is called, and
    /// calling it again is a no-op.
    pub async fn start(self: &Arc<Self>) {
        {
            let mut running = self.running.write().await;
            if *running {
                debug!("scheduler already running");
                return;
            }
            *running = true;
        }

        let svc = Arc::clone(self);
        let handle = tokio::spawn(async move {
            svc.timer_loop().await;
        });
        *self.timer_handle.lock().await = Some(handle);

        let status = self.status().await;
        info!(
            expr = %status.expr,
            next = ?status.next_fire_at.map(|t| t.to_rfc3339()),
            "broadcast scheduler started"
        );
    }

    /// Stop the timer loop.
    pub async fn stop(&self) {
        *self.running.write().await = false;
        self.wake.notify_one();
        if let Some(handle) = self.timer_handle.lock().await.take() {
            handle.abort();
        }
        info!("broadcast scheduler stopped");
    }

    /// Replace the live schedule and return the resulting next fire time.
    ///
    /// On error the previously active schedule keeps firing unchanged.
    pub async fn reconfigure(&self, expr: &str) -> Result<DateTime<Tz>> {
        let schedule = validate_expr(expr)?;
        let next = next_fire(&schedule, Utc::now().with_timezone(&BROADCAST_TZ))
            .ok_or_else(|| Error::exhausted(expr))?;

        {
            let mut trigger = self.trigger.write().await;
            trigger.expr = expr.to_string();
            trigger.schedule = schedule;
        }
        self.wake.notify_one();

        info!(expr, next = %next.to_rfc3339(), "broadcast schedule reconfigured");
        Ok(next)
    }

    /// Current schedule and next fire time.
    pub async fn status(&self) -> SchedulerStatus {
        let trigger = self.trigger.read().await;
        SchedulerStatus {
            running: *self.running.read().await,
            expr: trigger.expr.clone(),
            next_fire_at: next_fire(
                &trigger.schedule,
                Utc::now().with_timezone(&BROADCAST_TZ),
            ),
        }
    }

    // ── Internal ────────────────────────────────────────────────────────

    async fn timer_loop(self: &Arc<Self>) {
        // Earliest instant the next fire may target; advanced after each
        // fire so a sub-millisecond early wakeup cannot fire twice.
        let mut floor = Utc::now().with_timezone(&BROADCAST_TZ);

        loop {
            if !*self.running.read().await {
                break;
            }

            let now = Utc::now().with_timezone(&BROADCAST_TZ);
            let after = if floor > now { floor } else { now };
            let next = {
                let trigger = self.trigger.read().await;
                next_fire(&trigger.schedule, after)
            };

            let Some(next) = next else {
                warn!("schedule has no future occurrence, waiting for settime");
                self.wake.notified().await;
                continue;
            };

            let sleep_ms =
                (next.timestamp_millis() - Utc::now().timestamp_millis()).max(0) as u64;

            tokio::select! {
                () = tokio::time::sleep(Duration::from_millis(sleep_ms)) => {},
                () = self.wake.notified() => {
                    debug!("timer loop woken, recomputing next fire");
                    continue;
                },
            }

            if !*self.running.read().await {
                break;
            }

            debug!(at = %next.to_rfc3339(), "broadcast trigger fired");
            floor = next;
            tokio::spawn((self.on_fire)());
        }
    }
}
