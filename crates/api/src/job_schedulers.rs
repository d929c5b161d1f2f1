use crate::{
    shared::usecase::execute,
    subscription::send_reminders::{SendRemindersUseCase, SweepSummary},
};
use pulsebridge_infra::PulseContext;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};
use std::time::Duration;
use tokio::{
    task::JoinHandle,
    time::{interval, MissedTickBehavior},
};
use tracing::{error, info, warn};

/// Periodically sends the reminders of upcoming events.
///
/// The first sweep runs right away when started, the following ones on
/// every tick of the configured interval. Two sweeps never overlap.
pub struct ReminderSweeper {
    ctx: PulseContext,
    running: AtomicBool,
    sweeping: Arc<AtomicBool>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl ReminderSweeper {
    pub fn new(ctx: PulseContext) -> Self {
        Self {
            ctx,
            running: AtomicBool::new(false),
            sweeping: Arc::new(AtomicBool::new(false)),
            handle: Mutex::new(None),
        }
    }

    /// Returns false if the sweeper was already running
    pub fn start(&self) -> bool {
        if self.running.swap(true, Ordering::SeqCst) {
            return false;
        }

        let ctx = self.ctx.clone();
        let sweeping = self.sweeping.clone();
        let period = Duration::from_millis(ctx.config.reminder_interval_millis);
        let handle = actix_web::rt::spawn(async move {
            let mut interval = interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                let ctx = ctx.clone();
                let sweeping = sweeping.clone();
                actix_web::rt::spawn(async move {
                    run_sweep(&ctx, &sweeping).await;
                });
            }
        });

        match self.handle.lock() {
            Ok(mut guard) => *guard = Some(handle),
            Err(e) => error!("Unable to store the reminder sweeper handle: {:?}", e),
        }
        info!(
            "Reminder sweeper started (interval: {}ms)",
            self.ctx.config.reminder_interval_millis
        );
        true
    }

    /// Stops the timer. Sweeps already in flight run to completion.
    /// Returns false if the sweeper was not running.
    pub fn stop(&self) -> bool {
        if !self.running.swap(false, Ordering::SeqCst) {
            return false;
        }

        let handle = match self.handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(e) => {
                error!("Unable to access the reminder sweeper handle: {:?}", e);
                None
            }
        };
        if let Some(handle) = handle {
            handle.abort();
        }
        info!("Reminder sweeper stopped");
        true
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Runs a single sweep. Returns `None` if the sweep did not run, either
    /// because another sweep is in progress or because the pending
    /// subscriptions could not be loaded.
    pub async fn sweep_now(&self) -> Option<SweepSummary> {
        run_sweep(&self.ctx, &self.sweeping).await
    }
}

impl Drop for ReminderSweeper {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Resets the in progress flag, also when the sweep panics
struct SweepGuard<'a>(&'a AtomicBool);

impl Drop for SweepGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

async fn run_sweep(ctx: &PulseContext, sweeping: &AtomicBool) -> Option<SweepSummary> {
    if sweeping
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        warn!("Previous reminder sweep is still running, skipping this one");
        return None;
    }
    let _guard = SweepGuard(sweeping);

    match execute(SendRemindersUseCase {}, ctx).await {
        Ok(summary) => {
            info!(
                reminded = summary.reminded,
                expired = summary.expired,
                not_yet_due = summary.not_yet_due,
                skipped = summary.skipped,
                failed = summary.failed,
                superseded = summary.superseded,
                "Reminder sweep completed"
            );
            Some(summary)
        }
        Err(_) => None,
    }
}
