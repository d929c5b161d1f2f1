use crate::shared::usecase::UseCase;
use pulsebridge_domain::{ReminderDecision, Subscription};
use pulsebridge_infra::{Delivery, PulseContext};
use tracing::{error, info, warn};

/// Counters of a single reminder sweep
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepSummary {
    /// Reminders delivered and marked as sent
    pub reminded: usize,
    /// Subscriptions closed because their event started without a reminder
    pub expired: usize,
    pub not_yet_due: usize,
    /// Subscriptions left untouched because related data is missing
    pub skipped: usize,
    /// Subscriptions that will be retried on the next sweep
    pub failed: usize,
    /// Subscriptions changed or removed while being processed. They are left
    /// as they are and evaluated again on the next sweep.
    pub superseded: usize,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Reminded,
    Expired,
    NotYetDue,
    Skipped,
    Failed,
    Superseded,
}

impl SweepSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Reminded => self.reminded += 1,
            Outcome::Expired => self.expired += 1,
            Outcome::NotYetDue => self.not_yet_due += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
            Outcome::Superseded => self.superseded += 1,
        }
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

/// Evaluates every pending `Subscription` against the current time and
/// sends the reminders that are due
#[derive(Debug)]
pub struct SendRemindersUseCase {}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRemindersUseCase {
    type Response = SweepSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "SendReminders";

    async fn execute(&mut self, ctx: &PulseContext) -> Result<Self::Response, Self::Error> {
        let pending = ctx
            .repos
            .subscriptions
            .find_pending()
            .await
            .map_err(|e| {
                error!("Unable to load pending subscriptions: {:?}", e);
                UseCaseError::StorageError
            })?;

        let now = ctx.sys.get_timestamp_millis();
        let mut summary = SweepSummary::default();
        for subscription in &pending {
            let outcome = process_subscription(subscription, now, ctx).await;
            summary.record(outcome);
        }

        Ok(summary)
    }
}

async fn process_subscription(
    subscription: &Subscription,
    now: i64,
    ctx: &PulseContext,
) -> Outcome {
    let event = match ctx.repos.events.find(&subscription.event_id).await {
        Some(event) => event,
        None => {
            warn!(
                subscription_id = %subscription.id,
                event_id = %subscription.event_id,
                "Skipping reminder, the event was not found"
            );
            return Outcome::Skipped;
        }
    };

    match subscription.reminder_decision(&event, now) {
        ReminderDecision::NotYetDue => Outcome::NotYetDue,
        ReminderDecision::EventStarted => {
            mark_reminder_sent(subscription, now, ctx, Outcome::Expired).await
        }
        ReminderDecision::Due => {
            let volunteer = match ctx.repos.users.find(&subscription.volunteer_id).await {
                Some(volunteer) => volunteer,
                None => {
                    warn!(
                        subscription_id = %subscription.id,
                        "Skipping reminder, the volunteer was not found"
                    );
                    return Outcome::Skipped;
                }
            };

            match ctx
                .notifier
                .send_event_reminder(&volunteer, &event, subscription.reminder_hours)
                .await
            {
                Ok(Delivery::Skipped) => Outcome::Skipped,
                Ok(_) => mark_reminder_sent(subscription, now, ctx, Outcome::Reminded).await,
                Err(e) => {
                    error!(
                        subscription_id = %subscription.id,
                        "Unable to send event reminder, will retry: {:?}",
                        e
                    );
                    Outcome::Failed
                }
            }
        }
    }
}

async fn mark_reminder_sent(
    subscription: &Subscription,
    now: i64,
    ctx: &PulseContext,
    outcome: Outcome,
) -> Outcome {
    match ctx
        .repos
        .subscriptions
        .mark_reminder_sent(subscription, now)
        .await
    {
        Ok(true) => {
            info!(
                subscription_id = %subscription.id,
                "Reminder closed: {:?}",
                outcome
            );
            outcome
        }
        Ok(false) => {
            info!(
                subscription_id = %subscription.id,
                "Subscription changed during the sweep, leaving it for the next one"
            );
            Outcome::Superseded
        }
        Err(e) => {
            error!(
                subscription_id = %subscription.id,
                "Unable to mark reminder as sent: {:?}",
                e
            );
            Outcome::Failed
        }
    }
}
