use super::subscribe_to_event::{SubscribeToEventUseCase, UseCaseResponse};
use crate::shared::usecase::Subscriber;
use pulsebridge_infra::PulseContext;
use tracing::{error, info};

pub struct SendConfirmationOnSubscribed;

#[async_trait::async_trait(?Send)]
impl Subscriber<SubscribeToEventUseCase> for SendConfirmationOnSubscribed {
    async fn notify(&self, e: &UseCaseResponse, ctx: &PulseContext) {
        if !e.created {
            return;
        }

        let notifier = ctx.notifier.clone();
        let volunteer = e.volunteer.clone();
        let event = e.event.clone();
        let subscription_id = e.subscription.id.clone();
        let reminder_hours = e.subscription.reminder_hours;

        // Sideeffect, the subscription stands regardless of the outcome
        actix_web::rt::spawn(async move {
            match notifier
                .send_subscription_confirmation(&volunteer, &event, reminder_hours)
                .await
            {
                Ok(delivery) => info!(
                    subscription_id = %subscription_id,
                    "Subscription confirmation handled: {:?}",
                    delivery
                ),
                Err(e) => error!(
                    subscription_id = %subscription_id,
                    "Unable to send subscription confirmation: {:?}",
                    e
                ),
            }
        });
    }
}
