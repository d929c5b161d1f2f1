use crate::base::{APIResponse, BaseClient};
use pulsebridge_api_structs::*;
use pulsebridge_domain::ID;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct SubscriptionClient {
    base: Arc<BaseClient>,
}

pub struct UpdateReminderInput {
    pub subscription_id: ID,
    pub reminder_hours: i64,
}

/// Result of subscribing to an event
#[derive(Debug)]
pub struct SubscribeOutcome {
    /// False when the user was already subscribed
    pub created: bool,
    pub response: SubscriptionResponse,
}

impl SubscriptionClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn subscribe(&self, event_id: ID) -> APIResponse<SubscribeOutcome> {
        self.base
            .post_empty::<subscribe_to_event::APIResponse>(
                format!("events/{}/subscription", event_id),
                &[StatusCode::CREATED, StatusCode::OK],
            )
            .await
            .map(|(status, response)| SubscribeOutcome {
                created: status == StatusCode::CREATED,
                response,
            })
    }

    pub async fn get_for_event(
        &self,
        event_id: ID,
    ) -> APIResponse<get_event_subscription::APIResponse> {
        self.base
            .get(
                format!("events/{}/subscription", event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn unsubscribe(
        &self,
        event_id: ID,
    ) -> APIResponse<unsubscribe_from_event::APIResponse> {
        self.base
            .delete(
                format!("events/{}/subscription", event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn list(&self) -> APIResponse<get_subscriptions::APIResponse> {
        self.base
            .get("subscriptions".into(), StatusCode::OK)
            .await
    }

    pub async fn delete(
        &self,
        subscription_id: ID,
    ) -> APIResponse<delete_subscription::APIResponse> {
        self.base
            .delete(
                format!("subscriptions/{}", subscription_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn update_reminder(
        &self,
        input: UpdateReminderInput,
    ) -> APIResponse<update_subscription_reminder::APIResponse> {
        let body = update_subscription_reminder::RequestBody {
            reminder_hours: input.reminder_hours,
        };
        self.base
            .put(
                body,
                format!("subscriptions/{}/reminder", input.subscription_id),
                StatusCode::OK,
            )
            .await
    }
}
