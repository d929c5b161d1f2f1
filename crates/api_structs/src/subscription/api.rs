use crate::dtos::{SubscriptionDTO, SubscriptionWithDetailsDTO};
use pulsebridge_domain::{Subscription, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub subscription: SubscriptionDTO,
    pub message: String,
}

impl SubscriptionResponse {
    pub fn new(subscription: Subscription, message: impl Into<String>) -> Self {
        Self {
            subscription: SubscriptionDTO::new(subscription),
            message: message.into(),
        }
    }
}

pub mod subscribe_to_event {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = SubscriptionResponse;
}

pub mod get_event_subscription {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub is_subscribed: bool,
        /// Whether the current user is allowed to subscribe to the event
        pub can_subscribe: bool,
        pub subscription: Option<SubscriptionDTO>,
    }

    impl APIResponse {
        pub fn new(subscription: Option<Subscription>, can_subscribe: bool) -> Self {
            Self {
                is_subscribed: subscription.is_some(),
                can_subscribe,
                subscription: subscription.map(SubscriptionDTO::new),
            }
        }
    }
}

pub mod unsubscribe_from_event {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = SubscriptionResponse;
}

pub mod delete_subscription {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub subscription_id: ID,
    }

    pub type APIResponse = SubscriptionResponse;
}

pub mod update_subscription_reminder {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub subscription_id: ID,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_hours: i64,
    }

    pub type APIResponse = SubscriptionResponse;
}

pub mod get_subscriptions {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub subscriptions: Vec<SubscriptionWithDetailsDTO>,
    }

    impl APIResponse {
        pub fn new(subscriptions: Vec<SubscriptionWithDetailsDTO>) -> Self {
            Self { subscriptions }
        }
    }
}
