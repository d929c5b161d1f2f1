use crate::dtos::{EventDTO, UserDTO};
use pulsebridge_domain::{Event, Subscription, SubscriptionStatus, User, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDTO {
    pub id: ID,
    pub event_id: ID,
    pub volunteer_id: ID,
    pub status: SubscriptionStatus,
    pub reminder_hours: i64,
    pub reminder_sent: bool,
    pub created: i64,
    pub updated: i64,
}

impl SubscriptionDTO {
    pub fn new(subscription: Subscription) -> Self {
        Self {
            id: subscription.id,
            event_id: subscription.event_id,
            volunteer_id: subscription.volunteer_id,
            status: subscription.status,
            reminder_hours: subscription.reminder_hours,
            reminder_sent: subscription.reminder_sent,
            created: subscription.created,
            updated: subscription.updated,
        }
    }
}

/// A `Subscription` together with its event and volunteer. The details are
/// absent when the referenced records no longer exist.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionWithDetailsDTO {
    pub subscription: SubscriptionDTO,
    pub event: Option<EventDTO>,
    pub volunteer: Option<UserDTO>,
}

impl SubscriptionWithDetailsDTO {
    pub fn new(subscription: Subscription, event: Option<Event>, volunteer: Option<User>) -> Self {
        Self {
            subscription: SubscriptionDTO::new(subscription),
            event: event.map(EventDTO::new),
            volunteer: volunteer.map(UserDTO::new),
        }
    }
}
