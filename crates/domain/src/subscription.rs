use crate::{
    event::Event,
    reminder::{evaluate_reminder, ReminderDecision},
    shared::entity::{Entity, ID},
    user::User,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_REMINDER_HOURS: i64 = 24;
pub const MIN_REMINDER_HOURS: i64 = 1;
/// One week
pub const MAX_REMINDER_HOURS: i64 = 24 * 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Subscribed,
    Cancelled,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Subscribed => "subscribed",
            SubscriptionStatus::Cancelled => "cancelled",
        }
    }
}

impl From<&str> for SubscriptionStatus {
    fn from(status: &str) -> Self {
        match status {
            "subscribed" => SubscriptionStatus::Subscribed,
            _ => SubscriptionStatus::Cancelled,
        }
    }
}

/// A volunteer's registration to an `Event`.
///
/// There is at most one `Subscription` per event and volunteer, which is
/// guarded by the storage layer. A `Subscription` is removed entirely when
/// the volunteer unsubscribes.
#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: ID,
    pub event_id: ID,
    pub volunteer_id: ID,
    pub status: SubscriptionStatus,
    /// How many hours before the start of the event the reminder should be sent
    pub reminder_hours: i64,
    /// Set once the reminder has been dispatched or the event started
    /// without one. Only a reminder preference update resets it.
    pub reminder_sent: bool,
    pub created: i64,
    pub updated: i64,
}

impl Subscription {
    pub fn new(event_id: ID, volunteer_id: ID, now: i64) -> Self {
        Self {
            id: Default::default(),
            event_id,
            volunteer_id,
            status: SubscriptionStatus::Subscribed,
            reminder_hours: DEFAULT_REMINDER_HOURS,
            reminder_sent: false,
            created: now,
            updated: now,
        }
    }

    pub fn is_valid_reminder_hours(hours: i64) -> bool {
        (MIN_REMINDER_HOURS..=MAX_REMINDER_HOURS).contains(&hours)
    }

    /// Whether this `Subscription` should be looked at by the reminder sweep
    pub fn awaiting_reminder(&self) -> bool {
        self.status == SubscriptionStatus::Subscribed && !self.reminder_sent
    }

    /// The volunteer and admins are allowed to change or remove a `Subscription`
    pub fn can_be_managed_by(&self, user: &User) -> bool {
        user.is_admin() || self.volunteer_id == user.id
    }

    /// Changes the reminder schedule and re-arms the reminder
    pub fn update_reminder(&mut self, reminder_hours: i64, now: i64) {
        self.reminder_hours = reminder_hours;
        self.reminder_sent = false;
        self.updated = now;
    }

    pub fn reminder_decision(&self, event: &Event, now: i64) -> ReminderDecision {
        evaluate_reminder(event.start_ts, self.reminder_hours, now)
    }
}

impl Entity for Subscription {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn new_subscription_defaults() {
        let sub = Subscription::new(ID::new(), ID::new(), 100);
        assert_eq!(sub.status, SubscriptionStatus::Subscribed);
        assert_eq!(sub.reminder_hours, DEFAULT_REMINDER_HOURS);
        assert!(!sub.reminder_sent);
        assert!(sub.awaiting_reminder());
        assert_eq!(sub.created, 100);
        assert_eq!(sub.updated, 100);
    }

    #[test]
    fn reminder_hours_bounds() {
        assert!(!Subscription::is_valid_reminder_hours(0));
        assert!(Subscription::is_valid_reminder_hours(1));
        assert!(Subscription::is_valid_reminder_hours(24));
        assert!(Subscription::is_valid_reminder_hours(168));
        assert!(!Subscription::is_valid_reminder_hours(169));
        assert!(!Subscription::is_valid_reminder_hours(-5));
    }

    #[test]
    fn update_reminder_rearms() {
        let mut sub = Subscription::new(ID::new(), ID::new(), 0);
        sub.reminder_sent = true;
        assert!(!sub.awaiting_reminder());

        sub.update_reminder(48, 10);
        assert_eq!(sub.reminder_hours, 48);
        assert!(!sub.reminder_sent);
        assert_eq!(sub.updated, 10);
        assert!(sub.awaiting_reminder());
    }

    #[test]
    fn cancelled_subscription_is_not_awaiting_reminder() {
        let mut sub = Subscription::new(ID::new(), ID::new(), 0);
        sub.status = SubscriptionStatus::Cancelled;
        assert!(!sub.awaiting_reminder());
    }

    #[test]
    fn managed_by_volunteer_or_admin() {
        let volunteer = User::new("vol@example.com", "vol");
        let other = User::new("other@example.com", "other");
        let admin = User::new_admin("admin@example.com", "admin");
        let sub = Subscription::new(ID::new(), volunteer.id.clone(), 0);

        assert!(sub.can_be_managed_by(&volunteer));
        assert!(sub.can_be_managed_by(&admin));
        assert!(!sub.can_be_managed_by(&other));
    }

    #[test]
    fn status_roundtrip_through_storage_representation() {
        for status in [SubscriptionStatus::Subscribed, SubscriptionStatus::Cancelled].iter() {
            assert_eq!(SubscriptionStatus::from(status.as_str()), *status);
        }
    }
}
