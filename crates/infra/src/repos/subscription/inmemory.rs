use super::{ISubscriptionRepo, SubscriptionStoreError};
use crate::repos::shared::inmemory_repo::*;
use pulsebridge_domain::{Subscription, ID};

pub struct InMemorySubscriptionRepo {
    subscriptions: std::sync::Mutex<Vec<Subscription>>,
}

impl InMemorySubscriptionRepo {
    pub fn new() -> Self {
        Self {
            subscriptions: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ISubscriptionRepo for InMemorySubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> Result<(), SubscriptionStoreError> {
        let inserted = insert_unique(subscription, &self.subscriptions, |s| {
            s.event_id == subscription.event_id && s.volunteer_id == subscription.volunteer_id
        });
        if inserted {
            Ok(())
        } else {
            Err(SubscriptionStoreError::AlreadyExists {
                event_id: subscription.event_id.clone(),
                volunteer_id: subscription.volunteer_id.clone(),
            })
        }
    }

    async fn save(&self, subscription: &Subscription) -> anyhow::Result<()> {
        save(subscription, &self.subscriptions);
        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        find(subscription_id, &self.subscriptions)
    }

    async fn find_by_event_and_volunteer(
        &self,
        event_id: &ID,
        volunteer_id: &ID,
    ) -> Option<Subscription> {
        find_by(&self.subscriptions, |s| {
            s.event_id == *event_id && s.volunteer_id == *volunteer_id
        })
        .into_iter()
        .next()
    }

    async fn find_by_volunteer(&self, volunteer_id: &ID) -> anyhow::Result<Vec<Subscription>> {
        Ok(find_by(&self.subscriptions, |s| s.volunteer_id == *volunteer_id))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Subscription>> {
        Ok(find_by(&self.subscriptions, |_| true))
    }

    async fn find_pending(&self) -> anyhow::Result<Vec<Subscription>> {
        Ok(find_by(&self.subscriptions, |s| s.awaiting_reminder()))
    }

    async fn mark_reminder_sent(
        &self,
        subscription: &Subscription,
        updated: i64,
    ) -> anyhow::Result<bool> {
        Ok(update_one_if(
            &subscription.id,
            &self.subscriptions,
            |s| {
                !s.reminder_sent
                    && s.updated == subscription.updated
                    && s.reminder_hours == subscription.reminder_hours
            },
            |s| {
                s.reminder_sent = true;
                s.updated = updated;
            },
        ))
    }

    async fn delete(&self, subscription_id: &ID) -> Option<Subscription> {
        delete(subscription_id, &self.subscriptions)
    }
}
