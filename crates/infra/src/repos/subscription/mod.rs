mod inmemory;
mod postgres;

pub use inmemory::InMemorySubscriptionRepo;
pub use postgres::PostgresSubscriptionRepo;
use pulsebridge_domain::{Subscription, ID};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SubscriptionStoreError {
    #[error("A subscription for event: {event_id} and volunteer: {volunteer_id} already exists")]
    AlreadyExists { event_id: ID, volunteer_id: ID },
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[async_trait::async_trait]
pub trait ISubscriptionRepo: Send + Sync {
    /// Fails with `AlreadyExists` if the volunteer is already subscribed to the event
    async fn insert(&self, subscription: &Subscription) -> Result<(), SubscriptionStoreError>;
    async fn save(&self, subscription: &Subscription) -> anyhow::Result<()>;
    async fn find(&self, subscription_id: &ID) -> Option<Subscription>;
    async fn find_by_event_and_volunteer(
        &self,
        event_id: &ID,
        volunteer_id: &ID,
    ) -> Option<Subscription>;
    async fn find_by_volunteer(&self, volunteer_id: &ID) -> anyhow::Result<Vec<Subscription>>;
    async fn find_all(&self) -> anyhow::Result<Vec<Subscription>>;
    /// Subscriptions that are still subscribed and have not had their reminder sent
    async fn find_pending(&self) -> anyhow::Result<Vec<Subscription>>;
    /// Marks the reminder of `subscription` as sent, unless the stored record
    /// was changed or removed after `subscription` was loaded.
    /// Returns whether the record was marked.
    async fn mark_reminder_sent(
        &self,
        subscription: &Subscription,
        updated: i64,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, subscription_id: &ID) -> Option<Subscription>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PulseContext;
    use pulsebridge_domain::SubscriptionStatus;

    #[tokio::test]
    async fn rejects_duplicate_subscriptions() {
        let ctx = PulseContext::create_inmemory();
        let event_id = ID::new();
        let volunteer_id = ID::new();

        let sub = Subscription::new(event_id.clone(), volunteer_id.clone(), 0);
        ctx.repos
            .subscriptions
            .insert(&sub)
            .await
            .expect("To insert subscription");

        let duplicate = Subscription::new(event_id.clone(), volunteer_id.clone(), 10);
        let res = ctx.repos.subscriptions.insert(&duplicate).await;
        assert!(matches!(
            res,
            Err(SubscriptionStoreError::AlreadyExists { .. })
        ));

        // Same volunteer on another event is fine
        let other_event = Subscription::new(ID::new(), volunteer_id.clone(), 10);
        assert!(ctx.repos.subscriptions.insert(&other_event).await.is_ok());

        let found = ctx
            .repos
            .subscriptions
            .find_by_event_and_volunteer(&event_id, &volunteer_id)
            .await
            .expect("To find subscription");
        assert_eq!(found.id, sub.id);
        assert_eq!(
            ctx.repos
                .subscriptions
                .find_by_volunteer(&volunteer_id)
                .await
                .unwrap()
                .len(),
            2
        );
    }

    #[tokio::test]
    async fn finds_pending_subscriptions() {
        let ctx = PulseContext::create_inmemory();

        let pending = Subscription::new(ID::new(), ID::new(), 0);
        let mut sent = Subscription::new(ID::new(), ID::new(), 0);
        sent.reminder_sent = true;
        let mut cancelled = Subscription::new(ID::new(), ID::new(), 0);
        cancelled.status = SubscriptionStatus::Cancelled;

        for sub in [&pending, &sent, &cancelled].iter() {
            ctx.repos.subscriptions.insert(sub).await.unwrap();
        }

        let res = ctx.repos.subscriptions.find_pending().await.unwrap();
        assert_eq!(res.len(), 1);
        assert_eq!(res[0].id, pending.id);
        assert_eq!(ctx.repos.subscriptions.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn marks_reminder_sent() {
        let ctx = PulseContext::create_inmemory();
        let sub = Subscription::new(ID::new(), ID::new(), 0);
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        assert!(ctx
            .repos
            .subscriptions
            .mark_reminder_sent(&sub, 10)
            .await
            .unwrap());

        let res = ctx.repos.subscriptions.find(&sub.id).await.unwrap();
        assert!(res.reminder_sent);
        assert_eq!(res.reminder_hours, sub.reminder_hours);
        assert_eq!(res.updated, 10);
        assert!(ctx.repos.subscriptions.find_pending().await.unwrap().is_empty());

        // Already marked
        assert!(!ctx
            .repos
            .subscriptions
            .mark_reminder_sent(&sub, 20)
            .await
            .unwrap());
        let res = ctx.repos.subscriptions.find(&sub.id).await.unwrap();
        assert_eq!(res.updated, 10);
    }

    #[tokio::test]
    async fn does_not_mark_subscription_updated_after_load() {
        let ctx = PulseContext::create_inmemory();
        let loaded = Subscription::new(ID::new(), ID::new(), 0);
        ctx.repos.subscriptions.insert(&loaded).await.unwrap();

        let mut rearmed = loaded.clone();
        rearmed.update_reminder(2, 5);
        ctx.repos.subscriptions.save(&rearmed).await.unwrap();

        assert!(!ctx
            .repos
            .subscriptions
            .mark_reminder_sent(&loaded, 10)
            .await
            .unwrap());

        let res = ctx.repos.subscriptions.find(&loaded.id).await.unwrap();
        assert!(!res.reminder_sent);
        assert_eq!(res.reminder_hours, 2);
        assert_eq!(res.updated, 5);

        assert!(ctx
            .repos
            .subscriptions
            .mark_reminder_sent(&res, 10)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn does_not_mark_missing_subscription() {
        let ctx = PulseContext::create_inmemory();
        let sub = Subscription::new(ID::new(), ID::new(), 0);
        assert!(!ctx
            .repos
            .subscriptions
            .mark_reminder_sent(&sub, 10)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn deletes_subscription() {
        let ctx = PulseContext::create_inmemory();
        let sub = Subscription::new(ID::new(), ID::new(), 0);
        ctx.repos.subscriptions.insert(&sub).await.unwrap();

        let deleted = ctx.repos.subscriptions.delete(&sub.id).await;
        assert_eq!(deleted.map(|s| s.id), Some(sub.id.clone()));
        assert!(ctx.repos.subscriptions.find(&sub.id).await.is_none());
        assert!(ctx.repos.subscriptions.delete(&sub.id).await.is_none());

        // The pair can be subscribed again after deletion
        let again = Subscription::new(sub.event_id.clone(), sub.volunteer_id.clone(), 1);
        assert!(ctx.repos.subscriptions.insert(&again).await.is_ok());
    }
}
