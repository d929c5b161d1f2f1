use super::{ISubscriptionRepo, SubscriptionStoreError};
use pulsebridge_domain::{Subscription, SubscriptionStatus, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresSubscriptionRepo {
    pool: PgPool,
}

impl PostgresSubscriptionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct SubscriptionRaw {
    subscription_uid: Uuid,
    event_uid: Uuid,
    volunteer_uid: Uuid,
    status: String,
    reminder_hours: i64,
    reminder_sent: bool,
    created: i64,
    updated: i64,
}

impl From<SubscriptionRaw> for Subscription {
    fn from(raw: SubscriptionRaw) -> Self {
        Self {
            id: raw.subscription_uid.into(),
            event_id: raw.event_uid.into(),
            volunteer_id: raw.volunteer_uid.into(),
            status: SubscriptionStatus::from(raw.status.as_str()),
            reminder_hours: raw.reminder_hours,
            reminder_sent: raw.reminder_sent,
            created: raw.created,
            updated: raw.updated,
        }
    }
}

fn into_subscriptions(rows: Vec<SubscriptionRaw>) -> Vec<Subscription> {
    rows.into_iter().map(|s| s.into()).collect()
}

#[async_trait::async_trait]
impl ISubscriptionRepo for PostgresSubscriptionRepo {
    async fn insert(&self, subscription: &Subscription) -> Result<(), SubscriptionStoreError> {
        let res = sqlx::query(
            r#"
            INSERT INTO subscriptions
            (subscription_uid, event_uid, volunteer_uid, status, reminder_hours, reminder_sent, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(subscription.id.inner())
        .bind(subscription.event_id.inner())
        .bind(subscription.volunteer_id.inner())
        .bind(subscription.status.as_str())
        .bind(subscription.reminder_hours)
        .bind(subscription.reminder_sent)
        .bind(subscription.created)
        .bind(subscription.updated)
        .execute(&self.pool)
        .await;

        match res {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Err(SubscriptionStoreError::AlreadyExists {
                    event_id: subscription.event_id.clone(),
                    volunteer_id: subscription.volunteer_id.clone(),
                })
            }
            Err(e) => Err(SubscriptionStoreError::Storage(e.into())),
        }
    }

    async fn save(&self, subscription: &Subscription) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE subscriptions
            SET status = $2,
            reminder_hours = $3,
            reminder_sent = $4,
            updated = $5
            WHERE subscription_uid = $1
            "#,
        )
        .bind(subscription.id.inner())
        .bind(subscription.status.as_str())
        .bind(subscription.reminder_hours)
        .bind(subscription.reminder_sent)
        .bind(subscription.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, subscription_id: &ID) -> Option<Subscription> {
        sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            WHERE s.subscription_uid = $1
            "#,
        )
        .bind(subscription_id.inner())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to find subscription: {}. Error: {:?}", subscription_id, e);
            None
        })
        .map(|s| s.into())
    }

    async fn find_by_event_and_volunteer(
        &self,
        event_id: &ID,
        volunteer_id: &ID,
    ) -> Option<Subscription> {
        sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            WHERE s.event_uid = $1 AND
            s.volunteer_uid = $2
            "#,
        )
        .bind(event_id.inner())
        .bind(volunteer_id.inner())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!(
                "Unable to find subscription for event: {} and volunteer: {}. Error: {:?}",
                event_id, volunteer_id, e
            );
            None
        })
        .map(|s| s.into())
    }

    async fn find_by_volunteer(&self, volunteer_id: &ID) -> anyhow::Result<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            WHERE s.volunteer_uid = $1
            ORDER BY s.created DESC
            "#,
        )
        .bind(volunteer_id.inner())
        .fetch_all(&self.pool)
        .await?;
        Ok(into_subscriptions(rows))
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            ORDER BY s.created DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(into_subscriptions(rows))
    }

    async fn find_pending(&self) -> anyhow::Result<Vec<Subscription>> {
        let rows = sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            SELECT * FROM subscriptions AS s
            WHERE s.status = $1 AND
            s.reminder_sent = FALSE
            "#,
        )
        .bind(SubscriptionStatus::Subscribed.as_str())
        .fetch_all(&self.pool)
        .await?;
        Ok(into_subscriptions(rows))
    }

    async fn mark_reminder_sent(
        &self,
        subscription: &Subscription,
        updated: i64,
    ) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            UPDATE subscriptions
            SET reminder_sent = TRUE,
            updated = $2
            WHERE subscription_uid = $1 AND
            reminder_sent = FALSE AND
            updated = $3 AND
            reminder_hours = $4
            "#,
        )
        .bind(subscription.id.inner())
        .bind(updated)
        .bind(subscription.updated)
        .bind(subscription.reminder_hours)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, subscription_id: &ID) -> Option<Subscription> {
        sqlx::query_as::<_, SubscriptionRaw>(
            r#"
            DELETE FROM subscriptions AS s
            WHERE s.subscription_uid = $1
            RETURNING *
            "#,
        )
        .bind(subscription_id.inner())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            error!("Unable to delete subscription: {}. Error: {:?}", subscription_id, e);
            None
        })
        .map(|s| s.into())
    }
}
