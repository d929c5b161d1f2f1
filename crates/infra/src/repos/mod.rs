mod event;
mod shared;
mod subscription;
mod user;

use event::{InMemoryEventRepo, PostgresEventRepo};
use sqlx::PgPool;
use std::sync::Arc;
use subscription::{InMemorySubscriptionRepo, PostgresSubscriptionRepo};
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use event::IEventRepo;
pub use subscription::{ISubscriptionRepo, SubscriptionStoreError};
pub use user::IUserRepo;

#[derive(Clone)]
pub struct Repos {
    pub subscriptions: Arc<dyn ISubscriptionRepo>,
    pub events: Arc<dyn IEventRepo>,
    pub users: Arc<dyn IUserRepo>,
}

impl Repos {
    pub fn create_postgres(pool: PgPool) -> Self {
        Self {
            subscriptions: Arc::new(PostgresSubscriptionRepo::new(pool.clone())),
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool)),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            subscriptions: Arc::new(InMemorySubscriptionRepo::new()),
            events: Arc::new(InMemoryEventRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
        }
    }
}
