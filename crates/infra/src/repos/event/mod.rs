mod inmemory;
mod postgres;

pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;
use pulsebridge_domain::{Event, ID};

/// Events are managed by the wider platform. This service only needs to
/// read them, the write operations exist for seeding and tests.
#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    async fn insert(&self, event: &Event) -> anyhow::Result<()>;
    async fn find(&self, event_id: &ID) -> Option<Event>;
    async fn find_many(&self, event_ids: &[ID]) -> anyhow::Result<Vec<Event>>;
    async fn delete(&self, event_id: &ID) -> Option<Event>;
}

#[cfg(test)]
mod tests {
    use crate::PulseContext;
    use pulsebridge_domain::{Event, ID};

    #[tokio::test]
    async fn find_many_events() {
        let ctx = PulseContext::create_inmemory();
        let owner = ID::new();
        let e1 = Event::new(owner.clone(), "Beach cleanup", 1000);
        let e2 = Event::new(owner.clone(), "Food drive", 2000);
        let e3 = Event::new(owner, "Tree planting", 3000);
        for e in [&e1, &e2, &e3].iter() {
            ctx.repos.events.insert(e).await.expect("To insert event");
        }

        let res = ctx
            .repos
            .events
            .find_many(&[e1.id.clone(), e3.id.clone(), ID::new()])
            .await
            .unwrap();
        assert_eq!(res.len(), 2);
        assert!(res.iter().any(|e| e.id == e1.id));
        assert!(res.iter().any(|e| e.id == e3.id));

        assert!(ctx.repos.events.delete(&e2.id).await.is_some());
        assert!(ctx.repos.events.find(&e2.id).await.is_none());
    }
}
