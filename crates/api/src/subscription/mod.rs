mod delete_subscription;
mod get_event_subscription;
mod get_subscriptions;
pub mod send_reminders;
mod subscribe_to_event;
mod subscribers;
mod unsubscribe_from_event;
mod update_subscription_reminder;

use actix_web::web;
use delete_subscription::delete_subscription_controller;
use get_event_subscription::get_event_subscription_controller;
use get_subscriptions::get_subscriptions_controller;
use subscribe_to_event::subscribe_to_event_controller;
use unsubscribe_from_event::unsubscribe_from_event_controller;
use update_subscription_reminder::update_subscription_reminder_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/events/{event_id}/subscription",
        web::post().to(subscribe_to_event_controller),
    );
    cfg.route(
        "/events/{event_id}/subscription",
        web::get().to(get_event_subscription_controller),
    );
    cfg.route(
        "/events/{event_id}/subscription",
        web::delete().to(unsubscribe_from_event_controller),
    );

    cfg.route("/subscriptions", web::get().to(get_subscriptions_controller));
    cfg.route(
        "/subscriptions/{subscription_id}",
        web::delete().to(delete_subscription_controller),
    );
    cfg.route(
        "/subscriptions/{subscription_id}/reminder",
        web::put().to(update_subscription_reminder_controller),
    );
}

#[cfg(test)]
pub(crate) mod test_utils {
    use chrono::DateTime;
    use pulsebridge_domain::{Event, Subscription, User};
    use pulsebridge_infra::{ISys, InMemoryMailer, NotificationSender, PulseContext};
    use std::sync::Arc;

    pub struct StaticTimeSys(pub i64);

    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    pub fn ts(datetime: &str) -> i64 {
        DateTime::parse_from_rfc3339(datetime)
            .expect("Valid datetime")
            .timestamp_millis()
    }

    pub struct TestContext {
        pub ctx: PulseContext,
        pub mailer: Arc<InMemoryMailer>,
        pub owner: User,
        pub volunteer: User,
        pub admin: User,
        /// Starts 2024-01-10T10:00:00Z
        pub event: Event,
    }

    /// In memory context with the clock set to 2024-01-01
    pub async fn setup() -> TestContext {
        let mut ctx = PulseContext::create_inmemory();
        let mailer = Arc::new(InMemoryMailer::new());
        ctx.notifier = NotificationSender::new(mailer.clone());
        ctx.sys = Arc::new(StaticTimeSys(ts("2024-01-01T00:00:00Z")));

        let owner = User::new("owner@example.com", "owner");
        let volunteer = User::new("volunteer@example.com", "volunteer");
        let admin = User::new_admin("admin@example.com", "admin");
        for user in [&owner, &volunteer, &admin].iter() {
            ctx.repos.users.insert(user).await.unwrap();
        }

        let mut event = Event::new(owner.id.clone(), "Beach cleanup", ts("2024-01-10T10:00:00Z"));
        event.location = Some("Main beach".into());
        ctx.repos.events.insert(&event).await.unwrap();

        TestContext {
            ctx,
            mailer,
            owner,
            volunteer,
            admin,
            event,
        }
    }

    /// Stores a `Subscription` without triggering any notifications
    pub async fn subscribe(ctx: &PulseContext, event: &Event, volunteer: &User) -> Subscription {
        let subscription = Subscription::new(
            event.id.clone(),
            volunteer.id.clone(),
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos.subscriptions.insert(&subscription).await.unwrap();
        subscription
    }
}
