use chrono::{Duration, Utc};
use pulsebridge_api::Application;
use pulsebridge_domain::{Event, User};
use pulsebridge_infra::{InMemoryMailer, NotificationSender, PulseContext};
use pulsebridge_sdk::PulseSDK;
use std::sync::Arc;

pub struct TestApp {
    pub ctx: PulseContext,
    pub mailer: Arc<InMemoryMailer>,
    pub address: String,
}

impl TestApp {
    pub async fn create_user(&self, username: &str) -> User {
        let user = User::new(format!("{}@example.com", username), username);
        self.ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    pub async fn create_admin(&self, username: &str) -> User {
        let user = User::new_admin(format!("{}@example.com", username), username);
        self.ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    /// Event far enough in the future to never be picked up by the sweeper
    pub async fn create_event(&self, owner: &User, title: &str) -> Event {
        let start = Utc::now() + Duration::days(30);
        self.create_event_at(owner, title, start.timestamp_millis())
            .await
    }

    pub async fn create_event_at(&self, owner: &User, title: &str, start_ts: i64) -> Event {
        let event = Event::new(owner.id.clone(), title, start_ts);
        self.ctx.repos.events.insert(&event).await.unwrap();
        event
    }

    pub fn sdk(&self, user: &User) -> PulseSDK {
        PulseSDK::new(self.address.clone(), user.id.to_string())
    }

    /// Waits for background notifications to be delivered
    pub async fn wait_for_mails(&self, count: usize) {
        for _ in 0..100 {
            if self.mailer.sent_mails().len() >= count {
                return;
            }
            actix_web::rt::time::sleep(std::time::Duration::from_millis(10)).await;
        }
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, PulseSDK) {
    let mut ctx = PulseContext::create_inmemory();
    ctx.config.port = 0; // Random port
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.notifier = NotificationSender::new(mailer.clone());

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}/api/v1", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let sdk = PulseSDK::anonymous(address.clone());
    let app = TestApp {
        ctx,
        mailer,
        address,
    };
    (app, sdk)
}
