mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailConfig};
pub use repos::{IEventRepo, ISubscriptionRepo, IUserRepo, Repos, SubscriptionStoreError};
pub use services::*;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct PulseContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub notifier: NotificationSender,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl PulseContext {
    async fn create(params: ContextParams) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&params.postgres_connection_string)
            .await?;
        sqlx::migrate!().run(&pool).await?;

        let config = Config::new();
        let notifier = NotificationSender::new(Arc::new(SmtpMailer::new(config.mail.clone())));
        Ok(Self {
            repos: Repos::create_postgres(pool),
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        })
    }

    /// Context backed by in memory repositories. Mails are logged
    /// unless SMTP is configured in the environment.
    pub fn create_inmemory() -> Self {
        let config = Config::new();
        let notifier = NotificationSender::new(Arc::new(SmtpMailer::new(config.mail.clone())));
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            notifier,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<PulseContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(postgres_connection_string) => {
            PulseContext::create(ContextParams {
                postgres_connection_string,
            })
            .await
        }
        Err(_) => {
            info!(
                "{} env var is not present, using in memory repositories.",
                PSQL_CONNECTION_STRING
            );
            Ok(PulseContext::create_inmemory())
        }
    }
}
