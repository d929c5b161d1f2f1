mod error;
mod job_schedulers;
mod shared;
mod status;
mod subscription;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use error::PulseError;
pub use job_schedulers::ReminderSweeper;
use pulsebridge_infra::PulseContext;
pub use shared::auth::USER_HEADER;
use std::{net::TcpListener, sync::Arc};
pub use subscription::send_reminders::SweepSummary;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    status::configure_routes(cfg);
    subscription::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    sweeper: Arc<ReminderSweeper>,
}

impl Application {
    pub async fn new(context: PulseContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let sweeper = Application::start_job_schedulers(context);

        Ok(Self {
            server,
            port,
            sweeper,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn sweeper(&self) -> Arc<ReminderSweeper> {
        self.sweeper.clone()
    }

    fn start_job_schedulers(context: PulseContext) -> Arc<ReminderSweeper> {
        let sweeper = Arc::new(ReminderSweeper::new(context));
        sweeper.start();
        sweeper
    }

    async fn configure_server(context: PulseContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();
        let context = web::Data::new(context);

        let server = HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(context.clone())
                .app_data(web::PathConfig::default().error_handler(|err, _| {
                    PulseError::BadClientData(err.to_string()).into()
                }))
                .app_data(web::JsonConfig::default().error_handler(|err, _| {
                    PulseError::BadClientData(err.to_string()).into()
                }))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    /// Serves requests until the server shuts down, then stops the sweeper
    pub async fn start(self) -> Result<(), std::io::Error> {
        let res = self.server.await;
        self.sweeper.stop();
        res
    }
}
