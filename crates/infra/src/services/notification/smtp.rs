use super::{Delivery, DeliveryError, IMailer, OutgoingMail};
use crate::config::MailConfig;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{error, info};

/// Port for SMTP over implicit TLS
const IMPLICIT_TLS_PORT: u16 = 465;

type Transport = AsyncSmtpTransport<Tokio1Executor>;

/// Delivers mails over SMTP. Without a complete `MailConfig` mails are
/// only written to the log.
pub struct SmtpMailer {
    config: Arc<MailConfig>,
    transport: OnceCell<Transport>,
}

impl SmtpMailer {
    pub fn new(config: Arc<MailConfig>) -> Self {
        Self {
            config,
            transport: OnceCell::new(),
        }
    }

    async fn transport(&self) -> Result<&Transport, DeliveryError> {
        self.transport
            .get_or_try_init(|| async {
                let transport = build_transport(&self.config)?;
                verify_in_background(transport.clone());
                Ok::<_, DeliveryError>(transport)
            })
            .await
    }

    fn log_mail(&self, mail: &OutgoingMail) {
        info!(
            to = %mail.to,
            subject = %mail.subject,
            body = %mail.body,
            "SMTP is not configured, logging mail instead of sending it"
        );
    }

    fn build_message(&self, mail: OutgoingMail) -> Result<Message, DeliveryError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.username);
        let from: Mailbox = from
            .parse()
            .map_err(|_| DeliveryError::InvalidAddress(from.clone()))?;
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|_| DeliveryError::InvalidAddress(mail.to.clone()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;
        Ok(message)
    }
}

fn build_transport(config: &MailConfig) -> Result<Transport, DeliveryError> {
    let builder = if config.port == IMPLICIT_TLS_PORT {
        Transport::relay(&config.host)?
    } else {
        Transport::starttls_relay(&config.host)?
    };
    let credentials = Credentials::new(
        config.username.clone(),
        config.password.expose_secret().clone(),
    );

    Ok(builder
        .port(config.port)
        .credentials(credentials)
        .build())
}

/// A failed verification does not disable the transport, every send
/// will still be attempted
fn verify_in_background(transport: Transport) {
    tokio::spawn(async move {
        match transport.test_connection().await {
            Ok(true) => info!("SMTP transport verified and ready to send mails"),
            Ok(false) => error!("SMTP transport verification failed: server not ready"),
            Err(e) => error!("SMTP transport verification failed: {:?}", e),
        }
    });
}

#[async_trait::async_trait]
impl IMailer for SmtpMailer {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<Delivery, DeliveryError> {
        if !self.config.is_configured() {
            self.log_mail(&mail);
            return Ok(Delivery::Logged);
        }

        let to = mail.to.clone();
        let message = self.build_message(mail)?;
        let response = self.transport().await?.send(message).await?;
        info!("Mail sent to: {}. Response code: {}", to, response.code());
        Ok(Delivery::Sent)
    }
}
