use super::{Delivery, DeliveryError, IMailer, OutgoingMail};
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex,
};

/// Keeps delivered mails in memory. Can be switched into a failing
/// state to simulate an unreachable mail server, or made to reject
/// single recipients.
pub struct InMemoryMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    failing: AtomicBool,
    rejected_recipients: Mutex<Vec<String>>,
    attempts: AtomicUsize,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
            rejected_recipients: Mutex::new(Vec::new()),
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Mails to `to` fail until the mailer is recreated
    pub fn reject_recipient(&self, to: &str) {
        self.rejected_recipients.lock().unwrap().push(to.into());
    }

    pub fn sent_mails(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }

    /// Number of delivery attempts, failed ones included
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl Default for InMemoryMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send_mail(&self, mail: OutgoingMail) -> Result<Delivery, DeliveryError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let rejected = self
            .rejected_recipients
            .lock()
            .unwrap()
            .iter()
            .any(|to| *to == mail.to);
        if rejected || self.failing.load(Ordering::SeqCst) {
            return Err(DeliveryError::Unavailable(format!(
                "Unable to deliver mail to: {}",
                mail.to
            )));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(Delivery::Sent)
    }
}
