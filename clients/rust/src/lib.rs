mod base;
mod status;
mod subscription;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use pulsebridge_api_structs::dtos::*;
pub use pulsebridge_api_structs::SubscriptionResponse;
pub use pulsebridge_domain::{Role, SubscriptionStatus, ID};
use status::StatusClient;
use std::sync::Arc;
use subscription::SubscriptionClient;
pub use subscription::{SubscribeOutcome, UpdateReminderInput};

/// PulseBridge reminders SDK
///
/// The SDK contains methods for interacting with the subscription and
/// reminder API on behalf of a user.
#[derive(Clone)]
pub struct PulseSDK {
    pub status: StatusClient,
    pub subscription: SubscriptionClient,
}

impl PulseSDK {
    /// Client acting as the `User` with the given id
    pub fn new<T: Into<String>>(address: String, user_id: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_user(user_id.into());
        Self::from_base(base)
    }

    /// Client without a current user
    pub fn anonymous(address: String) -> Self {
        Self::from_base(BaseClient::new(address))
    }

    fn from_base(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let status = StatusClient::new(base.clone());
        let subscription = SubscriptionClient::new(base);

        Self {
            status,
            subscription,
        }
    }
}
