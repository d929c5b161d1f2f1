use crate::error::PulseError;
use pulsebridge_domain::{Subscription, MAX_REMINDER_HOURS, MIN_REMINDER_HOURS};

pub struct Guard {}

impl Guard {
    pub fn against_invalid_reminder_hours(hours: i64) -> Result<i64, PulseError> {
        if Subscription::is_valid_reminder_hours(hours) {
            Ok(hours)
        } else {
            Err(PulseError::BadClientData(format!(
                "The reminder hours: {} must be between {} and {}",
                hours, MIN_REMINDER_HOURS, MAX_REMINDER_HOURS
            )))
        }
    }
}
