mod date;
mod event;
mod reminder;
mod shared;
mod subscription;
mod user;

pub use date::format_event_date;
pub use event::Event;
pub use reminder::{evaluate_reminder, reminder_window_start, ReminderDecision};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use subscription::{
    Subscription, SubscriptionStatus, DEFAULT_REMINDER_HOURS, MAX_REMINDER_HOURS,
    MIN_REMINDER_HOURS,
};
pub use user::{Role, User};
