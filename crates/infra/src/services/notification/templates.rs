use super::OutgoingMail;
use pulsebridge_domain::{format_event_date, Event, User};

const SIGNATURE: &str = "PulseBridge";

fn location(event: &Event) -> &str {
    match event.location.as_deref() {
        Some(location) if !location.trim().is_empty() => location,
        _ => "-",
    }
}

pub fn subscription_confirmation(user: &User, event: &Event, reminder_hours: i64) -> OutgoingMail {
    let body = format!(
        "Hello {}!\n\n\
        You have successfully subscribed to the event: {}\n\
        Date: {}\n\
        Location: {}\n\n\
        We will remind you {} hours before the event starts.\n\n\
        ---\n\
        {}",
        user.username,
        event.title,
        format_event_date(event.start_ts),
        location(event),
        reminder_hours,
        SIGNATURE
    );

    OutgoingMail {
        to: user.email.clone(),
        subject: format!("Subscription confirmed: {}", event.title),
        body,
    }
}

pub fn event_reminder(user: &User, event: &Event, reminder_hours: i64) -> OutgoingMail {
    let body = format!(
        "Hello {}!\n\n\
        This is your reminder for the event: {}\n\
        Starts at: {}\n\
        Location: {}\n\n\
        You asked to be reminded {} hours before the event.\n\n\
        ---\n\
        {}",
        user.username,
        event.title,
        format_event_date(event.start_ts),
        location(event),
        reminder_hours,
        SIGNATURE
    );

    OutgoingMail {
        to: user.email.clone(),
        subject: format!("Event Reminder: {}", event.title),
        body,
    }
}
