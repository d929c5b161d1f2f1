const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;

/// Outcome of evaluating a pending reminder at a given point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderDecision {
    /// The reminder window has not been entered yet
    NotYetDue,
    /// `now` is inside the reminder window, the reminder should be sent
    Due,
    /// The event has already started and the reminder was never sent.
    /// It should be closed without notifying anyone.
    EventStarted,
}

/// Timestamp at which the reminder window of an event opens
pub fn reminder_window_start(start_ts: i64, reminder_hours: i64) -> i64 {
    start_ts - reminder_hours * MILLIS_PER_HOUR
}

/// The reminder window is the closed interval
/// `[start_ts - reminder_hours, start_ts]`.
pub fn evaluate_reminder(start_ts: i64, reminder_hours: i64, now: i64) -> ReminderDecision {
    if now > start_ts {
        ReminderDecision::EventStarted
    } else if reminder_window_start(start_ts, reminder_hours) <= now {
        ReminderDecision::Due
    } else {
        ReminderDecision::NotYetDue
    }
}
