use crate::shared::entity::{Entity, ID};

/// An `Event` published on the platform that volunteers can subscribe to.
///
/// Only the fields needed to evaluate reminders and to render notifications
/// are modeled here.
#[derive(Debug, Clone)]
pub struct Event {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub location: Option<String>,
    /// Start of the event as a unix timestamp in millis
    pub start_ts: i64,
}

impl Event {
    pub fn new(owner_id: ID, title: impl Into<String>, start_ts: i64) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title: title.into(),
            location: None,
            start_ts,
        }
    }

    pub fn is_owned_by(&self, user_id: &ID) -> bool {
        self.owner_id == *user_id
    }

    pub fn has_started(&self, now: i64) -> bool {
        now > self.start_ts
    }
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}
