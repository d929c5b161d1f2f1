use pulsebridge_domain::{Event, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDTO {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub location: Option<String>,
    pub start_ts: i64,
}

impl EventDTO {
    pub fn new(event: Event) -> Self {
        Self {
            id: event.id,
            owner_id: event.owner_id,
            title: event.title,
            location: event.location,
            start_ts: event.start_ts,
        }
    }
}
