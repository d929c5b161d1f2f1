mod event;
mod status;
mod subscription;
mod user;

pub mod dtos {
    pub use crate::event::dtos::*;
    pub use crate::subscription::dtos::*;
    pub use crate::user::dtos::*;
}

pub use crate::status::api::*;
pub use crate::subscription::api::*;
