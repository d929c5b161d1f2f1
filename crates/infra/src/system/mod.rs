use chrono::Utc;

/// Source of the current time.
///
/// Everything that compares against "now" goes through this trait so that
/// reminder windows can be tested with a fixed clock.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;
}

/// Wall clock
pub struct RealSys {}

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}
