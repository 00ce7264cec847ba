use chrono::NaiveDateTime;

/// Source of the current local wall-clock time.
pub trait WallClock: Send + Sync {
    /// Current local date and time. Read fresh on every call.
    fn now(&self) -> NaiveDateTime;
}
