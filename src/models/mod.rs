pub mod journal_entry;
pub mod trip;

pub use journal_entry::{JournalEntry, JournalEntryFields};
pub use trip::{Trip, TripFields};

use chrono::{SecondsFormat, Utc};

/// Fixed-width RFC 3339 so that `created_at` sorts correctly as text.
fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}
