//! Domain event contract.

use chrono::{DateTime, Utc};

/// Something that happened in the domain, after the fact.
///
/// Events are published for observers only; nothing in the write path depends
/// on them being delivered.
pub trait Event {
    /// Stable, dotted event type name (e.g. `members.member.registered`).
    fn event_type(&self) -> &'static str;

    /// Schema version of the event payload.
    fn version(&self) -> u32;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
