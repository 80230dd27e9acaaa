use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use rollcall_core::MemberId;
use rollcall_events::Event;

/// A registrant: name, email, phone number.
///
/// `id` is `None` until the store has persisted the record once; the store
/// assigns it on insert and it never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    id: Option<MemberId>,
    name: String,
    email: String,
    phone_number: String,
}

impl Member {
    /// Create an unpersisted candidate member.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }

    /// Rebuild a persisted member from stored fields (persistence layer only).
    pub fn hydrated(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
        }
    }

    pub fn id(&self) -> Option<MemberId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Attach the store-assigned id on insert.
    pub fn with_id(mut self, id: MemberId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Event: a member completed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRegistered {
    pub member: Member,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberEvent {
    Registered(MemberRegistered),
}

impl Event for MemberEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MemberEvent::Registered(_) => "members.member.registered",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            MemberEvent::Registered(e) => e.occurred_at,
        }
    }
}
