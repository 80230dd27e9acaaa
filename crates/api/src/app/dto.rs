//! Request/response DTOs and JSON mapping.

use serde::{Deserialize, Serialize};

use rollcall_members::Member;

/// Incoming member payload (POST/PUT body).
///
/// Fields default to empty strings so a missing field reports as a field
/// violation (400) instead of a body-shape error. Any `id` in the body is
/// ignored: the store assigns ids on POST and the path wins on PUT.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "phoneNumber", default)]
    pub phone_number: String,
    #[serde(default)]
    pub id: Option<i64>,
}

impl MemberPayload {
    /// Turn the payload into an unpersisted candidate.
    pub fn into_candidate(self) -> Member {
        Member::new(self.name, self.email, self.phone_number)
    }
}

/// Outgoing member representation.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: Option<i64>,
    pub name: String,
    pub email: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id().map(|id| id.as_i64()),
            name: member.name().to_string(),
            email: member.email().to_string(),
            phone_number: member.phone_number().to_string(),
        }
    }
}

/// Query parameters for the list endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub ordered: bool,
}
