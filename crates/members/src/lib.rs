//! Member domain: the registrant entity, its field rules, and domain events.

pub mod member;
pub mod validation;

pub use member::{Member, MemberEvent, MemberRegistered};
pub use validation::validate;
