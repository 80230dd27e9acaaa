//! Persistence: the member repository seam and its backends.

pub mod in_memory;
pub mod postgres;
pub mod repository;
pub mod schema;

pub use in_memory::InMemoryMemberRepository;
pub use postgres::PostgresMemberRepository;
pub use repository::{ListOrder, MemberRepository};
pub use schema::ensure_schema;
