//! Team infrastructure implementations

mod in_memory;
mod lookup;
mod postgres_repository;
mod registration;

pub use in_memory::InMemoryTeamRepository;
pub use lookup::TeamLookupService;
pub use postgres_repository::{MAX_MEMBERS_PER_TEAM, PostgresTeamRepository};
pub use registration::TeamRegistrationService;
