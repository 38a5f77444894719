// Catalog integration tests
// Tests for fetching database objects from PostgreSQL and converting to catalog structs

pub mod aggregates;
pub mod domains;
pub mod grants;
pub mod indexes;
pub mod policies;
pub mod schemas;
pub mod views;
