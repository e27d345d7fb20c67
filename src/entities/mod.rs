pub mod prelude;

pub mod applications;
pub mod cache_entries;
pub mod jobs;
pub mod users;
