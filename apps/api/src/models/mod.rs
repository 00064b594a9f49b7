pub mod assessment;
pub mod career;
pub mod job;
pub mod user;
