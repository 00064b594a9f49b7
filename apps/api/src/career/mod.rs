pub mod experience;
pub mod job_match;
pub mod paths;
pub mod profile;
pub mod skills;
