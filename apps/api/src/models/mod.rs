pub mod application;
pub mod document;
pub mod job;
pub mod outreach;
pub mod profile;
