pub mod assessment;
pub mod candidate;
pub mod job;
pub mod response;
