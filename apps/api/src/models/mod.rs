pub mod report;
pub mod resume;
