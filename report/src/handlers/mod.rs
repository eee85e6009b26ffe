pub mod download;
pub mod report;
