pub mod aws_json;
pub mod detection;
pub mod image;
pub mod pipeline;
pub mod report;
pub mod translation;
