pub mod event;
pub mod label;
