pub mod context;
pub mod label;
pub mod vpa;
