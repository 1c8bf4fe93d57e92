pub mod extraction;
pub mod source;
