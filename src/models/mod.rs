pub mod enums;
pub mod parameter;
pub mod report;

pub use enums::*;
pub use parameter::*;
pub use report::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },
}
