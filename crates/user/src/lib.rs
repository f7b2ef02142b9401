mod account;
mod pseudo;
pub mod validation;

pub use account::*;
pub use pseudo::*;
