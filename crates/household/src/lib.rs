mod query;
mod resolver;
mod service;

pub use query::*;
pub use resolver::*;
pub use service::*;
