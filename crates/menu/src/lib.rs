mod command;
mod merge;
mod planner;
mod query;
mod template;
mod types;
mod week;

pub use command::*;
pub use merge::*;
pub use planner::*;
pub use query::*;
pub use template::*;
pub use types::*;
pub use week::*;
