mod add;
mod get;
mod location;
mod plan;

pub use add::*;
pub use get::*;
pub use location::*;
pub use plan::*;
