mod add;
mod get;
mod status;
mod track;

pub use add::*;
pub use get::*;
pub use status::*;
pub use track::*;
