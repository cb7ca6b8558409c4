pub(crate) mod client;
pub mod health_checks;
pub(crate) mod plan;
pub(crate) mod tenant;
pub(crate) mod work_order;

pub use health_checks::*;
