pub mod client;
pub mod tenant;
pub mod work_order;
