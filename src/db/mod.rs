pub mod client;
pub mod work_order;
