pub mod plan;
pub mod tenant;
pub mod work_order;
