mod client;
mod tenant;
mod tenant_plan;
mod work_order;
mod work_order_status;

pub use client::*;
pub use tenant::*;
pub use tenant_plan::*;
pub use work_order::*;
pub use work_order_status::*;

/// Tenant id resolved from the request, placed in request extensions.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TenantId(pub String);
