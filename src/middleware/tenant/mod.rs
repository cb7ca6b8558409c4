mod getheader;
mod resolver;
mod resolver_middleware;

pub use getheader::*;
pub use resolver::*;
pub use resolver_middleware::*;

pub const TENANT_HEADER: &str = "x-tenant-id";
