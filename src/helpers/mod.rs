pub(crate) mod form;
pub(crate) mod json;
pub mod maps;

pub(crate) use form::*;
pub use json::*;
