mod tracking;

pub use tracking::Tracking;
