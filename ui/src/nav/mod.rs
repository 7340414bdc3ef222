pub mod click;
pub mod links;
pub mod offset;
pub mod tracker;
pub mod visibility;

#[cfg(feature = "web")]
pub use tracker::NavTracker;
