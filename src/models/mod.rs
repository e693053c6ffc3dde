pub mod activity;

pub use activity::Activity;

/// Activity name -> activity, kept in insertion order so listings follow the
/// seed.
pub type ActivityCatalog = indexmap::IndexMap<String, Activity>;
