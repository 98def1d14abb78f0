pub mod entry;
pub mod volume;
