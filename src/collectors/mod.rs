pub mod statvfs;
pub mod tree;
