pub mod walk;

pub use walk::collect_relative_files;
