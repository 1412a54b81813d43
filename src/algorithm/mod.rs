pub mod assignment;
pub mod path;
