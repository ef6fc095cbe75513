pub mod file;
pub mod time;
