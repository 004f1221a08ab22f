pub mod cache;
pub mod fixed;
pub mod yahoo;
