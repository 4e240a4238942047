pub mod asset;
pub mod assignment;
pub mod category;
pub mod employee;
