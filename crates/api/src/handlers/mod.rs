//! Request handlers, one module per admin resource.

pub mod assets;
pub mod assignments;
pub mod categories;
pub mod employees;
pub mod portal;
