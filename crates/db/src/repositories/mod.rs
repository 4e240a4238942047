//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. The assignment repository
//! additionally owns the transactional deploy/return lifecycle operations.

pub mod asset_repo;
pub mod assignment_repo;
pub mod category_repo;
pub mod employee_repo;

pub use asset_repo::AssetRepo;
pub use assignment_repo::AssignmentRepo;
pub use category_repo::CategoryRepo;
pub use employee_repo::EmployeeRepo;
