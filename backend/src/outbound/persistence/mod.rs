//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Each repository port from [`crate::domain::ports`] has a Diesel
//! implementation here, backed by `diesel-async` connections from a shared
//! bb8 pool.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   internal; only domain types cross the boundary.
//! - Database failures map onto the port's error enum. Unique violations
//!   become `Duplicate` where the port has that variant.
//! - Adapters hold no business rules. Lifecycle checks live in the domain
//!   services.
//!
//! # Example
//!
//! ```ignore
//! use hostel::outbound::persistence::{DbPool, DieselOutpassRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/hostel")).await?;
//! let outpasses = DieselOutpassRepository::new(pool);
//! ```

mod diesel_attendance_repository;
mod diesel_complaint_repository;
mod diesel_error_mapping;
mod diesel_hostel_info_repository;
mod diesel_leave_form_repository;
mod diesel_outpass_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_attendance_repository::DieselAttendanceRepository;
pub use diesel_complaint_repository::DieselComplaintRepository;
pub use diesel_hostel_info_repository::DieselHostelInfoRepository;
pub use diesel_leave_form_repository::DieselLeaveFormRepository;
pub use diesel_outpass_repository::DieselOutpassRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
