//! Repository implementations for database operations

pub mod event;
pub mod profile;
pub mod school;
pub mod signup;
pub mod user;

pub use event::EventRepository;
pub use profile::ProfileRepository;
pub use school::SchoolRepository;
pub use signup::SignupRepository;
pub use user::UserRepository;
