//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod profile;
pub mod school;
pub mod signup;
pub mod user;

// Re-export commonly used models
pub use event::{CreateEventRequest, Event, EventFilter, EventWithCounts, UpdateEventRequest};
pub use profile::{Profile, UpsertProfileRequest};
pub use school::School;
pub use signup::{AttendeeRow, Signup, SignupStatus, SignupWithEvent};
pub use user::{CreateUserRequest, User, UserView};
