//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{
    DatabasePool, EventRepository, ProfileRepository, SchoolRepository, SignupRepository,
    UserRepository,
};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub profiles: ProfileRepository,
    pub events: EventRepository,
    pub signups: SignupRepository,
    pub schools: SchoolRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool.clone()),
            events: EventRepository::new(pool.clone()),
            signups: SignupRepository::new(pool.clone()),
            schools: SchoolRepository::new(pool),
        }
    }
}
