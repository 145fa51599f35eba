//! Business logic services

pub mod students;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub students: students::StudentsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            students: students::StudentsService::new(Arc::new(repository.students)),
        }
    }
}
