use std::sync::Arc;

use enrollment_config::{CorsConfig, JwtConfig};
use enrollment_db::PgPool;

use crate::modules::courses::repository::{CourseRepositoryState, PgCourseRepository};
use crate::modules::courses::service::CourseCatalog;
use crate::modules::students::repository::{PgStudentRepository, StudentRepositoryState};
use crate::modules::students::service::StudentRegistry;
use crate::modules::users::repository::{PgUserRepository, UserRepositoryState};
use crate::modules::users::service::{CredentialStore, HasherState};

/// Shared handles for request handlers. Holds no mutable state of its own.
#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub catalog: CourseCatalog,
    pub credentials: CredentialStore,
    pub registry: StudentRegistry,
}

impl AppState {
    /// Wires the services over the given repositories.
    pub fn new(
        users: UserRepositoryState,
        students: StudentRepositoryState,
        courses: CourseRepositoryState,
        hasher: HasherState,
        jwt_config: JwtConfig,
        cors_config: CorsConfig,
    ) -> Self {
        let catalog = CourseCatalog::new(courses);
        let credentials = CredentialStore::new(users.clone(), students.clone(), hasher);
        let registry = StudentRegistry::new(students, users, catalog.clone());

        Self {
            jwt_config,
            cors_config,
            catalog,
            credentials,
            registry,
        }
    }

    pub fn from_pool(pool: PgPool, hasher: HasherState) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgStudentRepository::new(pool.clone())),
            Arc::new(PgCourseRepository::new(pool)),
            hasher,
            JwtConfig::from_env(),
            CorsConfig::from_env(),
        )
    }
}
