#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use enrollment::modules::courses::repository::CourseRepository;
use enrollment::modules::students::repository::StudentRepository;
use enrollment::modules::users::repository::UserRepository;
use enrollment::router::init_router;
use enrollment::state::AppState;
use enrollment_auth::create_access_token;
use enrollment_config::{CorsConfig, JwtConfig};
use enrollment_core::{AppError, CredentialHasher, Role};
use enrollment_models::{
    Course, CourseId, NewStudent, NewUser, Student, StudentChanges, StudentId, StudentView, User,
    UserId,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    students: Vec<Student>,
    courses: Vec<Course>,
}

/// Backs all three repository traits with in-process tables that enforce the
/// same unique keys as the schema.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    /// Seeds CS201, CS301, and MA101. There is no CS101.
    pub fn with_courses() -> Self {
        let repo = Self::default();
        {
            let mut tables = repo.tables.lock().unwrap();
            for (id, code, name) in [
                (1, "CS201", "Data Structures"),
                (2, "CS301", "Operating Systems"),
                (3, "MA101", "Calculus I"),
            ] {
                tables.courses.push(Course {
                    course_id: CourseId(id),
                    course_code: code.to_string(),
                    course_name: name.to_string(),
                });
            }
        }
        repo
    }

    pub fn student(&self, id: StudentId) -> Option<Student> {
        let tables = self.tables.lock().unwrap();
        tables.students.iter().find(|s| s.student_id == id).cloned()
    }

    pub fn student_count(&self) -> usize {
        self.tables.lock().unwrap().students.len()
    }

    pub fn user(&self, username: &str) -> Option<User> {
        let tables = self.tables.lock().unwrap();
        tables.users.iter().find(|u| u.username == username).cloned()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }

    pub fn course_id(&self, code: &str) -> CourseId {
        let tables = self.tables.lock().unwrap();
        tables
            .courses
            .iter()
            .find(|c| c.course_code == code)
            .map(|c| c.course_id)
            .unwrap()
    }

    /// Inserts a student row directly, bypassing the role gate.
    pub fn seed_student(&self, full_name: &str, email: &str, course_code: Option<&str>) -> StudentId {
        let course_id = course_code.map(|code| self.course_id(code));
        let mut tables = self.tables.lock().unwrap();
        let student_id = StudentId(tables.students.len() as i64 + 1);
        tables.students.push(Student {
            student_id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: None,
            course_id,
        });
        student_id
    }

    /// Inserts a student with a chosen id, as if earlier rows had been deleted.
    pub fn seed_student_with_id(&self, id: StudentId, full_name: &str, email: &str) {
        let mut tables = self.tables.lock().unwrap();
        tables.students.push(Student {
            student_id: id,
            full_name: full_name.to_string(),
            email: email.to_string(),
            phone: None,
            course_id: None,
        });
    }

    /// Inserts a user directly with a pre-hashed password and optional link.
    pub fn seed_user(&self, username: &str, role: Role, linked: Option<StudentId>) -> UserId {
        let mut tables = self.tables.lock().unwrap();
        let id = UserId(tables.users.len() as i64 + 1);
        tables.users.push(User {
            id,
            username: username.to_string(),
            password_hash: PlainHasher::digest("secret"),
            role,
            linked_student_id: linked,
        });
        id
    }

    fn view(tables: &Tables, student: &Student) -> StudentView {
        let course = student
            .course_id
            .and_then(|id| tables.courses.iter().find(|c| c.course_id == id));

        StudentView {
            student_id: student.student_id,
            full_name: student.full_name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            course_id: student.course_id,
            course_name: course.map(|c| c.course_name.clone()),
            course_code: course.map(|c| c.course_code.clone()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert(&self, user: NewUser) -> Result<UserId, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::conflict(anyhow!("Username already exists")));
        }

        let id = UserId(tables.users.len() as i64 + 1);
        tables.users.push(User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            role: user.role,
            linked_student_id: None,
        });
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.user(username))
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn set_linked_student(
        &self,
        id: UserId,
        student_id: StudentId,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.linked_student_id = Some(student_id);
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for InMemoryRepository {
    async fn insert(&self, student: NewStudent) -> Result<StudentId, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.students.iter().any(|s| s.email == student.email) {
            return Err(AppError::conflict(anyhow!("Email already exists")));
        }

        let student_id = StudentId(
            tables
                .students
                .iter()
                .map(|s| s.student_id.into_inner())
                .max()
                .unwrap_or(0)
                + 1,
        );
        tables.students.push(Student {
            student_id,
            full_name: student.full_name,
            email: student.email,
            phone: student.phone,
            course_id: student.course_id,
        });
        Ok(student_id)
    }

    async fn list_views(&self) -> Result<Vec<StudentView>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .students
            .iter()
            .map(|s| Self::view(&tables, s))
            .collect())
    }

    async fn find_view(&self, id: StudentId) -> Result<Option<StudentView>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .students
            .iter()
            .find(|s| s.student_id == id)
            .map(|s| Self::view(&tables, s)))
    }

    async fn list_views_by_course(
        &self,
        course_id: CourseId,
    ) -> Result<Vec<StudentView>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .students
            .iter()
            .filter(|s| s.course_id == Some(course_id))
            .map(|s| Self::view(&tables, s))
            .collect())
    }

    async fn apply_changes(
        &self,
        id: StudentId,
        changes: &StudentChanges,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        if let Some(email) = &changes.email {
            if tables
                .students
                .iter()
                .any(|s| &s.email == email && s.student_id != id)
            {
                return Err(AppError::conflict(anyhow!("Email already exists")));
            }
        }

        if let Some(student) = tables.students.iter_mut().find(|s| s.student_id == id) {
            changes.merge_into(student);
        }
        Ok(())
    }

    async fn delete(&self, id: StudentId) -> Result<(), AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.students.retain(|s| s.student_id != id);
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn list_all(&self) -> Result<Vec<Course>, AppError> {
        Ok(self.tables.lock().unwrap().courses.clone())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Course>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .courses
            .iter()
            .find(|c| c.course_code == code)
            .cloned())
    }
}

/// Reversible stand-in for bcrypt so tests stay fast.
pub struct PlainHasher;

impl PlainHasher {
    pub fn digest(password: &str) -> String {
        format!("plain${}", password)
    }
}

impl CredentialHasher for PlainHasher {
    fn hash(&self, password: &str) -> Result<String, AppError> {
        Ok(Self::digest(password))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        Ok(Self::digest(password) == hash)
    }
}

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_state(repo: &Arc<InMemoryRepository>) -> AppState {
    AppState::new(
        repo.clone(),
        repo.clone(),
        repo.clone(),
        Arc::new(PlainHasher),
        jwt_config(),
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    )
}

pub fn setup_test_app() -> (Router, Arc<InMemoryRepository>) {
    let repo = Arc::new(InMemoryRepository::with_courses());
    (init_router(test_state(&repo)), repo)
}

pub fn token_for(user_id: UserId, role: Role) -> String {
    create_access_token(user_id.into_inner(), role, &jwt_config()).unwrap()
}

/// Sends one request and returns the status and the JSON body (`Null` when
/// the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = body.map(|body| serde_json::to_string(&body).unwrap());
    send_raw(app, method, uri, token, body.as_deref()).await
}

/// Like [`send`], but with the body text passed through untouched.
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
