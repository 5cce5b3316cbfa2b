use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, RegisterResponse,
};
use crate::modules::courses::model::{Course, CourseRoster};
use crate::modules::students::model::{
    CreateStudentDto, CreatedStudentResponse, StudentView, UpdateStudentDto,
};
use crate::modules::users::model::LinkStudentDto;
use crate::router::HealthResponse;
use enrollment_core::Role;
use enrollment_core::errors::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health_check,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::courses::controller::list_courses,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_students_by_course,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
        crate::modules::users::controller::link_student_account,
    ),
    components(
        schemas(
            Role,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            MessageResponse,
            Course,
            CourseRoster,
            StudentView,
            CreateStudentDto,
            CreatedStudentResponse,
            UpdateStudentDto,
            LinkStudentDto,
            HealthResponse,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness check"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Courses", description = "Course catalog"),
        (name = "Students", description = "Student records"),
        (name = "Users", description = "User account management")
    ),
    info(
        title = "Enrollment API",
        version = "0.1.0",
        description = "Role-gated student and course enrollment API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
