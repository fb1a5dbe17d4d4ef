use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::controller::ErrorResponse;
use crate::modules::auth::model::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequestDto, User, UserRole,
};
use crate::modules::courses::model::{
    Course, CourseDetail, CourseRoster, CreateCourseDto, EnrollRequestDto, EnrolledStudent,
    PaginatedCoursesResponse, Semester, UpdateCourseDto,
};
use crate::modules::departments::model::{
    CreateDepartmentDto, Department, UpdateDepartmentDto,
};
use crate::modules::faculties::model::{CreateFacultyDto, Faculty, UpdateFacultyDto};
use crate::modules::lecturers::model::{
    CreateLecturerDto, Lecturer, LecturerStatus, PaginatedLecturersResponse, UpdateLecturerDto,
};
use crate::modules::setup::model::{SetupReport, SetupStatus};
use crate::modules::students::model::{StudentCourse, StudentDetail, StudentSummary};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::setup::controller::get_status,
        crate::modules::setup::controller::initialize,
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::me,
        crate::modules::faculties::controller::create_faculty,
        crate::modules::faculties::controller::get_all_faculties,
        crate::modules::faculties::controller::get_faculty,
        crate::modules::faculties::controller::update_faculty,
        crate::modules::faculties::controller::delete_faculty,
        crate::modules::departments::controller::create_department,
        crate::modules::departments::controller::get_all_departments,
        crate::modules::departments::controller::get_department,
        crate::modules::departments::controller::update_department,
        crate::modules::departments::controller::delete_department,
        crate::modules::courses::controller::get_all_courses,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_all_enrollments,
        crate::modules::courses::controller::enroll_student,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::students::controller::get_all_students,
        crate::modules::students::controller::get_student,
        crate::modules::lecturers::controller::get_all_lecturers,
        crate::modules::lecturers::controller::create_lecturer,
        crate::modules::lecturers::controller::get_lecturer,
        crate::modules::lecturers::controller::update_lecturer,
        crate::modules::lecturers::controller::delete_lecturer,
    ),
    components(
        schemas(
            ErrorResponse,
            MessageResponse,
            User,
            UserRole,
            RegisterRequestDto,
            LoginRequest,
            AuthResponse,
            Faculty,
            CreateFacultyDto,
            UpdateFacultyDto,
            Department,
            CreateDepartmentDto,
            UpdateDepartmentDto,
            Course,
            Semester,
            CreateCourseDto,
            UpdateCourseDto,
            PaginatedCoursesResponse,
            EnrollRequestDto,
            EnrolledStudent,
            CourseRoster,
            CourseDetail,
            StudentSummary,
            StudentCourse,
            StudentDetail,
            Lecturer,
            LecturerStatus,
            CreateLecturerDto,
            UpdateLecturerDto,
            PaginatedLecturersResponse,
            SetupStatus,
            SetupReport,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Setup", description = "First-run seeding and system status"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Faculties", description = "Faculty directory"),
        (name = "Departments", description = "Department directory"),
        (name = "Courses", description = "Courses and enrollment"),
        (name = "Students", description = "Student directory"),
        (name = "Lecturers", description = "Lecturer records"),
    ),
    info(
        title = "Acadex API",
        description = "University student-management REST API",
        version = "0.1.0"
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
            );
        }
    }
}
