pub mod auth;
pub mod courses;
pub mod departments;
pub mod faculties;
pub mod lecturers;
pub mod setup;
pub mod students;
