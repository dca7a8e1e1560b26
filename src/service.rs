pub mod attendance;
pub mod auth;
pub mod booking;
pub mod course;
pub mod grade;
pub mod instructor;
pub mod registry;
pub mod room;
pub mod student;
pub mod timetable;

pub use registry::ServiceRegistry;
