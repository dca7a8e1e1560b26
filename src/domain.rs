pub mod admin;
pub mod attendance;
pub mod booking;
pub mod course;
pub mod grade;
pub mod instructor;
pub mod room;
pub mod schedule;
pub mod student;

pub use admin::Admin;
pub use attendance::AttendanceRecord;
pub use booking::{BookingStatus, RoomBooking};
pub use course::Course;
pub use grade::GradeReport;
pub use instructor::Instructor;
pub use room::{Room, RoomType};
pub use schedule::{DayOfWeek, ScheduleSlot};
pub use student::Student;
