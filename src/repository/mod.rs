pub mod attendance;
pub mod dashboard;
pub mod employee;

pub use attendance::AttendanceRepository;
pub use dashboard::{Clock, Dashboard, DashboardStats};
pub use employee::EmployeeRepository;
