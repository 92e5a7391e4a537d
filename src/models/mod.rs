pub mod attendance;
pub mod margin;

pub use attendance::{AttendanceRecord, RawRow};
pub use margin::{Margin, MarginDirection};
