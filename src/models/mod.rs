pub mod configuration;
pub mod reservation;
pub mod room;
pub mod shift;
pub mod table;
pub mod template;
pub mod working_day;

pub use configuration::RoomConfiguration;
pub use reservation::Reservation;
pub use room::{Room, Zone, ZoneType};
pub use shift::Shift;
pub use table::{Table, TableStatus};
pub use template::RoomTemplate;
pub use working_day::{DayType, ShiftWindow, WorkingDay};
