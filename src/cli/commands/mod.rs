pub mod config;
pub mod dashboard;
pub mod export;
pub mod hours;
pub mod init;
pub mod layout;
pub mod log;
pub mod reservation;
pub mod room;
pub mod session;
pub mod slots;
pub mod table;
pub mod template;
pub mod zones;
