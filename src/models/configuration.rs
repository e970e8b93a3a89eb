use super::shift::Shift;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Activation record of a room for one date and shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomConfiguration {
    #[serde(rename = "nomeSala")]
    pub room: String,
    #[serde(rename = "data")]
    pub date: NaiveDate,
    #[serde(rename = "turno")]
    pub shift: Shift,
}
