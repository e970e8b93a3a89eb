use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TableStatus {
    #[default]
    Free,
    Reserved,
    Occupied,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Free => "FREE",
            TableStatus::Reserved => "RESERVED",
            TableStatus::Occupied => "OCCUPIED",
        }
    }
}

/// A table (`Tavolo`) placed on one grid cell for a given room/date/shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "stato", default)]
    pub status: TableStatus,
    #[serde(
        rename = "nomePrenotazione",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reservation: Option<String>,
}

impl Table {
    pub fn free(x: u32, y: u32) -> Self {
        Self {
            x,
            y,
            status: TableStatus::Free,
            reservation: None,
        }
    }

    pub fn at(&self, x: u32, y: u32) -> bool {
        self.x == x && self.y == y
    }
}
