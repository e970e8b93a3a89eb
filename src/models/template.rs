use super::table::Table;
use serde::{Deserialize, Serialize};

/// A named, reusable table layout for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTemplate {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nomeSala")]
    pub room: String,
    #[serde(rename = "tavoli", default)]
    pub tables: Vec<Table>,
}
