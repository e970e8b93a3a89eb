use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ZoneType {
    Livable,
    NonLivable,
}

impl ZoneType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ZoneType::Livable => "LIVABLE",
            ZoneType::NonLivable => "NON_LIVABLE",
        }
    }

    pub fn parse(s: &str) -> AppResult<Self> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "LIVABLE" | "L" => Ok(ZoneType::Livable),
            "NON_LIVABLE" | "NONLIVABLE" | "N" => Ok(ZoneType::NonLivable),
            _ => Err(AppError::InvalidZoneType(s.to_string())),
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned rectangle of the room grid (`ZonaSala`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub x: u32,
    pub y: u32,
    #[serde(rename = "larghezza")]
    pub width: u32,
    #[serde(rename = "altezza")]
    pub height: u32,
    #[serde(rename = "tipo")]
    pub kind: ZoneType,
}

impl Zone {
    pub fn new(x: u32, y: u32, width: u32, height: u32, kind: ZoneType) -> Self {
        Self {
            x,
            y,
            width,
            height,
            kind,
        }
    }

    /// Half-open containment: `[x, x+width) × [y, y+height)`.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }
}

/// A dining room (`Sala`). The name is the primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "zone", default)]
    pub zones: Vec<Zone>,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            zones: Vec::new(),
        }
    }
}
