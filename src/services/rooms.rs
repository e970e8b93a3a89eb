use crate::api::{ApiClient, endpoints};
use crate::cache::{QueryCache, QueryKey};
use crate::errors::{AppError, AppResult};
use crate::models::{Room, Zone};
use tracing::info;

pub struct RoomService<'a> {
    api: &'a ApiClient,
    cache: &'a mut QueryCache,
}

impl<'a> RoomService<'a> {
    pub fn new(api: &'a ApiClient, cache: &'a mut QueryCache) -> Self {
        Self { api, cache }
    }

    pub fn list(&mut self) -> AppResult<Vec<Room>> {
        let api = self.api;
        self.cache
            .get_or_fetch(QueryKey::Rooms, || api.get(&endpoints::rooms()))
    }

    pub fn get(&mut self, name: &str) -> AppResult<Option<Room>> {
        let api = self.api;
        self.cache.get_or_fetch(QueryKey::Room(name.to_string()), || {
            api.get_optional(&endpoints::room(name))
        })
    }

    pub fn require(&mut self, name: &str) -> AppResult<Room> {
        self.get(name)?
            .ok_or_else(|| AppError::NotFound(format!("room '{name}'")))
    }

    pub fn create(&mut self, name: &str) -> AppResult<Room> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Other("room name is required".into()));
        }
        let room = Room::new(name);
        let created: Option<Room> = self.api.post(&endpoints::rooms(), &room)?;
        info!(room = name, "room created");
        self.cache.invalidate(&QueryKey::Rooms);
        Ok(created.unwrap_or(room))
    }

    pub fn delete(&mut self, name: &str) -> AppResult<()> {
        self.api.delete(&endpoints::room(name))?;
        info!(room = name, "room deleted");
        // tables, configurations and templates go with it
        self.cache
            .invalidate_where(|k| *k == QueryKey::Rooms || k.room() == Some(name));
        Ok(())
    }

    /// Replace the whole zone list of a room.
    pub fn save_zones(&mut self, name: &str, zones: &[Zone]) -> AppResult<Room> {
        let updated: Option<Room> = self.api.put(&endpoints::room_zones(name), &zones)?;
        let room = updated.unwrap_or_else(|| Room {
            name: name.to_string(),
            zones: zones.to_vec(),
        });
        info!(room = name, zones = room.zones.len(), "zones saved");

        let single = QueryKey::Room(name.to_string());
        self.cache.set(single.clone(), &Some(room.clone()))?;
        self.cache.update::<Vec<Room>, _>(&QueryKey::Rooms, |rooms| {
            match rooms.iter_mut().find(|r| r.name == room.name) {
                Some(r) => *r = room.clone(),
                None => rooms.push(room.clone()),
            }
        })?;
        self.cache.invalidate(&single);
        self.cache.invalidate(&QueryKey::Rooms);
        Ok(room)
    }
}
