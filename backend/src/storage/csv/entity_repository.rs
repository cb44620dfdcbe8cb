use anyhow::Result;
use log::info;
use shared::Entity;
use std::sync::Arc;

use super::connection::CsvConnection;
use crate::error::StorageError;
use crate::storage::traits::EntityStorage;

pub const ENTITIES_FILE: &str = "entities.csv";
const ENTITIES_HEADER: &[&str] = &["id", "name", "entity_type", "phone", "address", "created_at"];

/// CSV-based entity repository backed by `entities.csv`
#[derive(Clone)]
pub struct EntityRepository {
    connection: Arc<CsvConnection>,
}

impl EntityRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }

    fn read_entities(&self) -> Result<Vec<Entity>> {
        self.connection.read_records(ENTITIES_FILE, ENTITIES_HEADER)
    }
}

impl EntityStorage for EntityRepository {
    fn store_entity(&self, entity: &Entity) -> Result<()> {
        let mut entities = self.read_entities()?;

        if entities.iter().any(|e| e.id == entity.id) {
            return Err(StorageError::DuplicateId {
                kind: "entity",
                id: entity.id.clone(),
            }
            .into());
        }

        entities.push(entity.clone());
        self.connection.write_records(ENTITIES_FILE, ENTITIES_HEADER, &entities)?;

        info!("Stored entity {} ({})", entity.name, entity.id);
        Ok(())
    }

    fn get_entity(&self, entity_id: &str) -> Result<Option<Entity>> {
        Ok(self.read_entities()?.into_iter().find(|e| e.id == entity_id))
    }

    fn list_entities(&self) -> Result<Vec<Entity>> {
        self.read_entities()
    }
}
