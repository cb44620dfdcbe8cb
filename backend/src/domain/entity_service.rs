use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use shared::{Entity, EntityType};
use std::sync::Arc;

use crate::domain::commands::entity::CreateEntityCommand;
use crate::domain::id::generate_id;
use crate::error::DomainError;
use crate::storage::csv::{CsvConnection, EntityRepository};
use crate::storage::traits::EntityStorage;

const MAX_NAME_LENGTH: usize = 100;

/// Service for managing customers and suppliers
#[derive(Clone)]
pub struct EntityService {
    entity_repository: EntityRepository,
}

impl EntityService {
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        let entity_repository = EntityRepository::new(csv_conn);
        Self { entity_repository }
    }

    /// Create a new entity
    pub fn create_entity(&self, command: CreateEntityCommand) -> Result<Entity> {
        info!("Creating {}: name={}", command.entity_type, command.name);

        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::InvalidEntity("name cannot be empty".to_string()).into());
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::InvalidEntity(format!(
                "name cannot exceed {} characters",
                MAX_NAME_LENGTH
            ))
            .into());
        }

        let existing = self.entity_repository.list_entities()?;
        let now = Utc::now();
        let prefix = match command.entity_type {
            EntityType::Customer => "customer",
            EntityType::Supplier => "supplier",
        };

        let entity = Entity {
            id: generate_id(
                prefix,
                now.timestamp_millis() as u64,
                existing.iter().map(|e| e.id.as_str()),
            ),
            name: name.to_string(),
            entity_type: command.entity_type,
            phone: command.phone.trim().to_string(),
            address: command.address.trim().to_string(),
            created_at: now.to_rfc3339(),
        };

        self.entity_repository.store_entity(&entity)?;

        info!("Created {} {} with ID: {}", entity.entity_type, entity.name, entity.id);
        Ok(entity)
    }

    /// Get an entity by ID, failing if it does not exist
    pub fn get_entity(&self, entity_id: &str) -> Result<Entity> {
        match self.entity_repository.get_entity(entity_id)? {
            Some(entity) => Ok(entity),
            None => {
                warn!("Entity not found: {}", entity_id);
                Err(DomainError::EntityNotFound(entity_id.to_string()).into())
            }
        }
    }

    /// List all entities ordered by name
    pub fn list_entities(&self) -> Result<Vec<Entity>> {
        let mut entities = self.entity_repository.list_entities()?;
        entities.sort_by_key(|e| e.name.to_lowercase());
        Ok(entities)
    }

    /// List entities of one type ordered by name
    pub fn list_entities_by_type(&self, entity_type: EntityType) -> Result<Vec<Entity>> {
        Ok(self
            .list_entities()?
            .into_iter()
            .filter(|e| e.entity_type == entity_type)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    fn command(name: &str, entity_type: EntityType) -> CreateEntityCommand {
        CreateEntityCommand {
            name: name.to_string(),
            entity_type,
            phone: " 555-0101 ".to_string(),
            address: String::new(),
        }
    }

    #[test]
    fn test_create_entity_trims_and_prefixes_id() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = EntityService::new(env.connection.clone());

        let entity = service.create_entity(command("  Sunrise Nursery ", EntityType::Customer))?;

        assert_eq!(entity.name, "Sunrise Nursery");
        assert_eq!(entity.phone, "555-0101");
        assert!(entity.id.starts_with("customer::"));
        assert_eq!(service.get_entity(&entity.id)?, entity);
        Ok(())
    }

    #[test]
    fn test_create_entity_rejects_blank_and_long_names() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = EntityService::new(env.connection.clone());

        let blank = service.create_entity(command("   ", EntityType::Customer)).unwrap_err();
        assert!(matches!(
            blank.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidEntity(_))
        ));

        let long_name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(service.create_entity(command(&long_name, EntityType::Supplier)).is_err());
        assert!(service.list_entities()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_ids_stay_unique_for_rapid_creation() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = EntityService::new(env.connection.clone());

        let a = service.create_entity(command("A", EntityType::Customer))?;
        let b = service.create_entity(command("B", EntityType::Customer))?;
        assert_ne!(a.id, b.id);
        Ok(())
    }

    #[test]
    fn test_list_by_type_is_sorted_by_name() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = EntityService::new(env.connection.clone());

        service.create_entity(command("zeta Gardens", EntityType::Customer))?;
        service.create_entity(command("Agro Supplies", EntityType::Supplier))?;
        service.create_entity(command("Alpha Farms", EntityType::Customer))?;

        let customers = service.list_entities_by_type(EntityType::Customer)?;
        let names: Vec<&str> = customers.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha Farms", "zeta Gardens"]);
        Ok(())
    }

    #[test]
    fn test_get_missing_entity_is_not_found() -> Result<()> {
        let env = TestEnvironment::new()?;
        let service = EntityService::new(env.connection.clone());

        let err = service.get_entity("customer::missing").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::EntityNotFound(id)) if id == "customer::missing"
        ));
        Ok(())
    }
}
