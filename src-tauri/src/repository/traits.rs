//! Repository Layer - Core Traits
//!
//! Storage-agnostic access to entities. The JSON file store implements
//! these; tests and future backends can swap in their own.

use async_trait::async_trait;
use crate::domain::{DomainResult, Entity};

/// CRUD over one entity type, keyed by `Entity::Id`
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert; fails with `Conflict` if the id is taken
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: T::Id) -> DomainResult<Option<T>>;

    /// All entities in stored order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Replace by id; fails with `NotFound` if absent
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Remove by id; fails with `NotFound` if absent
    async fn delete(&self, id: T::Id) -> DomainResult<()>;
}
