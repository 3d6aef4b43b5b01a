//! redb-based storage layer for accounts, orders and the catalog
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `users` | `email` | `UserRecord` | Member accounts |
//! | `orders` | `order_id` | `StoredOrder` | Completed payments (append-only) |
//! | `plans` | `plan_id` | `Plan` | Membership plan catalog |
//! | `testimonials` | `testimonial_id` | `Testimonial` | Landing page testimonials |
//!
//! Each `UserRecord` keeps its `order_ids` in append order, so the per-user
//! feed comes back in exactly the sequence payments were recorded without a
//! secondary index.
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default, so a recorded
//! payment is on disk before the handler responds.

use chrono::{DateTime, Utc};
use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{Plan, Testimonial};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for member accounts: key = email, value = JSON-serialized UserRecord
const USERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Table for completed payments: key = order_id, value = JSON-serialized StoredOrder
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Table for membership plans: key = plan id, value = JSON-serialized Plan
const PLANS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("plans");

/// Table for testimonials: key = testimonial id, value = JSON-serialized Testimonial
const TESTIMONIALS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("testimonials");

/// Member account row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    /// Order ids in the order payments were recorded
    #[serde(default)]
    pub order_ids: Vec<String>,
}

/// Completed payment row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredOrder {
    pub order_id: String,
    pub email: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Gym storage backed by redb
#[derive(Clone)]
pub struct GymStorage {
    db: Arc<Database>,
}

impl GymStorage {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        let db = Database::create(path)?;
        Self::init_tables(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StorageResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::init_tables(db)
    }

    fn init_tables(db: Database) -> StorageResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(PLANS_TABLE)?;
            let _ = write_txn.open_table(TESTIMONIALS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Verify the database answers a read transaction (health probe)
    pub fn check(&self) -> StorageResult<()> {
        let read_txn = self.db.begin_read()?;
        read_txn.open_table(USERS_TABLE)?;
        Ok(())
    }

    // ========== User Operations ==========

    /// Insert a new account. Returns `false` if the email is already taken.
    pub fn create_user(&self, user: &UserRecord) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(USERS_TABLE)?;
            if table.get(user.email.as_str())?.is_some() {
                return Ok(false);
            }
            let value = serde_json::to_vec(user)?;
            table.insert(user.email.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(true)
    }

    /// Fetch an account by email
    pub fn get_user(&self, email: &str) -> StorageResult<Option<UserRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;

        match table.get(email)? {
            Some(value) => {
                let user: UserRecord = serde_json::from_slice(value.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    // ========== Order Operations ==========

    /// Record a completed payment for an account.
    ///
    /// Writes the order row and appends the id to the owner's `order_ids`
    /// in a single transaction, so the two tables cannot drift apart.
    ///
    /// Returns `false` (and writes nothing) if the order id already exists.
    pub fn record_order(&self, email: &str, order: &StoredOrder) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        {
            let mut users_table = txn.open_table(USERS_TABLE)?;
            let mut orders_table = txn.open_table(ORDERS_TABLE)?;

            // Read and decode first to release the guard before mutating
            let user_bytes = users_table.get(email)?.map(|g| g.value().to_vec());
            let mut user: UserRecord = match user_bytes {
                Some(bytes) => serde_json::from_slice(&bytes)?,
                None => return Err(StorageError::UserNotFound(email.to_string())),
            };

            if orders_table.get(order.order_id.as_str())?.is_some() {
                return Ok(false);
            }

            let order_value = serde_json::to_vec(order)?;
            orders_table.insert(order.order_id.as_str(), order_value.as_slice())?;

            user.order_ids.push(order.order_id.clone());
            let user_value = serde_json::to_vec(&user)?;
            users_table.insert(email, user_value.as_slice())?;
        }
        txn.commit()?;
        Ok(true)
    }

    /// All orders for one account, in the order they were recorded
    pub fn orders_for_user(&self, email: &str) -> StorageResult<Vec<StoredOrder>> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        let orders_table = read_txn.open_table(ORDERS_TABLE)?;

        let user: UserRecord = match users_table.get(email)? {
            Some(value) => serde_json::from_slice(value.value())?,
            None => return Err(StorageError::UserNotFound(email.to_string())),
        };

        let mut orders = Vec::with_capacity(user.order_ids.len());
        for order_id in &user.order_ids {
            if let Some(value) = orders_table.get(order_id.as_str())? {
                let order: StoredOrder = serde_json::from_slice(value.value())?;
                orders.push(order);
            }
        }

        Ok(orders)
    }

    /// Every order across all accounts, newest first
    pub fn all_orders(&self) -> StorageResult<Vec<StoredOrder>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut orders = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let order: StoredOrder = serde_json::from_slice(value.value())?;
            orders.push(order);
        }

        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    // ========== Plan Operations ==========

    /// Insert or replace a plan
    pub fn put_plan(&self, plan: &Plan) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(PLANS_TABLE)?;
            let value = serde_json::to_vec(plan)?;
            table.insert(plan.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Fetch a plan by id
    pub fn get_plan(&self, id: &str) -> StorageResult<Option<Plan>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PLANS_TABLE)?;

        match table.get(id)? {
            Some(value) => {
                let plan: Plan = serde_json::from_slice(value.value())?;
                Ok(Some(plan))
            }
            None => Ok(None),
        }
    }

    /// All plans, cheapest first
    pub fn list_plans(&self) -> StorageResult<Vec<Plan>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PLANS_TABLE)?;

        let mut plans = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let plan: Plan = serde_json::from_slice(value.value())?;
            plans.push(plan);
        }

        plans.sort_by(|a, b| a.price.cmp(&b.price));
        Ok(plans)
    }

    /// Delete a plan. Returns `false` if the id was unknown.
    pub fn delete_plan(&self, id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(PLANS_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }

    // ========== Testimonial Operations ==========

    /// Insert or replace a testimonial
    pub fn put_testimonial(&self, testimonial: &Testimonial) -> StorageResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TESTIMONIALS_TABLE)?;
            let value = serde_json::to_vec(testimonial)?;
            table.insert(testimonial.id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Fetch a testimonial by id
    pub fn get_testimonial(&self, id: &str) -> StorageResult<Option<Testimonial>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TESTIMONIALS_TABLE)?;

        match table.get(id)? {
            Some(value) => {
                let testimonial: Testimonial = serde_json::from_slice(value.value())?;
                Ok(Some(testimonial))
            }
            None => Ok(None),
        }
    }

    /// All testimonials
    pub fn list_testimonials(&self) -> StorageResult<Vec<Testimonial>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TESTIMONIALS_TABLE)?;

        let mut testimonials = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let testimonial: Testimonial = serde_json::from_slice(value.value())?;
            testimonials.push(testimonial);
        }

        Ok(testimonials)
    }

    /// Delete a testimonial. Returns `false` if the id was unknown.
    pub fn delete_testimonial(&self, id: &str) -> StorageResult<bool> {
        let txn = self.db.begin_write()?;
        let removed = {
            let mut table = txn.open_table(TESTIMONIALS_TABLE)?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{PlanCreate, TestimonialCreate};

    fn create_test_user(email: &str) -> UserRecord {
        UserRecord {
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            created_at: Utc::now(),
            order_ids: Vec::new(),
        }
    }

    fn create_test_order(order_id: &str, email: &str, rupees: i64) -> StoredOrder {
        StoredOrder {
            order_id: order_id.to_string(),
            email: email.to_string(),
            amount: Decimal::from(rupees),
            created_at: Utc::now(),
        }
    }

    fn create_test_plan(title: &str, rupees: i64) -> Plan {
        Plan::create(PlanCreate {
            title: title.to_string(),
            price: Decimal::from(rupees),
            duration: "1 month".to_string(),
            discount_rate: None,
            description: "Test plan".to_string(),
            features: vec!["Gym access".to_string()],
            unavailable_features: vec![],
            action_label: "Join now".to_string(),
        })
    }

    #[test]
    fn test_user_create_and_get() {
        let storage = GymStorage::open_in_memory().unwrap();

        assert!(storage.get_user("member@gym.test").unwrap().is_none());

        let user = create_test_user("member@gym.test");
        assert!(storage.create_user(&user).unwrap());

        let fetched = storage.get_user("member@gym.test").unwrap().unwrap();
        assert_eq!(fetched.email, "member@gym.test");
        assert!(fetched.order_ids.is_empty());
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let storage = GymStorage::open_in_memory().unwrap();
        let user = create_test_user("member@gym.test");

        assert!(storage.create_user(&user).unwrap());
        assert!(!storage.create_user(&user).unwrap());
    }

    #[test]
    fn test_record_order_appends_in_order() {
        let storage = GymStorage::open_in_memory().unwrap();
        let user = create_test_user("member@gym.test");
        storage.create_user(&user).unwrap();

        // Record in an order that differs from key order
        for order_id in ["order_c", "order_a", "order_b"] {
            let order = create_test_order(order_id, "member@gym.test", 999);
            assert!(storage.record_order("member@gym.test", &order).unwrap());
        }

        let orders = storage.orders_for_user("member@gym.test").unwrap();
        let ids: Vec<&str> = orders.iter().map(|o| o.order_id.as_str()).collect();
        assert_eq!(ids, vec!["order_c", "order_a", "order_b"]);
    }

    #[test]
    fn test_duplicate_order_id_writes_nothing() {
        let storage = GymStorage::open_in_memory().unwrap();
        storage.create_user(&create_test_user("member@gym.test")).unwrap();

        let order = create_test_order("order_1", "member@gym.test", 999);
        assert!(storage.record_order("member@gym.test", &order).unwrap());

        let duplicate = create_test_order("order_1", "member@gym.test", 1);
        assert!(!storage.record_order("member@gym.test", &duplicate).unwrap());

        // Stored amount and the owner's id list are untouched
        let orders = storage.orders_for_user("member@gym.test").unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].amount, Decimal::from(999));
    }

    #[test]
    fn test_record_order_unknown_user() {
        let storage = GymStorage::open_in_memory().unwrap();
        let order = create_test_order("order_1", "ghost@gym.test", 999);

        let err = storage.record_order("ghost@gym.test", &order).unwrap_err();
        assert!(matches!(err, StorageError::UserNotFound(_)));

        // Nothing was written
        assert!(storage.all_orders().unwrap().is_empty());
    }

    #[test]
    fn test_all_orders_newest_first() {
        let storage = GymStorage::open_in_memory().unwrap();
        storage.create_user(&create_test_user("a@gym.test")).unwrap();
        storage.create_user(&create_test_user("b@gym.test")).unwrap();

        let old = StoredOrder {
            created_at: Utc::now() - chrono::Duration::days(2),
            ..create_test_order("order_old", "a@gym.test", 100)
        };
        let new = StoredOrder {
            created_at: Utc::now(),
            ..create_test_order("order_new", "b@gym.test", 200)
        };

        storage.record_order("a@gym.test", &old).unwrap();
        storage.record_order("b@gym.test", &new).unwrap();

        let all = storage.all_orders().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].order_id, "order_new");
        assert_eq!(all[1].order_id, "order_old");
    }

    #[test]
    fn test_plan_crud() {
        let storage = GymStorage::open_in_memory().unwrap();

        let plan = create_test_plan("Basic", 999);
        storage.put_plan(&plan).unwrap();

        let fetched = storage.get_plan(&plan.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Basic");

        let mut updated = fetched.clone();
        updated.price = Decimal::from(1299);
        storage.put_plan(&updated).unwrap();
        assert_eq!(
            storage.get_plan(&plan.id).unwrap().unwrap().price,
            Decimal::from(1299)
        );

        assert!(storage.delete_plan(&plan.id).unwrap());
        assert!(storage.get_plan(&plan.id).unwrap().is_none());
        assert!(!storage.delete_plan(&plan.id).unwrap());
    }

    #[test]
    fn test_plans_listed_cheapest_first() {
        let storage = GymStorage::open_in_memory().unwrap();

        storage.put_plan(&create_test_plan("Pro", 2999)).unwrap();
        storage.put_plan(&create_test_plan("Basic", 999)).unwrap();
        storage.put_plan(&create_test_plan("Plus", 1999)).unwrap();

        let plans = storage.list_plans().unwrap();
        let titles: Vec<&str> = plans.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Basic", "Plus", "Pro"]);
    }

    #[test]
    fn test_testimonial_crud() {
        let storage = GymStorage::open_in_memory().unwrap();

        let testimonial = Testimonial::create(TestimonialCreate {
            name: "Priya".to_string(),
            feedback: "Great trainers".to_string(),
            image: None,
        });
        storage.put_testimonial(&testimonial).unwrap();

        let listed = storage.list_testimonials().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "Priya");

        assert!(storage.delete_testimonial(&testimonial.id).unwrap());
        assert!(storage.list_testimonials().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gym.redb");

        {
            let storage = GymStorage::open(&path).unwrap();
            storage.create_user(&create_test_user("member@gym.test")).unwrap();
            let order = create_test_order("order_1", "member@gym.test", 999);
            storage.record_order("member@gym.test", &order).unwrap();
        }

        let storage = GymStorage::open(&path).unwrap();
        let orders = storage.orders_for_user("member@gym.test").unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].order_id, "order_1");
    }
}
