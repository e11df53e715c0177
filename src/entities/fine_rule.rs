//! Fine rule entity - A named offense with its escalation parameters.
//!
//! The first occurrence of an offense charges `first_time_fine`; every
//! subsequent occurrence multiplies it by `subsequent_multiplier` once more.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Fine rule database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fine_rules")]
pub struct Model {
    /// Unique identifier for the rule
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable offense name (e.g., "Late equipment return")
    pub name: String,
    /// Amount charged on the first occurrence
    pub first_time_fine: f64,
    /// Escalation factor applied per additional occurrence
    pub subsequent_multiplier: f64,
}

/// Defines relationships between `FineRule` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One rule has many fine records
    #[sea_orm(has_many = "super::user_fine::Entity")]
    UserFines,
}

impl Related<super::user_fine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
