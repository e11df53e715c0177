//! Tournament entity - Grouping for teams and fixtures.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Tournament database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tournaments")]
pub struct Model {
    /// Unique identifier for the tournament
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Tournament name (e.g., "Monsoon Cup 2026")
    pub name: String,
}

/// Defines relationships between Tournament and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One tournament has many teams
    #[sea_orm(has_many = "super::team::Entity")]
    Teams,
    /// One tournament has many matches
    #[sea_orm(has_many = "super::cricket_match::Entity")]
    Matches,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl Related<super::cricket_match::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Matches.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
