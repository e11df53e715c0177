//! Member entity - Represents one person registered with the facility.
//!
//! A member optionally references a membership plan, which drives monthly
//! billing. Inactive members keep their history but cannot be billed.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Unique identifier for the member
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the member
    pub name: String,
    /// Whether the membership is currently active
    pub active: bool,
    /// Membership plan driving monthly billing, None for pay-per-visit members
    pub plan_id: Option<i64>,
    /// When the member joined
    pub joined_at: DateTimeUtc,
}

/// Defines relationships between Member and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each member optionally belongs to one membership plan
    #[sea_orm(
        belongs_to = "super::membership_plan::Entity",
        from = "Column::PlanId",
        to = "super::membership_plan::Column::Id"
    )]
    MembershipPlan,
    /// One member has many ledger entries
    #[sea_orm(has_many = "super::ledger_entry::Entity")]
    LedgerEntries,
    /// One member has many fine records
    #[sea_orm(has_many = "super::user_fine::Entity")]
    UserFines,
}

impl Related<super::membership_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipPlan.def()
    }
}

impl Related<super::ledger_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntries.def()
    }
}

impl Related<super::user_fine::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
