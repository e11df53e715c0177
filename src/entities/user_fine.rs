//! User fine entity - One fine occurrence against a member.
//!
//! `occurrence` is the 1-based count of fines under the same rule for the
//! same member, assigned at creation and never renumbered. `ledger_entry_id`
//! is an explicit foreign key to the fine-typed debit this record charges.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User fine database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_fines")]
pub struct Model {
    /// Unique identifier for the fine record
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Member who was fined
    pub member_id: i64,
    /// Rule under which the fine was applied
    pub rule_id: i64,
    /// 1-based sequence number of this fine for (member, rule)
    pub occurrence: i32,
    /// Amount actually charged, after escalation or manual override
    pub amount_charged: f64,
    /// The fine-typed ledger debit created alongside this record
    pub ledger_entry_id: i64,
    /// When the fine was applied
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `UserFine` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each fine record belongs to one member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
    /// Each fine record was applied under one rule
    #[sea_orm(
        belongs_to = "super::fine_rule::Entity",
        from = "Column::RuleId",
        to = "super::fine_rule::Column::Id"
    )]
    FineRule,
    /// Each fine record charges exactly one ledger debit
    #[sea_orm(
        belongs_to = "super::ledger_entry::Entity",
        from = "Column::LedgerEntryId",
        to = "super::ledger_entry::Column::Id"
    )]
    LedgerEntry,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<super::fine_rule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FineRule.def()
    }
}

impl Related<super::ledger_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
