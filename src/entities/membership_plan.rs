//! Membership plan entity - Billing parameters for subscribed members.
//!
//! `monthly_deposit_part` carves a refundable deposit out of the monthly rate
//! until the member's cumulative deposits reach the facility's target.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Membership plan database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "membership_plans")]
pub struct Model {
    /// Unique identifier for the plan
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Human-readable plan name (e.g., "Standard Monthly")
    pub name: String,
    /// Full monthly subscription rate
    pub rate_monthly: f64,
    /// Portion of the monthly rate booked as a refundable deposit, 0 to disable
    pub monthly_deposit_part: f64,
}

/// Defines relationships between `MembershipPlan` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One plan has many members
    #[sea_orm(has_many = "super::member::Entity")]
    Members,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Members.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
