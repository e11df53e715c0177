//! Ledger entry entity - One row per financial event on a member's account.
//!
//! Debits are charges (fees, fines, deposits); credits are payments. A credit
//! may reference the debit it pays down through `parent_id`, which is how
//! partial payments are tracked. `entry_type` and `transaction_type` are
//! stored as strings; the [`EntryType`] and [`TransactionKind`] enums give
//! them a typed surface.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger entry database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_entries")]
pub struct Model {
    /// Unique identifier, monotonic in creation order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Member that owns this entry
    pub member_id: i64,
    /// Kind of financial event: `"daily_fee"`, `"monthly_fee"`, `"fine"`,
    /// `"deposit"`, `"manual_fee"`, `"payment"`, or `"subscription"`
    pub entry_type: String,
    /// `"debit"` (charge) or `"credit"` (payment)
    pub transaction_type: String,
    /// Positive amount of the charge or payment
    pub amount: f64,
    /// For a debit: fully covered by linked credits. Credits are always true.
    pub is_paid: bool,
    /// Effective date; defaults to creation time but may be backdated
    pub date: DateTimeUtc,
    /// For a credit: the debit it partially or fully pays off
    pub parent_id: Option<i64>,
    /// Free-form note attached by the operator
    pub notes: Option<String>,
    /// How a payment was made (e.g., "cash", "upi"), None for charges
    pub payment_method: Option<String>,
    /// Operator who recorded the entry
    pub created_by: Option<String>,
}

/// Defines relationships between `LedgerEntry` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each ledger entry belongs to one member
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id"
    )]
    Member,
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Kind of financial event recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Per-visit fee, usually backdated to the check-in day
    DailyFee,
    /// Monthly subscription fee
    MonthlyFee,
    /// Disciplinary fine
    Fine,
    /// Refundable deposit installment
    Deposit,
    /// Ad-hoc operator-entered charge
    ManualFee,
    /// Money received from the member
    Payment,
    /// Subscription-related adjustment
    Subscription,
}

impl EntryType {
    /// String representation stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DailyFee => "daily_fee",
            Self::MonthlyFee => "monthly_fee",
            Self::Fine => "fine",
            Self::Deposit => "deposit",
            Self::ManualFee => "manual_fee",
            Self::Payment => "payment",
            Self::Subscription => "subscription",
        }
    }

    /// Parses the stored string form, returning None for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily_fee" => Some(Self::DailyFee),
            "monthly_fee" => Some(Self::MonthlyFee),
            "fine" => Some(Self::Fine),
            "deposit" => Some(Self::Deposit),
            "manual_fee" => Some(Self::ManualFee),
            "payment" => Some(Self::Payment),
            "subscription" => Some(Self::Subscription),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    /// A charge owed by the member
    Debit,
    /// A payment made by the member
    Credit,
}

impl TransactionKind {
    /// String representation stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "debit",
            Self::Credit => "credit",
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Model {
    /// Whether this entry is a debit (charge).
    #[must_use]
    pub fn is_debit(&self) -> bool {
        self.transaction_type == TransactionKind::Debit.as_str()
    }

    /// Whether this entry is a credit (payment).
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.transaction_type == TransactionKind::Credit.as_str()
    }
}
