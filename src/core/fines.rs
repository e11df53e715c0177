//! Fine business logic - Applies fines with per-rule escalation.
//!
//! Each fine occurrence is numbered per (member, rule): the first offense
//! charges the rule's base amount, every later one multiplies it by the
//! rule's escalation factor once more. Applying a fine writes both the fine
//! record and its fine-typed ledger debit in one database transaction, linked
//! by an explicit foreign key.

use crate::{
    entities::{
        FineRule, Member, UserFine,
        ledger_entry::{self, EntryType, TransactionKind},
        user_fine,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Escalated amount for the given occurrence of a rule.
///
/// Occurrence 1 charges the base amount; occurrence n charges
/// `base * multiplier^(n-1)`.
#[must_use]
pub fn escalated_amount(first_time_fine: f64, subsequent_multiplier: f64, occurrence: i32) -> f64 {
    first_time_fine * subsequent_multiplier.powi(occurrence.saturating_sub(1))
}

/// Applies a fine to a member under a rule.
///
/// The occurrence number is the count of the member's existing fines under
/// the same rule plus one, assigned at creation and never renumbered.
/// `manual_amount` overrides the escalation formula when given. Creates the
/// fine-typed ledger debit (unpaid) and the fine record pointing at it.
pub async fn apply_fine(
    db: &DatabaseConnection,
    member_id: i64,
    rule_id: i64,
    manual_amount: Option<f64>,
) -> Result<user_fine::Model> {
    Member::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "member",
            id: member_id,
        })?;

    let rule = FineRule::find_by_id(rule_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "fine rule",
            id: rule_id,
        })?;

    if let Some(amount) = manual_amount {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount { amount });
        }
    }

    let txn = db.begin().await?;

    let prior = UserFine::find()
        .filter(user_fine::Column::MemberId.eq(member_id))
        .filter(user_fine::Column::RuleId.eq(rule_id))
        .count(&txn)
        .await?;
    // Occurrence counts stay small; the cast cannot truncate in practice.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    let occurrence = prior as i32 + 1;

    let amount = manual_amount.unwrap_or_else(|| {
        escalated_amount(rule.first_time_fine, rule.subsequent_multiplier, occurrence)
    });

    let now = chrono::Utc::now();
    let debit = ledger_entry::ActiveModel {
        member_id: Set(member_id),
        entry_type: Set(EntryType::Fine.as_str().to_string()),
        transaction_type: Set(TransactionKind::Debit.as_str().to_string()),
        amount: Set(amount),
        is_paid: Set(false),
        date: Set(now),
        parent_id: Set(None),
        notes: Set(Some(rule.name.clone())),
        payment_method: Set(None),
        created_by: Set(None),
        ..Default::default()
    };
    let debit = debit.insert(&txn).await?;

    let fine = user_fine::ActiveModel {
        member_id: Set(member_id),
        rule_id: Set(rule_id),
        occurrence: Set(occurrence),
        amount_charged: Set(amount),
        ledger_entry_id: Set(debit.id),
        created_at: Set(now),
        ..Default::default()
    };
    let fine = fine.insert(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        member_id,
        rule_id,
        occurrence,
        amount,
        "applied fine to member"
    );

    Ok(fine)
}

/// Retrieves a member's fine records, newest first.
pub async fn fines_for_member(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Vec<user_fine::Model>> {
    UserFine::find()
        .filter(user_fine::Column::MemberId.eq(member_id))
        .order_by_desc(user_fine::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}
