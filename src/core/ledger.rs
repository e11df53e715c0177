//! Ledger business logic - Handles all charge and payment operations.
//!
//! This module records debits (charges) and credits (payments) on a member's
//! ledger and keeps paid/unpaid status consistent as entries are added,
//! edited, or removed. A credit may be linked to the debit it pays down; the
//! sum of linked credits can never exceed the parent debit's amount, and the
//! parent's `is_paid` flag is re-derived from its children after every
//! mutation that touches either side. Linked-payment validation and insert
//! run inside one database transaction so concurrent partial payments cannot
//! both pass the overpayment check.

use crate::{
    entities::{
        LedgerEntry, Member, UserFine,
        ledger_entry::{self, EntryType, TransactionKind},
        user_fine,
    },
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;

/// Partial update to a ledger entry. Fields left as None are unchanged.
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    /// New amount; validated like a fresh insert
    pub amount: Option<f64>,
    /// Manual paid-flag override (re-derived when an amount change follows)
    pub is_paid: Option<bool>,
    /// New effective date
    pub date: Option<DateTimeUtc>,
    /// New note text
    pub notes: Option<String>,
    /// New payment method
    pub payment_method: Option<String>,
}

/// Outstanding balance for one member, with a per-type breakdown of unpaid charges.
#[derive(Debug, Clone)]
pub struct BalanceSummary {
    /// Member the summary belongs to
    pub member_id: i64,
    /// Sum of all debit amounts on the ledger
    pub total_debits: f64,
    /// Sum of all credit amounts on the ledger
    pub total_credits: f64,
    /// Debits minus credits, clamped at zero for display
    pub balance: f64,
    /// Entry type string to sum of unpaid debit amounts of that type
    pub breakdown: HashMap<String, f64>,
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(())
}

async fn ensure_member<C>(db: &C, member_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    Member::find_by_id(member_id)
        .one(db)
        .await?
        .map(|_| ())
        .ok_or(Error::NotFound {
            entity: "member",
            id: member_id,
        })
}

/// Fetches all credits linked to a parent debit.
async fn linked_credits<C>(db: &C, parent_id: i64) -> Result<Vec<ledger_entry::Model>>
where
    C: ConnectionTrait,
{
    LedgerEntry::find()
        .filter(ledger_entry::Column::ParentId.eq(parent_id))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Re-derives a debit's `is_paid` flag from the current total of its linked
/// credits, using `>=` so an exact-cover payment marks it paid.
async fn recompute_paid_status<C>(db: &C, debit_id: i64) -> Result<ledger_entry::Model>
where
    C: ConnectionTrait,
{
    let debit = LedgerEntry::find_by_id(debit_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "ledger entry",
            id: debit_id,
        })?;

    let paid_total: f64 = linked_credits(db, debit_id)
        .await?
        .iter()
        .map(|c| c.amount)
        .sum();

    let is_paid = paid_total >= debit.amount;
    if debit.is_paid == is_paid {
        return Ok(debit);
    }

    let mut active: ledger_entry::ActiveModel = debit.into();
    active.is_paid = Set(is_paid);
    active.update(db).await.map_err(Into::into)
}

/// Records a charge (debit) against a member's ledger.
///
/// The entry starts unpaid. `date` allows backdating, e.g. an attendance fee
/// dated to the check-in day; it defaults to the current time.
///
/// # Arguments
/// * `db` - Database connection
/// * `member_id` - Member being charged
/// * `entry_type` - Kind of charge; [`EntryType::Payment`] is rejected
/// * `amount` - Positive charge amount
/// * `date` - Optional effective date
pub async fn record_charge(
    db: &DatabaseConnection,
    member_id: i64,
    entry_type: EntryType,
    amount: f64,
    date: Option<DateTimeUtc>,
) -> Result<ledger_entry::Model> {
    validate_amount(amount)?;

    if entry_type == EntryType::Payment {
        return Err(Error::Validation {
            message: "payments must be recorded through record_payment".to_string(),
        });
    }

    ensure_member(db, member_id).await?;

    let entry = ledger_entry::ActiveModel {
        member_id: Set(member_id),
        entry_type: Set(entry_type.as_str().to_string()),
        transaction_type: Set(TransactionKind::Debit.as_str().to_string()),
        amount: Set(amount),
        is_paid: Set(false),
        date: Set(date.unwrap_or_else(chrono::Utc::now)),
        parent_id: Set(None),
        notes: Set(None),
        payment_method: Set(None),
        created_by: Set(None),
        ..Default::default()
    };

    entry.insert(db).await.map_err(Into::into)
}

/// Records a payment (credit), optionally linked to the debit it pays down.
///
/// When linked, the remaining-balance check and the insert run inside one
/// database transaction: the target debit is loaded (failing with
/// [`Error::InvalidLink`] if missing or not a debit), the remaining balance
/// is computed from existing linked credits, and an amount exceeding it fails
/// with [`Error::Overpayment`] carrying both figures. On success the parent's
/// paid status is re-derived before the transaction commits.
///
/// Unlinked payments are free-standing credits. Credits are always `is_paid`.
pub async fn record_payment(
    db: &DatabaseConnection,
    member_id: i64,
    amount: f64,
    link_to: Option<i64>,
    method: Option<String>,
    date: Option<DateTimeUtc>,
) -> Result<ledger_entry::Model> {
    validate_amount(amount)?;
    ensure_member(db, member_id).await?;

    let txn = db.begin().await?;

    if let Some(parent_id) = link_to {
        let parent = LedgerEntry::find_by_id(parent_id)
            .one(&txn)
            .await?
            .ok_or(Error::InvalidLink {
                id: parent_id,
                reason: "no such ledger entry",
            })?;

        if !parent.is_debit() {
            return Err(Error::InvalidLink {
                id: parent_id,
                reason: "link target is not a debit",
            });
        }

        let paid_total: f64 = linked_credits(&txn, parent_id)
            .await?
            .iter()
            .map(|c| c.amount)
            .sum();
        let remaining = parent.amount - paid_total;

        if amount > remaining {
            return Err(Error::Overpayment {
                remaining,
                attempted: amount,
            });
        }

        let credit = ledger_entry::ActiveModel {
            member_id: Set(member_id),
            entry_type: Set(EntryType::Payment.as_str().to_string()),
            transaction_type: Set(TransactionKind::Credit.as_str().to_string()),
            amount: Set(amount),
            is_paid: Set(true),
            date: Set(date.unwrap_or_else(chrono::Utc::now)),
            parent_id: Set(Some(parent_id)),
            notes: Set(None),
            payment_method: Set(method),
            created_by: Set(None),
            ..Default::default()
        };
        let inserted = credit.insert(&txn).await?;

        recompute_paid_status(&txn, parent_id).await?;

        txn.commit().await?;
        Ok(inserted)
    } else {
        let credit = ledger_entry::ActiveModel {
            member_id: Set(member_id),
            entry_type: Set(EntryType::Payment.as_str().to_string()),
            transaction_type: Set(TransactionKind::Credit.as_str().to_string()),
            amount: Set(amount),
            is_paid: Set(true),
            date: Set(date.unwrap_or_else(chrono::Utc::now)),
            parent_id: Set(None),
            notes: Set(None),
            payment_method: Set(method),
            created_by: Set(None),
            ..Default::default()
        };
        let inserted = credit.insert(&txn).await?;
        txn.commit().await?;
        Ok(inserted)
    }
}

/// Applies a partial update to a ledger entry and re-derives paid status on
/// both sides of any parent/child link.
///
/// A linked credit's amount change must still fit within the parent's
/// remaining capacity (counting its siblings, not its own old amount). After
/// the write, the parent's paid status is recomputed when the entry has one,
/// and a debit recomputes its own flag from its children when its amount
/// changed - neither side ever keeps a stale cached flag.
pub async fn edit_ledger_entry(
    db: &DatabaseConnection,
    id: i64,
    changes: EntryChanges,
) -> Result<ledger_entry::Model> {
    let txn = db.begin().await?;

    let entry = LedgerEntry::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "ledger entry",
            id,
        })?;

    if let Some(amount) = changes.amount {
        validate_amount(amount)?;

        // A linked credit may not grow past the parent's remaining capacity.
        if entry.is_credit() {
            if let Some(parent_id) = entry.parent_id {
                let parent =
                    LedgerEntry::find_by_id(parent_id)
                        .one(&txn)
                        .await?
                        .ok_or(Error::NotFound {
                            entity: "ledger entry",
                            id: parent_id,
                        })?;
                let siblings_total: f64 = linked_credits(&txn, parent_id)
                    .await?
                    .iter()
                    .filter(|c| c.id != id)
                    .map(|c| c.amount)
                    .sum();
                let remaining = parent.amount - siblings_total;
                if amount > remaining {
                    return Err(Error::Overpayment {
                        remaining,
                        attempted: amount,
                    });
                }
            }
        }
    }

    let amount_changed = changes.amount.is_some_and(|a| a != entry.amount);
    let parent_id = entry.parent_id;
    let is_debit = entry.is_debit();

    let mut active: ledger_entry::ActiveModel = entry.into();
    if let Some(amount) = changes.amount {
        active.amount = Set(amount);
    }
    if let Some(is_paid) = changes.is_paid {
        active.is_paid = Set(is_paid);
    }
    if let Some(date) = changes.date {
        active.date = Set(date);
    }
    if let Some(notes) = changes.notes {
        active.notes = Set(Some(notes));
    }
    if let Some(method) = changes.payment_method {
        active.payment_method = Set(Some(method));
    }
    let mut updated = active.update(&txn).await?;

    if let Some(parent_id) = parent_id {
        recompute_paid_status(&txn, parent_id).await?;
    }
    if is_debit && amount_changed {
        updated = recompute_paid_status(&txn, id).await?;
    }

    txn.commit().await?;
    Ok(updated)
}

/// Deletes a ledger entry.
///
/// Deleting a linked credit re-derives the parent's paid status from the
/// remaining children. Deleting a fine debit also removes its paired fine
/// record, found through the explicit `ledger_entry_id` key; a fine debit
/// with no record is still deletable. A debit that still has linked credits
/// is rejected with [`Error::LinkedPaymentsExist`] - payments never disappear
/// as a side effect.
pub async fn delete_ledger_entry(db: &DatabaseConnection, id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let entry = LedgerEntry::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(Error::NotFound {
            entity: "ledger entry",
            id,
        })?;

    if entry.is_debit() {
        let children = linked_credits(&txn, id).await?;
        if !children.is_empty() {
            return Err(Error::LinkedPaymentsExist {
                id,
                count: children.len(),
            });
        }

        if entry.entry_type == EntryType::Fine.as_str() {
            if let Some(fine) = UserFine::find()
                .filter(user_fine::Column::LedgerEntryId.eq(id))
                .one(&txn)
                .await?
            {
                fine.delete(&txn).await?;
            }
        }

        entry.delete(&txn).await?;
    } else {
        let parent_id = entry.parent_id;
        entry.delete(&txn).await?;
        if let Some(parent_id) = parent_id {
            recompute_paid_status(&txn, parent_id).await?;
        }
    }

    txn.commit().await?;
    Ok(())
}

/// Retrieves a ledger entry by id, returning None when absent.
pub async fn get_entry_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> Result<Option<ledger_entry::Model>> {
    LedgerEntry::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Retrieves a member's full ledger, newest effective date first.
pub async fn entries_for_member(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Vec<ledger_entry::Model>> {
    LedgerEntry::find()
        .filter(ledger_entry::Column::MemberId.eq(member_id))
        .order_by_desc(ledger_entry::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Computes a member's outstanding balance.
///
/// Balance is the sum of all debit amounts minus the sum of all credit
/// amounts across the full ledger, clamped at zero for display. The breakdown
/// groups unpaid debit amounts by entry type, omitting empty buckets.
pub async fn outstanding_balance(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<BalanceSummary> {
    ensure_member(db, member_id).await?;

    let entries = LedgerEntry::find()
        .filter(ledger_entry::Column::MemberId.eq(member_id))
        .all(db)
        .await?;

    let mut total_debits = 0.0;
    let mut total_credits = 0.0;
    let mut breakdown: HashMap<String, f64> = HashMap::new();

    for entry in entries {
        if entry.is_debit() {
            total_debits += entry.amount;
            if !entry.is_paid {
                *breakdown.entry(entry.entry_type).or_insert(0.0) += entry.amount;
            }
        } else {
            total_credits += entry.amount;
        }
    }

    Ok(BalanceSummary {
        member_id,
        total_debits,
        total_credits,
        balance: (total_debits - total_credits).max(0.0),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::member;
    use crate::test_utils::{setup_test_db, setup_with_member};
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_record_charge_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        for bad in [0.0, -50.0, f64::NAN, f64::INFINITY] {
            let result = record_charge(&db, 1, EntryType::ManualFee, bad, None).await;
            assert!(matches!(
                result.unwrap_err(),
                Error::InvalidAmount { amount: _ }
            ));
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_record_charge_rejects_payment_type() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = record_charge(&db, 1, EntryType::Payment, 100.0, None).await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_record_charge_member_not_found() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite)
            .append_query_results([Vec::<member::Model>::new()])
            .into_connection();

        let result = record_charge(&db, 999, EntryType::DailyFee, 50.0, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "member",
                id: 999
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_record_charge_defaults() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let before = chrono::Utc::now();
        let entry = record_charge(&db, member.id, EntryType::ManualFee, 250.0, None).await?;
        let after = chrono::Utc::now();

        assert_eq!(entry.member_id, member.id);
        assert_eq!(entry.entry_type, "manual_fee");
        assert_eq!(entry.transaction_type, "debit");
        assert_eq!(entry.amount, 250.0);
        assert!(!entry.is_paid);
        assert!(entry.parent_id.is_none());
        assert!(entry.date >= before && entry.date <= after);

        Ok(())
    }

    #[tokio::test]
    async fn test_record_charge_backdated() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let visit_day = chrono::Utc::now() - chrono::Duration::days(3);
        let entry =
            record_charge(&db, member.id, EntryType::DailyFee, 100.0, Some(visit_day)).await?;

        assert_eq!(entry.date, visit_day);

        Ok(())
    }

    #[tokio::test]
    async fn test_unlinked_payment() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let payment = record_payment(
            &db,
            member.id,
            300.0,
            None,
            Some("cash".to_string()),
            None,
        )
        .await?;

        assert_eq!(payment.entry_type, "payment");
        assert_eq!(payment.transaction_type, "credit");
        assert!(payment.is_paid);
        assert!(payment.parent_id.is_none());
        assert_eq!(payment.payment_method.as_deref(), Some("cash"));

        Ok(())
    }

    #[tokio::test]
    async fn test_linked_payments_propagate_paid_status() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let debit = record_charge(&db, member.id, EntryType::MonthlyFee, 500.0, None).await?;

        // Partial payment leaves the parent unpaid
        let c1 = record_payment(&db, member.id, 300.0, Some(debit.id), None, None).await?;
        assert_eq!(c1.parent_id, Some(debit.id));
        let parent = get_entry_by_id(&db, debit.id).await?.unwrap();
        assert!(!parent.is_paid);

        // Exact-cover payment flips it to paid
        record_payment(&db, member.id, 200.0, Some(debit.id), None, None).await?;
        let parent = get_entry_by_id(&db, debit.id).await?.unwrap();
        assert!(parent.is_paid);

        // One more rupee is an overpayment
        let result = record_payment(&db, member.id, 1.0, Some(debit.id), None, None).await;
        match result.unwrap_err() {
            Error::Overpayment {
                remaining,
                attempted,
            } => {
                assert_eq!(remaining, 0.0);
                assert_eq!(attempted, 1.0);
            }
            other => panic!("expected Overpayment, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_overpayment_rolls_back_credit() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let debit = record_charge(&db, member.id, EntryType::MonthlyFee, 100.0, None).await?;

        let result = record_payment(&db, member.id, 150.0, Some(debit.id), None, None).await;
        assert!(matches!(result.unwrap_err(), Error::Overpayment { .. }));

        // The rejected credit must not exist and the parent must be untouched
        let children = linked_credits(&db, debit.id).await?;
        assert!(children.is_empty());
        let parent = get_entry_by_id(&db, debit.id).await?.unwrap();
        assert!(!parent.is_paid);

        Ok(())
    }

    #[tokio::test]
    async fn test_linked_payment_invalid_targets() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        // Missing parent
        let result = record_payment(&db, member.id, 50.0, Some(9999), None, None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidLink { id: 9999, .. }
        ));

        // Linking to a credit is rejected
        let credit = record_payment(&db, member.id, 50.0, None, None, None).await?;
        let result = record_payment(&db, member.id, 10.0, Some(credit.id), None, None).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidLink { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_linked_credit_restores_unpaid() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let debit = record_charge(&db, member.id, EntryType::MonthlyFee, 500.0, None).await?;

        record_payment(&db, member.id, 300.0, Some(debit.id), None, None).await?;
        let c2 = record_payment(&db, member.id, 200.0, Some(debit.id), None, None).await?;
        assert!(get_entry_by_id(&db, debit.id).await?.unwrap().is_paid);

        // Removing the covering credit drops the total below the debit amount
        delete_ledger_entry(&db, c2.id).await?;
        let parent = get_entry_by_id(&db, debit.id).await?.unwrap();
        assert!(!parent.is_paid);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_debit_with_children_rejected() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let debit = record_charge(&db, member.id, EntryType::MonthlyFee, 500.0, None).await?;
        record_payment(&db, member.id, 100.0, Some(debit.id), None, None).await?;

        let result = delete_ledger_entry(&db, debit.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::LinkedPaymentsExist { count: 1, .. }
        ));

        // Still present
        assert!(get_entry_by_id(&db, debit.id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_entry_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_ledger_entry(&db, 424_242).await;
        assert!(matches!(result.unwrap_err(), Error::NotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_parent_amount_rederives_own_status() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let debit = record_charge(&db, member.id, EntryType::MonthlyFee, 500.0, None).await?;
        record_payment(&db, member.id, 500.0, Some(debit.id), None, None).await?;
        assert!(get_entry_by_id(&db, debit.id).await?.unwrap().is_paid);

        // Raising the amount above the paid total flips it back to unpaid
        let updated = edit_ledger_entry(
            &db,
            debit.id,
            EntryChanges {
                amount: Some(600.0),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.amount, 600.0);
        assert!(!updated.is_paid);

        // Lowering it back to the covered amount flips it to paid again
        let updated = edit_ledger_entry(
            &db,
            debit.id,
            EntryChanges {
                amount: Some(400.0),
                ..Default::default()
            },
        )
        .await?;
        assert!(updated.is_paid);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_child_amount_rederives_parent() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let debit = record_charge(&db, member.id, EntryType::MonthlyFee, 500.0, None).await?;
        let credit = record_payment(&db, member.id, 300.0, Some(debit.id), None, None).await?;

        let updated = edit_ledger_entry(
            &db,
            credit.id,
            EntryChanges {
                amount: Some(500.0),
                ..Default::default()
            },
        )
        .await?;
        assert_eq!(updated.amount, 500.0);

        let parent = get_entry_by_id(&db, debit.id).await?.unwrap();
        assert!(parent.is_paid);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_child_amount_cannot_overpay() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let debit = record_charge(&db, member.id, EntryType::MonthlyFee, 500.0, None).await?;
        record_payment(&db, member.id, 300.0, Some(debit.id), None, None).await?;
        let c2 = record_payment(&db, member.id, 100.0, Some(debit.id), None, None).await?;

        // 300 from the sibling leaves 200 of capacity for this credit
        let result = edit_ledger_entry(
            &db,
            c2.id,
            EntryChanges {
                amount: Some(250.0),
                ..Default::default()
            },
        )
        .await;
        match result.unwrap_err() {
            Error::Overpayment {
                remaining,
                attempted,
            } => {
                assert_eq!(remaining, 200.0);
                assert_eq!(attempted, 250.0);
            }
            other => panic!("expected Overpayment, got {other:?}"),
        }

        // Unchanged on disk
        let unchanged = get_entry_by_id(&db, c2.id).await?.unwrap();
        assert_eq!(unchanged.amount, 100.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_entry_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = edit_ledger_entry(&db, 777, EntryChanges::default()).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "ledger entry",
                id: 777
            }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_metadata_fields() -> Result<()> {
        let (db, member) = setup_with_member().await?;
        let entry = record_charge(&db, member.id, EntryType::ManualFee, 120.0, None).await?;

        let updated = edit_ledger_entry(
            &db,
            entry.id,
            EntryChanges {
                notes: Some("racket restring".to_string()),
                ..Default::default()
            },
        )
        .await?;

        assert_eq!(updated.notes.as_deref(), Some("racket restring"));
        assert_eq!(updated.amount, 120.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_outstanding_balance_breakdown() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let monthly = record_charge(&db, member.id, EntryType::MonthlyFee, 1000.0, None).await?;
        record_charge(&db, member.id, EntryType::DailyFee, 100.0, None).await?;
        record_charge(&db, member.id, EntryType::DailyFee, 100.0, None).await?;
        record_payment(&db, member.id, 1000.0, Some(monthly.id), None, None).await?;

        let summary = outstanding_balance(&db, member.id).await?;
        assert_eq!(summary.total_debits, 1200.0);
        assert_eq!(summary.total_credits, 1000.0);
        assert_eq!(summary.balance, 200.0);

        // Fully paid monthly fee is out of the breakdown; daily fees remain
        assert!(!summary.breakdown.contains_key("monthly_fee"));
        assert_eq!(summary.breakdown.get("daily_fee"), Some(&200.0));

        Ok(())
    }

    #[tokio::test]
    async fn test_outstanding_balance_clamped_at_zero() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        record_charge(&db, member.id, EntryType::DailyFee, 100.0, None).await?;
        record_payment(&db, member.id, 500.0, None, None, None).await?;

        let summary = outstanding_balance(&db, member.id).await?;
        assert_eq!(summary.balance, 0.0);
        assert_eq!(summary.total_credits, 500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_entries_for_member_ordering() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let old = chrono::Utc::now() - chrono::Duration::days(10);
        let older = record_charge(&db, member.id, EntryType::DailyFee, 50.0, Some(old)).await?;
        let newer = record_charge(&db, member.id, EntryType::DailyFee, 50.0, None).await?;

        let entries = entries_for_member(&db, member.id).await?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, newer.id);
        assert_eq!(entries[1].id, older.id);

        Ok(())
    }
}
