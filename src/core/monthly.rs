//! Monthly billing business logic.
//!
//! Bills a member's subscription once per calendar month. While a member's
//! cumulative deposits are below the facility target, plans that define a
//! deposit part split the monthly rate into a deposit debit and a monthly-fee
//! debit; afterwards the full rate is charged as a single monthly fee. The
//! idempotency check and the inserts run in one database transaction.

use crate::{
    entities::{
        LedgerEntry, Member, MembershipPlan,
        ledger_entry::{self, EntryType, TransactionKind},
    },
    errors::{Error, Result},
};
use chrono::{Datelike, Utc};
use sea_orm::{Set, TransactionTrait, prelude::*};

/// Cumulative deposit amount after which the monthly split stops.
pub const DEPOSIT_TARGET: f64 = 2000.0;

/// Bills a member's monthly subscription fee.
///
/// Fails with [`Error::NoActiveSubscription`] for inactive or plan-less
/// members and with [`Error::AlreadyCharged`] when a monthly-fee debit
/// already exists for the member dated within the current calendar month.
/// Returns the inserted debits: one monthly fee, or a deposit plus a monthly
/// fee while the deposit split is active. Zero-valued parts are skipped.
pub async fn charge_monthly_fee(
    db: &DatabaseConnection,
    member_id: i64,
) -> Result<Vec<ledger_entry::Model>> {
    let member = Member::find_by_id(member_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "member",
            id: member_id,
        })?;

    if !member.active {
        return Err(Error::NoActiveSubscription { member_id });
    }
    let plan_id = member
        .plan_id
        .ok_or(Error::NoActiveSubscription { member_id })?;
    let plan = MembershipPlan::find_by_id(plan_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "membership plan",
            id: plan_id,
        })?;

    let txn = db.begin().await?;
    let now = Utc::now();

    // Idempotency: at most one monthly fee per calendar month
    let monthly_fees = LedgerEntry::find()
        .filter(ledger_entry::Column::MemberId.eq(member_id))
        .filter(ledger_entry::Column::EntryType.eq(EntryType::MonthlyFee.as_str()))
        .all(&txn)
        .await?;
    if monthly_fees
        .iter()
        .any(|e| e.date.year() == now.year() && e.date.month() == now.month())
    {
        return Err(Error::AlreadyCharged {
            member_id,
            month: now.format("%Y-%m").to_string(),
        });
    }

    let deposit_total: f64 = LedgerEntry::find()
        .filter(ledger_entry::Column::MemberId.eq(member_id))
        .filter(ledger_entry::Column::EntryType.eq(EntryType::Deposit.as_str()))
        .all(&txn)
        .await?
        .iter()
        .map(|e| e.amount)
        .sum();

    let mut parts: Vec<(EntryType, f64)> = Vec::new();
    if plan.monthly_deposit_part > 0.0 && deposit_total < DEPOSIT_TARGET {
        parts.push((EntryType::Deposit, plan.monthly_deposit_part));
        parts.push((
            EntryType::MonthlyFee,
            plan.rate_monthly - plan.monthly_deposit_part,
        ));
    } else {
        parts.push((EntryType::MonthlyFee, plan.rate_monthly));
    }

    let mut inserted = Vec::new();
    for (entry_type, amount) in parts {
        if amount <= 0.0 {
            continue;
        }
        let entry = ledger_entry::ActiveModel {
            member_id: Set(member_id),
            entry_type: Set(entry_type.as_str().to_string()),
            transaction_type: Set(TransactionKind::Debit.as_str().to_string()),
            amount: Set(amount),
            is_paid: Set(false),
            date: Set(now),
            parent_id: Set(None),
            notes: Set(None),
            payment_method: Set(None),
            created_by: Set(None),
            ..Default::default()
        };
        inserted.push(entry.insert(&txn).await?);
    }

    txn.commit().await?;

    tracing::info!(
        member_id,
        entries = inserted.len(),
        rate = plan.rate_monthly,
        "charged monthly fee"
    );

    Ok(inserted)
}

/// Records a daily attendance fee backdated to the visit day.
///
/// Thin wrapper over [`crate::core::ledger::record_charge`] that pins the
/// effective date to the check-in day instead of the recording time.
pub async fn record_daily_fee(
    db: &DatabaseConnection,
    member_id: i64,
    amount: f64,
    visit_date: DateTimeUtc,
) -> Result<ledger_entry::Model> {
    crate::core::ledger::record_charge(db, member_id, EntryType::DailyFee, amount, Some(visit_date))
        .await
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::ledger;
    use crate::test_utils::{
        create_custom_plan, create_member_with_plan, create_member_without_plan, setup_test_db,
        setup_with_member,
    };

    #[tokio::test]
    async fn test_charge_monthly_fee_no_split() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_custom_plan(&db, "No Deposit", 1200.0, 0.0).await?;
        let member = create_member_with_plan(&db, "Asha", plan.id).await?;

        let entries = charge_monthly_fee(&db, member.id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, "monthly_fee");
        assert_eq!(entries[0].amount, 1200.0);
        assert!(!entries[0].is_paid);

        Ok(())
    }

    #[tokio::test]
    async fn test_charge_monthly_fee_deposit_split() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_custom_plan(&db, "With Deposit", 1500.0, 200.0).await?;
        let member = create_member_with_plan(&db, "Asha", plan.id).await?;

        let entries = charge_monthly_fee(&db, member.id).await?;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].entry_type, "deposit");
        assert_eq!(entries[0].amount, 200.0);
        assert_eq!(entries[1].entry_type, "monthly_fee");
        assert_eq!(entries[1].amount, 1300.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_charge_monthly_fee_split_stops_at_target() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_custom_plan(&db, "With Deposit", 1500.0, 200.0).await?;
        let member = create_member_with_plan(&db, "Asha", plan.id).await?;

        // Member already holds the full deposit target
        ledger::record_charge(
            &db,
            member.id,
            EntryType::Deposit,
            DEPOSIT_TARGET,
            Some(Utc::now() - chrono::Duration::days(90)),
        )
        .await?;

        let entries = charge_monthly_fee(&db, member.id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, "monthly_fee");
        assert_eq!(entries[0].amount, 1500.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_charge_monthly_fee_skips_zero_fee_part() -> Result<()> {
        let db = setup_test_db().await?;
        // The whole rate goes to deposit, leaving a zero monthly-fee part
        let plan = create_custom_plan(&db, "Deposit Only", 200.0, 200.0).await?;
        let member = create_member_with_plan(&db, "Asha", plan.id).await?;

        let entries = charge_monthly_fee(&db, member.id).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_type, "deposit");
        assert_eq!(entries[0].amount, 200.0);

        Ok(())
    }

    #[tokio::test]
    async fn test_charge_monthly_fee_idempotent_within_month() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_custom_plan(&db, "Standard", 1000.0, 0.0).await?;
        let member = create_member_with_plan(&db, "Asha", plan.id).await?;

        charge_monthly_fee(&db, member.id).await?;

        let result = charge_monthly_fee(&db, member.id).await;
        match result.unwrap_err() {
            Error::AlreadyCharged {
                member_id,
                month,
            } => {
                assert_eq!(member_id, member.id);
                assert_eq!(month, Utc::now().format("%Y-%m").to_string());
            }
            other => panic!("expected AlreadyCharged, got {other:?}"),
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_charge_monthly_fee_previous_month_does_not_block() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_custom_plan(&db, "Standard", 1000.0, 0.0).await?;
        let member = create_member_with_plan(&db, "Asha", plan.id).await?;

        // A monthly fee dated well into a previous month
        ledger::record_charge(
            &db,
            member.id,
            EntryType::MonthlyFee,
            1000.0,
            Some(Utc::now() - chrono::Duration::days(60)),
        )
        .await?;

        let entries = charge_monthly_fee(&db, member.id).await?;
        assert_eq!(entries.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_charge_monthly_fee_requires_subscription() -> Result<()> {
        let db = setup_test_db().await?;

        // Member without a plan
        let no_plan = create_member_without_plan(&db, "Walk-in").await?;
        let result = charge_monthly_fee(&db, no_plan.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NoActiveSubscription { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_charge_monthly_fee_inactive_member() -> Result<()> {
        let db = setup_test_db().await?;
        let plan = create_custom_plan(&db, "Standard", 1000.0, 0.0).await?;
        let member = create_member_with_plan(&db, "Asha", plan.id).await?;

        // Deactivate
        let mut active: crate::entities::member::ActiveModel = member.clone().into();
        active.active = Set(false);
        active.update(&db).await?;

        let result = charge_monthly_fee(&db, member.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NoActiveSubscription { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_record_daily_fee_backdated() -> Result<()> {
        let (db, member) = setup_with_member().await?;

        let visit = Utc::now() - chrono::Duration::days(2);
        let entry = record_daily_fee(&db, member.id, 100.0, visit).await?;

        assert_eq!(entry.entry_type, "daily_fee");
        assert_eq!(entry.date, visit);
        assert!(!entry.is_paid);

        Ok(())
    }
}
