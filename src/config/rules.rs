//! Membership plan and fine rule seeding from config.toml.
//!
//! This module loads the facility's billing reference data from a TOML file
//! and seeds the database on first run. Seeding is idempotent: rows are only
//! inserted when the corresponding table is empty.

use crate::{
    entities::{FineRule, MembershipPlan, fine_rule, membership_plan},
    errors::{Error, Result},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Membership plans to seed
    #[serde(default)]
    pub plans: Vec<PlanConfig>,
    /// Fine rules to seed
    #[serde(default)]
    pub fine_rules: Vec<FineRuleConfig>,
}

/// Configuration for a single membership plan
#[derive(Debug, Deserialize, Clone)]
pub struct PlanConfig {
    /// Plan name
    pub name: String,
    /// Full monthly rate
    pub rate_monthly: f64,
    /// Portion of the rate booked as a refundable deposit
    pub monthly_deposit_part: f64,
}

/// Configuration for a single fine rule
#[derive(Debug, Deserialize, Clone)]
pub struct FineRuleConfig {
    /// Offense name
    pub name: String,
    /// Amount charged on the first occurrence
    pub first_time_fine: f64,
    /// Escalation factor per additional occurrence
    pub subsequent_multiplier: f64,
}

/// Loads seed configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads seed configuration from the default location (./config.toml)
pub fn load_default_config() -> Result<Config> {
    load_config("config.toml")
}

/// Seeds membership plans and fine rules when their tables are empty.
///
/// Returns the number of rows inserted.
pub async fn seed_reference_data(db: &DatabaseConnection, config: &Config) -> Result<usize> {
    let mut inserted = 0;

    if MembershipPlan::find().count(db).await? == 0 {
        for plan in &config.plans {
            let model = membership_plan::ActiveModel {
                name: Set(plan.name.clone()),
                rate_monthly: Set(plan.rate_monthly),
                monthly_deposit_part: Set(plan.monthly_deposit_part),
                ..Default::default()
            };
            model.insert(db).await?;
            inserted += 1;
        }
        tracing::info!("Seeded {} membership plans", config.plans.len());
    }

    if FineRule::find().count(db).await? == 0 {
        for rule in &config.fine_rules {
            let model = fine_rule::ActiveModel {
                name: Set(rule.name.clone()),
                first_time_fine: Set(rule.first_time_fine),
                subsequent_multiplier: Set(rule.subsequent_multiplier),
                ..Default::default()
            };
            model.insert(db).await?;
            inserted += 1;
        }
        tracing::info!("Seeded {} fine rules", config.fine_rules.len());
    }

    Ok(inserted)
}
