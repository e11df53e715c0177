//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod ball_event;
pub mod cricket_match;
pub mod fine_rule;
pub mod ledger_entry;
pub mod member;
pub mod membership_plan;
pub mod team;
pub mod tournament;
pub mod user_fine;

// Re-export specific types to avoid conflicts
pub use ball_event::{Column as BallEventColumn, Entity as BallEvent, Model as BallEventModel};
pub use cricket_match::{
    Column as CricketMatchColumn, Entity as CricketMatch, Model as CricketMatchModel,
};
pub use fine_rule::{Column as FineRuleColumn, Entity as FineRule, Model as FineRuleModel};
pub use ledger_entry::{
    Column as LedgerEntryColumn, Entity as LedgerEntry, Model as LedgerEntryModel,
};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use membership_plan::{
    Column as MembershipPlanColumn, Entity as MembershipPlan, Model as MembershipPlanModel,
};
pub use team::{Column as TeamColumn, Entity as Team, Model as TeamModel};
pub use tournament::{Column as TournamentColumn, Entity as Tournament, Model as TournamentModel};
pub use user_fine::{Column as UserFineColumn, Entity as UserFine, Model as UserFineModel};
