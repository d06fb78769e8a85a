//! Reward point ledger entries.
//!
//! Points are never updated in place: spending and earning both append a
//! signed `change`, and the balance is their sum.

use chrono::NaiveDate;
use nonempty::NonEmpty;
use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use super::{date, delete_by_key, insert, int};
use crate::translation::helpers::{tables, Env};

/// Rows of the `reward_reason` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewardReason {
    UsedOnBooking,
    EarnedFromBooking,
}

impl RewardReason {
    pub fn id(self) -> i64 {
        match self {
            RewardReason::UsedOnBooking => 1,
            RewardReason::EarnedFromBooking => 2,
        }
    }
}

const COLUMNS: [&str; 5] = [
    "user_id",
    "reward_reason_id",
    "transaction_id",
    "date_active",
    "change",
];

fn ledger_entry(
    env: &Env,
    user_id: i64,
    reason: RewardReason,
    transaction_id: i64,
    date_active: sql::ast::Expression,
    change: i64,
) -> QueryDescriptor {
    insert(
        env,
        tables::REWARD,
        &COLUMNS,
        NonEmpty::new(vec![
            int(user_id),
            int(reason.id()),
            int(transaction_id),
            date_active,
            int(change),
        ]),
    )
}

/// Spend points on a transaction, effective today. `change` is negative.
pub fn use_rewards_on_booking(
    env: &Env,
    user_id: i64,
    transaction_id: i64,
    change: i64,
) -> QueryDescriptor {
    ledger_entry(
        env,
        user_id,
        RewardReason::UsedOnBooking,
        transaction_id,
        sql::ast::Expression::CurrentDate,
        change,
    )
}

/// Earn points from a transaction, spendable from `date_active`.
pub fn gain_rewards_from_booking(
    env: &Env,
    user_id: i64,
    transaction_id: i64,
    date_active: NaiveDate,
    change: i64,
) -> QueryDescriptor {
    ledger_entry(
        env,
        user_id,
        RewardReason::EarnedFromBooking,
        transaction_id,
        date(date_active),
        change,
    )
}

/// Drop every ledger entry of a transaction, e.g. when it is cancelled.
pub fn remove_transaction_rewards(env: &Env, transaction_id: i64) -> QueryDescriptor {
    delete_by_key(env, tables::REWARD, "transaction_id", transaction_id)
}
