//! Reward point balances and history.

use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use crate::translation::helpers::{self, tables, Env};

/// The user's spendable balance as `sum`: the total of every change active on
/// or before today. Zero when there are none.
pub fn available_rewards(env: &Env, user_id: i64) -> QueryDescriptor {
    let reward = env.aliased_table(tables::REWARD, "R");

    let mut select = sql::helpers::simple_select(vec![(
        sql::helpers::make_column_alias("sum".to_string()),
        sql::helpers::function(
            sql::ast::Function::Coalesce,
            vec![
                sql::helpers::function(
                    sql::ast::Function::Sum,
                    vec![sql::helpers::table_column(&reward.reference, "change")],
                ),
                sql::ast::Expression::Value(sql::ast::Value::Int8(0)),
            ],
        ),
    )]);
    select.where_ = sql::ast::Where(sql::helpers::and_all(vec![
        sql::helpers::equals(
            sql::helpers::table_column(&reward.reference, "user_id"),
            sql::ast::Expression::Value(sql::ast::Value::Int8(user_id)),
        ),
        sql::helpers::binary(
            sql::helpers::table_column(&reward.reference, "date_active"),
            sql::ast::BinaryOperator::LessThanOrEqualTo,
            sql::ast::Expression::CurrentDate,
        ),
    ]));
    select.from = Some(reward.from);
    QueryDescriptor::select(select)
}

/// Every reward record of the user with the text of its reason, oldest first.
pub fn reward_records(env: &Env, user_id: i64) -> QueryDescriptor {
    let reward = env.aliased_table(tables::REWARD, "R");
    let reason = env.aliased_table(tables::REWARD_REASON, "RR");

    let mut select = sql::helpers::star_select(reward.from);
    select.select_list = sql::ast::SelectList::SelectListComposite(
        Box::new(sql::ast::SelectList::SelectStarFrom(reward.reference.clone())),
        Box::new(sql::ast::SelectList::SelectList(vec![
            helpers::same_name_column(&reason.reference, "reason"),
        ])),
    );
    select.joins = vec![sql::ast::Join::InnerJoin(sql::ast::InnerJoin {
        on: sql::helpers::equals(
            sql::helpers::table_column(&reward.reference, "reward_reason_id"),
            sql::helpers::table_column(&reason.reference, "reward_reason_id"),
        ),
        source: reason.from,
    })];
    select.where_ = sql::ast::Where(sql::helpers::equals(
        sql::helpers::table_column(&reward.reference, "user_id"),
        sql::ast::Expression::Value(sql::ast::Value::Int8(user_id)),
    ));
    select.order_by = sql::ast::OrderBy {
        elements: vec![sql::ast::OrderByElement {
            target: sql::helpers::table_column(&reward.reference, "reward_id"),
            direction: sql::ast::OrderByDirection::Asc,
        }],
    };
    QueryDescriptor::select(select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_sql::sql::string::Param;

    #[test]
    fn balance_only_counts_active_rewards() {
        let descriptor = available_rewards(&Env::default(), 3);
        insta::assert_snapshot!(
            descriptor.template(),
            @"SELECT COALESCE(SUM(`R`.`change`), ?) AS `sum` FROM `reward` AS `R` WHERE ((`R`.`user_id` = ?) AND (`R`.`date_active` <= CURRENT_DATE))"
        );
        assert_eq!(descriptor.values(), &[Param::Integer(0), Param::Integer(3)]);
    }

    #[test]
    fn records_carry_their_reason() {
        let descriptor = reward_records(&Env::default(), 3);
        assert!(descriptor.template().starts_with(
            "SELECT `R`.*, `RR`.`reason` AS `reason` FROM `reward` AS `R` JOIN `reward_reason` AS `RR`"
        ));
    }
}
