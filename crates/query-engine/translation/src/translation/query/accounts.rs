//! Account lookups.

use query_engine_sql::sql;
use query_engine_sql::sql::execution_plan::QueryDescriptor;

use crate::translation::helpers::{self, tables, Env};

/// `SELECT <columns> FROM user WHERE <column> = ?`
fn user_lookup(env: &Env, columns: &[&str], column: &str, value: sql::ast::Value) -> QueryDescriptor {
    let user = env.aliased_table(tables::USER, "U");
    let mut select = sql::helpers::simple_select(
        columns
            .iter()
            .map(|name| helpers::same_name_column(&user.reference, name))
            .collect(),
    );
    select.where_ = sql::ast::Where(sql::helpers::equals(
        sql::helpers::table_column(&user.reference, column),
        sql::ast::Expression::Value(value),
    ));
    select.from = Some(user.from);
    QueryDescriptor::select(select)
}

pub fn user_profile(env: &Env, user_id: i64) -> QueryDescriptor {
    user_lookup(env, &["name", "email"], "user_id", sql::ast::Value::Int8(user_id))
}

/// Yields a row iff an account uses `email`.
pub fn email_exists(env: &Env, email: &str) -> QueryDescriptor {
    user_lookup(env, &["user_id"], "email", sql::ast::Value::String(email.to_string()))
}

/// Yields a row iff an account is called `name`.
pub fn user_name_exists(env: &Env, name: &str) -> QueryDescriptor {
    user_lookup(env, &["user_id"], "name", sql::ast::Value::String(name.to_string()))
}

/// The account id and stored password hash for `email`. Verifying the
/// password is up to the caller.
pub fn authenticate(env: &Env, email: &str) -> QueryDescriptor {
    user_lookup(
        env,
        &["user_id", "password"],
        "email",
        sql::ast::Value::String(email.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use query_engine_sql::sql::string::Param;

    #[test]
    fn user_table_name_is_quoted() {
        let descriptor = authenticate(&Env::default(), "ada@example.com");
        insta::assert_snapshot!(
            descriptor.template(),
            @"SELECT `U`.`user_id` AS `user_id`, `U`.`password` AS `password` FROM `user` AS `U` WHERE (`U`.`email` = ?)"
        );
        assert_eq!(
            descriptor.values(),
            &[Param::String("ada@example.com".to_string())]
        );
    }
}
