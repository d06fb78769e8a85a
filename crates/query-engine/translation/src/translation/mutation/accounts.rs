//! Create accounts and guest records.

use nonempty::NonEmpty;
use query_engine_sql::sql::execution_plan::QueryDescriptor;
use serde::Deserialize;

use super::{insert, text};
use crate::translation::helpers::{tables, Env};

/// A registered user. The password is stored as given, so it must already be
/// hashed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub password_hash: String,
    pub email: String,
}

/// Someone booking without an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewGuest {
    pub email: String,
    pub name: String,
}

pub fn create_user(env: &Env, user: &NewUser) -> QueryDescriptor {
    insert(
        env,
        tables::USER,
        &["name", "password", "email"],
        NonEmpty::new(vec![
            text(&user.name),
            text(&user.password_hash),
            text(&user.email),
        ]),
    )
}

pub fn insert_guest(env: &Env, guest: &NewGuest) -> QueryDescriptor {
    insert(
        env,
        tables::GUEST,
        &["email", "name"],
        NonEmpty::new(vec![text(&guest.email), text(&guest.name)]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_insert_is_schema_qualified() {
        let env = Env::new(Some("spartanhotel".to_string()), 10);
        let descriptor = create_user(
            &env,
            &NewUser {
                name: "ada".to_string(),
                password_hash: "$2b$10$hash".to_string(),
                email: "ada@example.com".to_string(),
            },
        );
        assert_eq!(
            descriptor.template(),
            "INSERT INTO `spartanhotel`.`user` (`name`, `password`, `email`) VALUES (?, ?, ?)"
        );
    }
}
