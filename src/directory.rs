//! User and group listings
//!
//! Typed consumers of the paginated directory endpoints. Every record is
//! validated against its exact wire schema before it is yielded; a record the
//! remote should never produce aborts the stream.

use crate::connection::Connection;
use crate::error::Result;
use crate::pagination::get_paginated_records;
use futures::stream::Stream;
use serde::Deserialize;

/// A user the client is allowed to know about
///
/// Wire schema: all fields required, no extra fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct User {
    /// Unique identifier of the user
    pub id: i64,
    /// The user's full name
    pub full_name: String,
    /// The user's email address
    pub email_address: String,
    /// Name of the organization the user belongs to
    pub organization_name: String,
    /// The user's job title
    pub job_title: String,
}

/// A group the client is allowed to know about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Group {
    /// Unique identifier of the group
    pub id: i64,
}

/// Retrieve every user visible to the client
pub fn get_users<C>(connection: &C) -> impl Stream<Item = Result<User>> + '_
where
    C: Connection + ?Sized,
{
    get_paginated_records(connection, "/users/")
}

/// Retrieve the identifiers of the users that have been deleted
pub fn get_deleted_users<C>(connection: &C) -> impl Stream<Item = Result<i64>> + '_
where
    C: Connection + ?Sized,
{
    get_paginated_records(connection, "/users/deleted/")
}

/// Retrieve every group visible to the client
pub fn get_groups<C>(connection: &C) -> impl Stream<Item = Result<Group>> + '_
where
    C: Connection + ?Sized,
{
    get_paginated_records(connection, "/groups/")
}

/// Retrieve the identifiers of the members of a group
pub fn get_group_members<C>(
    connection: &C,
    group_id: i64,
) -> impl Stream<Item = Result<i64>> + '_
where
    C: Connection + ?Sized,
{
    get_paginated_records(connection, format!("/groups/{group_id}/members/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::paginated_api_calls;
    use crate::testing::MockConnection;
    use crate::Error;
    use futures::stream::TryStreamExt;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn stub_user_data(id: i64) -> Value {
        json!({
            "id": id,
            "full_name": format!("User {id}"),
            "email_address": format!("user-{id}@example.com"),
            "organization_name": "2degrees",
            "job_title": "Engineer",
        })
    }

    #[tokio::test]
    async fn test_get_users() {
        let users_data: Vec<Value> = (0..3).map(stub_user_data).collect();
        let connection = {
            let users_data = users_data.clone();
            MockConnection::new().simulate(move || paginated_api_calls("/users/", users_data))
        };

        let users: Vec<User> = get_users(&connection).try_collect().await.unwrap();

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].id, 0);
        assert_eq!(users[2].full_name, "User 2");
    }

    #[tokio::test]
    async fn test_get_users_rejects_extra_fields() {
        let mut user_data = stub_user_data(1);
        user_data["nickname"] = json!("Sam");
        let connection = MockConnection::new()
            .simulate(move || paginated_api_calls("/users/", vec![user_data]));

        let error = get_users(&connection)
            .try_collect::<Vec<User>>()
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_users_rejects_missing_fields() {
        let user_data = json!({"id": 1});
        let connection = MockConnection::new()
            .simulate(move || paginated_api_calls("/users/", vec![user_data]));

        let error = get_users(&connection)
            .try_collect::<Vec<User>>()
            .await
            .unwrap_err();

        assert!(matches!(error, Error::Validation { .. }));
    }

    #[tokio::test]
    async fn test_get_deleted_users() {
        let deleted_ids: Vec<Value> = vec![json!(4), json!(8), json!(15)];
        let connection = MockConnection::new()
            .simulate(move || paginated_api_calls("/users/deleted/", deleted_ids));

        let ids: Vec<i64> = get_deleted_users(&connection).try_collect().await.unwrap();

        assert_eq!(ids, vec![4, 8, 15]);
    }

    #[tokio::test]
    async fn test_get_groups() {
        let groups_data: Vec<Value> = vec![json!({"id": 1}), json!({"id": 2})];
        let connection =
            MockConnection::new().simulate(move || paginated_api_calls("/groups/", groups_data));

        let groups: Vec<Group> = get_groups(&connection).try_collect().await.unwrap();

        assert_eq!(groups, vec![Group { id: 1 }, Group { id: 2 }]);
    }

    #[tokio::test]
    async fn test_get_group_members() {
        let member_ids: Vec<Value> = vec![json!(7), json!(9)];
        let connection = MockConnection::new()
            .simulate(move || paginated_api_calls("/groups/3/members/", member_ids));

        let ids: Vec<i64> = get_group_members(&connection, 3)
            .try_collect()
            .await
            .unwrap();

        assert_eq!(ids, vec![7, 9]);
    }
}
