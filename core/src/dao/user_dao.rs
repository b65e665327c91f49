// core/src/dao/user_dao.rs

use crate::error::ShopResult;
use crate::models::User;
use crate::store::schema::{TABLE_USERS, USER_EMAIL};
use crate::store::{Accessor, Entity, SqliteQuery};

impl Entity for User {
  const TABLE: &'static str = TABLE_USERS;
  const NAME: &'static str = "User";
  const COLUMNS: &'static [&'static str] = &[USER_EMAIL];

  fn id(&self) -> i64 {
    self.id
  }

  fn set_id(&mut self, id: i64) {
    self.id = id;
  }

  fn bind_columns<'q>(&self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
    query.bind(self.email.clone())
  }
}

pub type UserDao = Accessor<User>;

impl UserDao {
  pub async fn find_by_email(&self, email: &str) -> ShopResult<Option<User>> {
    let predicate = format!("{USER_EMAIL} = ? LIMIT 1");
    let users = self.query_where(&predicate, &[email.into()]).await?;
    Ok(users.into_iter().next())
  }
}
