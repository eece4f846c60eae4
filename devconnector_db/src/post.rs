use crate::GetDb;

use devconnector_domain::error::DcResult;
use devconnector_domain::user::UserId;

use entrait::*;

pub struct PgPostRepo;

#[entrait]
impl devconnector_domain::post::PostRepoImpl for PgPostRepo {
    pub async fn delete_posts_by_author(deps: &impl GetDb, author: UserId) -> DcResult<u64> {
        let result = sqlx::query(r#"DELETE FROM app.post WHERE user_id = $1"#)
            .bind(author.0)
            .execute(&deps.get_db().pg_pool)
            .await?;

        Ok(result.rows_affected())
    }
}
