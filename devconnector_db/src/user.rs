use crate::GetDb;

use devconnector_domain::error::DcResult;
use devconnector_domain::user::UserId;

use entrait::*;

pub struct PgUserRepo;

#[entrait]
impl devconnector_domain::user::repo::UserRepoImpl for PgUserRepo {
    pub async fn delete_user(deps: &impl GetDb, UserId(user_id): UserId) -> DcResult<bool> {
        let result = sqlx::query(r#"DELETE FROM app.user WHERE user_id = $1"#)
            .bind(user_id)
            .execute(&deps.get_db().pg_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use crate::{create_test_db, insert_test_user};

    use devconnector_domain::account::delete_owner;
    use devconnector_domain::error::DcError;
    use devconnector_domain::profile::form::ProfileForm;
    use devconnector_domain::profile::upsert_profile;
    use devconnector_domain::user::repo::UserRepo;

    use assert_matches::*;

    fn form() -> ProfileForm {
        ProfileForm {
            skills: Some("Rust".to_string()),
            ..ProfileForm::default()
        }
    }

    async fn count(db: &crate::Db, sql: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(sql)
            .fetch_one(&db.pg_pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    #[ignore = "needs Postgres at DATABASE_URL"]
    async fn user_with_profile_should_not_be_deletable_on_its_own() {
        let db = create_test_db().await;
        let owner = insert_test_user(&db, "ferris").await;
        upsert_profile(&db, owner, form()).await.unwrap();

        assert_matches!(db.delete_user(owner).await, Err(DcError::Storage(_)));
    }

    #[tokio::test]
    #[ignore = "needs Postgres at DATABASE_URL"]
    async fn account_deletion_should_cascade_to_posts_and_profile() {
        let db = create_test_db().await;
        let owner = insert_test_user(&db, "ferris").await;
        let other = insert_test_user(&db, "corro").await;
        upsert_profile(&db, owner, form()).await.unwrap();
        upsert_profile(&db, other, form()).await.unwrap();

        for text in ["one", "two", "three"] {
            sqlx::query(r#"INSERT INTO app.post (user_id, text) VALUES ($1, $2)"#)
                .bind(owner.0)
                .bind(text)
                .execute(&db.pg_pool)
                .await
                .unwrap();
        }

        delete_owner(&db, owner).await.unwrap();

        assert_eq!(0, count(&db, "SELECT COUNT(*) FROM app.post").await);
        assert_eq!(1, count(&db, "SELECT COUNT(*) FROM app.profile").await);
        assert_eq!(1, count(&db, "SELECT COUNT(*) FROM app.user").await);
        assert!(!db.delete_user(owner).await.unwrap());
    }
}
