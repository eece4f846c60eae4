use devconnector_domain::error::{DcError, DcResult};
use devconnector_domain::post::DelegatePostRepo;
use devconnector_domain::profile::repo::DelegateProfileRepo;
use devconnector_domain::user::repo::DelegateUserRepo;

use anyhow::Context;
use sqlx::error::DatabaseError;
use sqlx::PgPool;

pub mod post;
pub mod profile;
pub mod user;

#[derive(Clone)]
pub struct Db {
    pub pg_pool: PgPool,
}

impl Db {
    pub async fn init(url: &str) -> anyhow::Result<Self> {
        let pg_pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(50)
            .connect(url)
            .await
            .context("could not connect to database_url")?;

        sqlx::migrate!("../migrations").run(&pg_pool).await?;
        tracing::info!("database migrated");

        Ok(Db { pg_pool })
    }
}

/// Access to the database from whatever the repositories are delegated from.
pub trait GetDb {
    fn get_db(&self) -> &Db;
}

impl GetDb for Db {
    fn get_db(&self) -> &Db {
        self
    }
}

impl<T: GetDb> GetDb for entrait::Impl<T> {
    fn get_db(&self) -> &Db {
        (**self).get_db()
    }
}

// `Db` on its own is a complete storage backend.
impl DelegateProfileRepo<Self> for Db {
    type Target = profile::PgProfileRepo;
}

impl DelegatePostRepo<Self> for Db {
    type Target = post::PgPostRepo;
}

impl DelegateUserRepo<Self> for Db {
    type Target = user::PgUserRepo;
}

trait DbResultExt<T> {
    fn on_constraint(
        self,
        name: &str,
        f: impl FnOnce(Box<dyn DatabaseError>) -> DcError,
    ) -> DcResult<T>;
}

impl<T, E> DbResultExt<T> for Result<T, E>
where
    E: Into<DcError>,
{
    fn on_constraint(
        self,
        name: &str,
        map_err: impl FnOnce(Box<dyn DatabaseError>) -> DcError,
    ) -> DcResult<T> {
        self.map_err(|e| match e.into() {
            DcError::Storage(sqlx::Error::Database(dbe)) if dbe.constraint() == Some(name) => {
                map_err(dbe)
            }
            e => e,
        })
    }
}

/// A fresh, migrated database named after the current test thread.
///
/// Tests using it are `#[ignore]`d and run with `cargo test -- --ignored`
/// against the server in `DATABASE_URL`.
#[cfg(test)]
async fn create_test_db() -> entrait::Impl<Db> {
    use sha2::Digest;
    use sqlx::Connection;

    let mut url = database_server_url();

    let mut hasher = sha2::Sha256::new();
    hasher.update(std::thread::current().name().unwrap().as_bytes());
    let thread_hash = hex::encode(hasher.finalize());
    let db_name = &thread_hash[0..24];

    let mut connection = sqlx::PgConnection::connect(url.as_str()).await.unwrap();

    sqlx::query(&format!(r#"DROP DATABASE IF EXISTS "{}""#, db_name))
        .execute(&mut connection)
        .await
        .expect("failed to drop");

    sqlx::query(&format!(r#"CREATE DATABASE "{}""#, db_name))
        .execute(&mut connection)
        .await
        .expect("failed creating test database");

    url.set_path(db_name);

    let pg_pool = sqlx::PgPool::connect(url.as_str())
        .await
        .expect("Failed to connect to database");

    sqlx::migrate!("../migrations")
        .run(&pg_pool)
        .await
        .expect("Failed to migrate");

    entrait::Impl::new(Db { pg_pool })
}

#[cfg(test)]
fn database_server_url() -> url::Url {
    // (re)load the .env file
    dotenv::dotenv().ok();

    let mut url: url::Url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set")
        .parse()
        .expect("malformed DATABASE_URL");

    if let Ok(mut path) = url.path_segments_mut() {
        path.clear();
    }

    url
}

#[cfg(test)]
async fn insert_test_user(db: &Db, name: &str) -> devconnector_domain::user::UserId {
    let user_id = sqlx::query_scalar::<_, uuid::Uuid>(
        r#"INSERT INTO app.user (name, email, password_hash, avatar) VALUES ($1, $2, 'hash', $3) RETURNING user_id"#,
    )
    .bind(name)
    .bind(format!("{name}@example.com"))
    .bind(format!("//www.gravatar.com/avatar/{name}"))
    .fetch_one(&db.pg_pool)
    .await
    .expect("failed to insert test user");

    devconnector_domain::user::UserId(user_id)
}
