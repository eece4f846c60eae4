use crate::DbResultExt;
use crate::GetDb;

use devconnector_domain::error::{DcError, DcResult};
use devconnector_domain::profile::*;
use devconnector_domain::user::UserId;

use entrait::*;
use time::OffsetDateTime;
use uuid::Uuid;

pub struct PgProfileRepo;

#[derive(sqlx::FromRow)]
struct ProfileRow {
    user_id: Uuid,
    location: Option<String>,
    bio: Option<String>,
    githubusername: Option<String>,
    skills: Vec<String>,
    social_linkedin: Option<String>,
    social_instagram: Option<String>,
    created_at: OffsetDateTime,
}

impl ProfileRow {
    fn into_details(self) -> ProfileDetails {
        ProfileDetails {
            location: self.location,
            bio: self.bio,
            github_username: self.githubusername,
            skills: self.skills,
            social: Social {
                linkedin: self.social_linkedin,
                instagram: self.social_instagram,
            },
            date: self.created_at,
        }
    }
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            user: UserId(row.user_id),
            details: row.into_details(),
        }
    }
}

#[derive(sqlx::FromRow)]
struct OwnedProfileRow {
    #[sqlx(flatten)]
    profile: ProfileRow,
    name: String,
    avatar: Option<String>,
}

impl From<OwnedProfileRow> for OwnedProfile {
    fn from(row: OwnedProfileRow) -> Self {
        Self {
            user: ProfileOwner {
                id: UserId(row.profile.user_id),
                name: row.name,
                avatar: row.avatar,
            },
            details: row.profile.into_details(),
        }
    }
}

#[entrait]
impl devconnector_domain::profile::repo::ProfileRepoImpl for PgProfileRepo {
    pub async fn find_profile(deps: &impl GetDb, owner: UserId) -> DcResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT user_id, location, bio, githubusername, skills,
                social_linkedin, social_instagram, created_at
            FROM app.profile
            WHERE user_id = $1
            "#,
        )
        .bind(owner.0)
        .fetch_optional(&deps.get_db().pg_pool)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn update_profile(deps: &impl GetDb, update: &ProfileUpdate) -> DcResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            // language=PostgreSQL
            r#"
            UPDATE app.profile AS p SET
                location = COALESCE($2, p.location),
                bio = COALESCE($3, p.bio),
                githubusername = COALESCE($4, p.githubusername),
                skills = COALESCE($5, p.skills),
                social_linkedin = $6,
                social_instagram = $7
            WHERE p.user_id = $1
            RETURNING user_id, location, bio, githubusername, skills,
                social_linkedin, social_instagram, created_at
            "#,
        )
        .bind(update.owner.0)
        .bind(update.location.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.github_username.as_deref())
        .bind(update.skills.as_deref())
        .bind(update.social.linkedin.as_deref())
        .bind(update.social.instagram.as_deref())
        .fetch_optional(&deps.get_db().pg_pool)
        .await?
        // The profile was removed between lookup and update.
        .ok_or(DcError::ProfileNotFound)?;

        Ok(row.into())
    }

    pub async fn insert_profile(deps: &impl GetDb, update: &ProfileUpdate) -> DcResult<Profile> {
        let row = sqlx::query_as::<_, ProfileRow>(
            // language=PostgreSQL
            r#"
            INSERT INTO app.profile AS p (
                user_id, location, bio, githubusername, skills,
                social_linkedin, social_instagram
            )
            VALUES ($1, $2, $3, $4, COALESCE($5, '{}'::text[]), $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                location = COALESCE(EXCLUDED.location, p.location),
                bio = COALESCE(EXCLUDED.bio, p.bio),
                githubusername = COALESCE(EXCLUDED.githubusername, p.githubusername),
                skills = COALESCE($5, p.skills),
                social_linkedin = EXCLUDED.social_linkedin,
                social_instagram = EXCLUDED.social_instagram
            RETURNING user_id, location, bio, githubusername, skills,
                social_linkedin, social_instagram, created_at
            "#,
        )
        .bind(update.owner.0)
        .bind(update.location.as_deref())
        .bind(update.bio.as_deref())
        .bind(update.github_username.as_deref())
        .bind(update.skills.as_deref())
        .bind(update.social.linkedin.as_deref())
        .bind(update.social.instagram.as_deref())
        .fetch_one(&deps.get_db().pg_pool)
        .await
        // The token outlived its user.
        .on_constraint("profile_user_id_fkey", |_| DcError::Unauthorized)?;

        Ok(row.into())
    }

    pub async fn find_profile_with_owner(
        deps: &impl GetDb,
        owner: UserId,
    ) -> DcResult<Option<OwnedProfile>> {
        let row = sqlx::query_as::<_, OwnedProfileRow>(
            r#"
            SELECT
                p.user_id, p.location, p.bio, p.githubusername, p.skills,
                p.social_linkedin, p.social_instagram, p.created_at,
                u.name, u.avatar
            FROM app.profile p
            JOIN app.user u ON u.user_id = p.user_id
            WHERE p.user_id = $1
            "#,
        )
        .bind(owner.0)
        .fetch_optional(&deps.get_db().pg_pool)
        .await?;

        Ok(row.map(Into::into))
    }

    pub async fn list_profiles_with_owner(deps: &impl GetDb) -> DcResult<Vec<OwnedProfile>> {
        let rows = sqlx::query_as::<_, OwnedProfileRow>(
            r#"
            SELECT
                p.user_id, p.location, p.bio, p.githubusername, p.skills,
                p.social_linkedin, p.social_instagram, p.created_at,
                u.name, u.avatar
            FROM app.profile p
            JOIN app.user u ON u.user_id = p.user_id
            ORDER BY p.created_at
            "#,
        )
        .fetch_all(&deps.get_db().pg_pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn delete_profile(deps: &impl GetDb, owner: UserId) -> DcResult<bool> {
        let result = sqlx::query(r#"DELETE FROM app.profile WHERE user_id = $1"#)
            .bind(owner.0)
            .execute(&deps.get_db().pg_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
