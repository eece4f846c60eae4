use devconnector_domain::account::DeleteAccount;
use devconnector_domain::error::{DcError, DcResult};
use devconnector_domain::github::FetchGithubRepos;
use devconnector_domain::profile::form::ProfileForm;
use devconnector_domain::profile::{
    CreateOrUpdate, FetchCurrentProfile, FetchProfile, ListProfiles, OwnedProfile, Profile,
};
use devconnector_domain::user::auth::Token;
use devconnector_domain::user::UserId;

use axum::extract::{Extension, Path};
use axum::routing::get;
use axum::Json;

#[derive(serde::Serialize, serde::Deserialize, Debug)]
struct MessageBody {
    msg: String,
}

pub struct ProfileRoutes<D>(std::marker::PhantomData<D>);

impl<D> ProfileRoutes<D>
where
    D: CreateOrUpdate
        + FetchCurrentProfile
        + FetchProfile
        + ListProfiles
        + DeleteAccount
        + FetchGithubRepos
        + Sized
        + Clone
        + Send
        + Sync
        + 'static,
{
    pub fn router() -> axum::Router {
        axum::Router::new()
            .route(
                "/profile",
                get(Self::list_profiles)
                    .post(Self::create_or_update)
                    .delete(Self::delete_account),
            )
            .route("/profile/me", get(Self::current_profile))
            .route("/profile/user/:user_id", get(Self::user_profile))
            .route("/profile/github/:username", get(Self::github_repos))
    }

    async fn current_profile(
        Extension(deps): Extension<D>,
        token: Token,
    ) -> DcResult<Json<OwnedProfile>> {
        Ok(Json(deps.fetch_current_profile(token).await?))
    }

    async fn create_or_update(
        Extension(deps): Extension<D>,
        token: Token,
        Json(form): Json<ProfileForm>,
    ) -> DcResult<Json<Profile>> {
        Ok(Json(deps.create_or_update(token, form).await?))
    }

    async fn list_profiles(Extension(deps): Extension<D>) -> DcResult<Json<Vec<OwnedProfile>>> {
        Ok(Json(deps.list_profiles().await?))
    }

    async fn user_profile(
        Extension(deps): Extension<D>,
        Path(user_id): Path<String>,
    ) -> DcResult<Json<OwnedProfile>> {
        // A malformed id can't belong to any profile.
        let owner: UserId = user_id.parse().map_err(|_| DcError::ProfileNotFound)?;

        Ok(Json(deps.fetch_profile(owner).await?))
    }

    async fn delete_account(
        Extension(deps): Extension<D>,
        token: Token,
    ) -> DcResult<Json<MessageBody>> {
        deps.delete_account(token).await?;

        Ok(Json(MessageBody {
            msg: "User deleted".to_string(),
        }))
    }

    async fn github_repos(
        Extension(deps): Extension<D>,
        Path(username): Path<String>,
    ) -> DcResult<Json<serde_json::Value>> {
        Ok(Json(deps.fetch_github_repos(&username).await?))
    }
}
