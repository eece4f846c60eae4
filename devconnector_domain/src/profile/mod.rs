pub mod form;
pub mod repo;

use crate::error::{DcError, DcResult};
use crate::user::auth::{Authenticate, Token};
use crate::user::UserId;
use form::ProfileForm;
use repo::ProfileRepo;

use entrait::entrait_export as entrait;
use time::OffsetDateTime;

#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct Social {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

/// Everything a profile holds apart from its owner.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct ProfileDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(rename = "githubusername", skip_serializing_if = "Option::is_none")]
    pub github_username: Option<String>,
    pub skills: Vec<String>,
    pub social: Social,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
}

/// A stored profile, referring to its owner by id.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct Profile {
    pub user: UserId,
    #[serde(flatten)]
    pub details: ProfileDetails,
}

/// The public part of the owning user that is shown alongside a profile.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct ProfileOwner {
    #[serde(rename = "_id")]
    pub id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// A profile with its owner joined in.
#[derive(serde::Deserialize, serde::Serialize, Clone, Debug, Eq, PartialEq)]
pub struct OwnedProfile {
    pub user: ProfileOwner,
    #[serde(flatten)]
    pub details: ProfileDetails,
}

/// Normalized partial update of a profile.
///
/// `None` means "leave the stored value alone". `social` is always present
/// and replaces the stored links as a whole.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileUpdate {
    pub owner: UserId,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
    pub skills: Option<Vec<String>>,
    pub social: Social,
}

#[entrait(pub CreateOrUpdate, mock_api=CreateOrUpdateMock)]
async fn create_or_update(
    deps: &(impl Authenticate + ProfileRepo),
    token: Token,
    form: ProfileForm,
) -> DcResult<Profile> {
    let owner = deps.authenticate(token)?;
    upsert_profile(deps, owner, form).await
}

/// Create the owner's profile, or overwrite the fields given in `form`
/// on the one that already exists.
pub async fn upsert_profile(
    deps: &impl ProfileRepo,
    owner: UserId,
    form: ProfileForm,
) -> DcResult<Profile> {
    form.validate()?;
    let update = form.normalize(owner);

    if deps.find_profile(owner).await?.is_some() {
        let profile = deps.update_profile(&update).await?;
        tracing::info!(%owner, "updated profile");
        Ok(profile)
    } else {
        let profile = deps.insert_profile(&update).await?;
        tracing::info!(%owner, "created profile");
        Ok(profile)
    }
}

#[entrait(pub FetchCurrentProfile, mock_api=FetchCurrentProfileMock)]
async fn fetch_current_profile(
    deps: &(impl Authenticate + ProfileRepo),
    token: Token,
) -> DcResult<OwnedProfile> {
    let owner = deps.authenticate(token)?;
    deps.find_profile_with_owner(owner)
        .await?
        .ok_or(DcError::NoProfileForUser)
}

#[entrait(pub FetchProfile, mock_api=FetchProfileMock)]
async fn fetch_profile(deps: &impl ProfileRepo, owner: UserId) -> DcResult<OwnedProfile> {
    deps.find_profile_with_owner(owner)
        .await?
        .ok_or(DcError::ProfileNotFound)
}

#[entrait(pub ListProfiles, mock_api=ListProfilesMock)]
async fn list_profiles(deps: &impl ProfileRepo) -> DcResult<Vec<OwnedProfile>> {
    deps.list_profiles_with_owner().await
}
