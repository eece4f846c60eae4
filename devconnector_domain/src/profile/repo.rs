use entrait::entrait_export as entrait;

use super::{OwnedProfile, Profile, ProfileUpdate};
use crate::error::DcResult;
use crate::user::UserId;

#[entrait(ProfileRepoImpl, delegate_by = DelegateProfileRepo, mock_api=ProfileRepoMock)]
pub trait ProfileRepo {
    async fn find_profile(&self, owner: UserId) -> DcResult<Option<Profile>>;

    /// Overwrite the fields present in `update` on the owner's existing profile,
    /// returning the profile as it is after the update.
    async fn update_profile(&self, update: &ProfileUpdate) -> DcResult<Profile>;

    /// Store a new profile built from `update`.
    ///
    /// Should a profile for the same owner appear concurrently, the storage
    /// applies `update` to it instead of creating a second one.
    async fn insert_profile(&self, update: &ProfileUpdate) -> DcResult<Profile>;

    async fn find_profile_with_owner(&self, owner: UserId) -> DcResult<Option<OwnedProfile>>;

    async fn list_profiles_with_owner(&self) -> DcResult<Vec<OwnedProfile>>;

    /// Returns whether a profile was actually removed.
    async fn delete_profile(&self, owner: UserId) -> DcResult<bool>;
}
