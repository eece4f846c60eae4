use entrait::entrait_export as entrait;

use crate::error::DcResult;
use crate::user::UserId;

#[entrait(UserRepoImpl, delegate_by = DelegateUserRepo, mock_api=UserRepoMock)]
pub trait UserRepo {
    /// Remove the user account. Returns whether a user was actually removed.
    async fn delete_user(&self, user_id: UserId) -> DcResult<bool>;
}
