use entrait::entrait_export as entrait;

use crate::error::DcResult;
use crate::user::UserId;

#[entrait(PostRepoImpl, delegate_by = DelegatePostRepo, mock_api=PostRepoMock)]
pub trait PostRepo {
    /// Remove every post written by `author`, returning how many were removed.
    async fn delete_posts_by_author(&self, author: UserId) -> DcResult<u64>;
}
