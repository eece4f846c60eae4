use crate::error::DcResult;
use crate::post::PostRepo;
use crate::profile::repo::ProfileRepo;
use crate::user::auth::{Authenticate, Token};
use crate::user::repo::UserRepo;
use crate::user::UserId;

use entrait::entrait_export as entrait;

#[entrait(pub DeleteAccount, mock_api=DeleteAccountMock)]
async fn delete_account(
    deps: &(impl Authenticate + PostRepo + ProfileRepo + UserRepo),
    token: Token,
) -> DcResult<()> {
    let owner = deps.authenticate(token)?;
    delete_owner(deps, owner).await
}

/// Remove the owner's posts, then the profile, then the user account itself.
///
/// Stops at the first failing step, so the worst leftover is a set of
/// posts by a user that still exists.
pub async fn delete_owner(
    deps: &(impl PostRepo + ProfileRepo + UserRepo),
    owner: UserId,
) -> DcResult<()> {
    let posts = deps.delete_posts_by_author(owner).await?;
    let profile = deps.delete_profile(owner).await?;
    let user = deps.delete_user(owner).await?;

    tracing::info!(%owner, posts, profile, user, "deleted account");

    Ok(())
}
