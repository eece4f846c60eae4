use crate::error::{DcError, DcResult};

use entrait::entrait_export as entrait;

#[entrait(GithubApiImpl, delegate_by = DelegateGithubApi, mock_api=GithubApiMock)]
pub trait GithubApi {
    /// The most recently created public repositories of `username`,
    /// as returned by GitHub. `None` when GitHub did not answer with success.
    async fn latest_repos(&self, username: &str) -> DcResult<Option<serde_json::Value>>;
}

#[entrait(pub FetchGithubRepos, mock_api=FetchGithubReposMock)]
async fn fetch_github_repos(deps: &impl GithubApi, username: &str) -> DcResult<serde_json::Value> {
    deps.latest_repos(username)
        .await?
        .ok_or(DcError::GithubProfileNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    use assert_matches::*;
    use unimock::*;

    #[tokio::test]
    async fn repos_should_be_relayed() {
        let deps = Unimock::new(
            GithubApiMock::latest_repos
                .next_call(matching!("octocat"))
                .answers(&|_, _| Ok(Some(serde_json::json!([{ "name": "hello-world" }])))),
        );

        let repos = fetch_github_repos(&deps, "octocat").await.unwrap();

        assert_eq!(serde_json::json!([{ "name": "hello-world" }]), repos);
    }

    #[tokio::test]
    async fn unknown_github_user_should_be_not_found() {
        let deps = Unimock::new(
            GithubApiMock::latest_repos
                .next_call(matching!("nobody"))
                .answers(&|_, _| Ok(None)),
        );

        assert_matches!(
            fetch_github_repos(&deps, "nobody").await,
            Err(DcError::GithubProfileNotFound)
        );
    }
}
