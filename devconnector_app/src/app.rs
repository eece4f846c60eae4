use crate::config::Config;
use crate::github::{GetGithubClient, GithubClient, ReqwestGithubApi};
use devconnector_db::post::PgPostRepo;
use devconnector_db::profile::PgProfileRepo;
use devconnector_db::user::PgUserRepo;
use devconnector_db::{Db, GetDb};
use devconnector_domain::github::DelegateGithubApi;
use devconnector_domain::post::DelegatePostRepo;
use devconnector_domain::profile::repo::DelegateProfileRepo;
use devconnector_domain::user::repo::DelegateUserRepo;
use devconnector_domain::{GetConfig, System};

use std::sync::Arc;
use time::OffsetDateTime;

#[derive(Clone)]
pub struct App {
    pub config: Arc<Config>,
    pub db: Db,
    pub github: GithubClient,
}

impl System for App {
    fn get_current_time(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

impl GetConfig for App {
    fn get_jwt_signing_key(&self) -> &hmac::Hmac<sha2::Sha384> {
        &self.config.jwt_signing_key.0
    }
}

impl GetDb for App {
    fn get_db(&self) -> &Db {
        &self.db
    }
}

impl GetGithubClient for App {
    fn get_github_client(&self) -> &GithubClient {
        &self.github
    }
}

impl DelegateProfileRepo<Self> for App {
    type Target = PgProfileRepo;
}

impl DelegatePostRepo<Self> for App {
    type Target = PgPostRepo;
}

impl DelegateUserRepo<Self> for App {
    type Target = PgUserRepo;
}

impl DelegateGithubApi<Self> for App {
    type Target = ReqwestGithubApi;
}
