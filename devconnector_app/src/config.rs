#[derive(clap::Parser)]
pub struct Config {
    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env)]
    pub jwt_signing_key: JtwSigningKey,

    /// Address the HTTP server listens on.
    #[clap(long, env, default_value = "0.0.0.0:5000")]
    pub bind_addr: std::net::SocketAddr,

    #[clap(long, env, default_value = "https://api.github.com")]
    pub github_api_url: String,

    /// OAuth app credentials, raising GitHub's rate limit when present.
    #[clap(long, env)]
    pub github_client_id: Option<String>,

    #[clap(long, env)]
    pub github_secret: Option<String>,

    /// Timeout for calls to GitHub, in seconds.
    #[clap(long, env, default_value = "10")]
    pub github_timeout_secs: u64,
}

#[derive(Clone)]
pub struct JtwSigningKey(pub hmac::Hmac<sha2::Sha384>);

impl std::str::FromStr for JtwSigningKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use hmac::Mac;

        Ok(Self(
            hmac::Hmac::<sha2::Sha384>::new_from_slice(s.as_bytes())
                .map_err(|e| format!("Failed to parse hmac: {e:?}"))?,
        ))
    }
}
