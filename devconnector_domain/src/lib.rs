pub mod account;
pub mod error;
pub mod github;
pub mod post;
pub mod profile;
pub mod user;

use entrait::entrait_export as entrait;

///
/// Mockable system abstraction
///
#[entrait(mock_api=SystemMock)]
pub trait System {
    fn get_current_time(&self) -> time::OffsetDateTime;
}

///
/// Mockable config accessor
///
#[entrait(mock_api=GetConfigMock)]
pub trait GetConfig {
    fn get_jwt_signing_key(&self) -> &hmac::Hmac<sha2::Sha384>;
}

/// Mock clauses shared by the unit tests of this and downstream crates.
#[doc(hidden)]
pub mod test {
    use super::*;
    use unimock::*;

    pub fn mock_system_and_config() -> impl Clause {
        use hmac::Mac;

        (
            SystemMock::get_current_time
                .each_call(matching!())
                .returns(time::OffsetDateTime::from_unix_timestamp(0).unwrap()),
            GetConfigMock::get_jwt_signing_key
                .each_call(matching!())
                .returns(
                    hmac::Hmac::<sha2::Sha384>::new_from_slice("foobar".as_bytes())
                        .expect("HMAC-SHA-384 can accept any key length"),
                ),
        )
    }
}
