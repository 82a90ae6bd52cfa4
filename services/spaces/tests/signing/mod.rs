use spacesign_core::time::{parse_iso8601, DateTime};
use spacesign_spaces::{Credential, RequestSigner};

mod golden;
mod presigned;
mod properties;

pub const ACCESS_KEY: &str = "DO00EXAMPLEACCESSKEY";
pub const SECRET_KEY: &str = "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY";
pub const ENDPOINT: &str = "https://nyc3.digitaloceanspaces.com";

pub fn credential() -> Credential {
    Credential::new("nyc3", ACCESS_KEY, SECRET_KEY)
}

pub fn fixed_time() -> DateTime {
    parse_iso8601("20240101T000000Z").expect("time must be valid")
}

pub fn signer() -> RequestSigner {
    let _ = env_logger::builder().is_test(true).try_init();
    RequestSigner::new().with_time(fixed_time())
}
