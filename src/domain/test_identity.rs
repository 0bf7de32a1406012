use rand::Rng;
use rand::distributions::Uniform;
use secrecy::Secret;

const USERNAME_PREFIX: &str = "testuser_";
const USERNAME_SUFFIX_LENGTH: usize = 8;
const TEST_PASSWORD: &str = "password123";

/// The throwaway account a single run registers and logs in with.
///
/// The username carries a random suffix so that back-to-back runs against the
/// same server exercise the fresh-registration path (201) rather than the
/// already-exists path (400). The password is a fixed constant and is wrapped
/// in `Secret` so it never leaks into the printed report.
#[derive(Debug)]
pub struct TestIdentity {
    username: String,
    password: Secret<String>,
}

impl TestIdentity {
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let lowercase = Uniform::new_inclusive(b'a', b'z');
        let suffix: String = (0..USERNAME_SUFFIX_LENGTH)
            .map(|_| rng.sample(lowercase) as char)
            .collect();
        Self {
            username: format!("{USERNAME_PREFIX}{suffix}"),
            password: Secret::new(TEST_PASSWORD.to_string()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &Secret<String> {
        &self.password
    }

    /// Redacted rendition of the credentials payload for failure records.
    pub fn describe_request(&self) -> String {
        format!(
            r#"{{"username": "{}", "password": "<redacted>"}}"#,
            self.username
        )
    }
}
