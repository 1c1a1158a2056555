use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Free-form key/value parameters attached to a [`Secret`].
pub type Parameters = BTreeMap<String, String>;

/// Credentials stored for one application. The username and password are
/// zeroed out when dropped.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    #[zeroize(skip)]
    pub application: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[zeroize(skip)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Parameters>,
}

impl Secret {
    pub fn new<S: Into<String>>(application: S, username: S, password: S) -> Self {
        Self {
            application: application.into(),
            username: username.into(),
            password: password.into(),
            parameters: None,
        }
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("application", &self.application)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// [`String`] whose memory is zeroed out when dropped.
#[derive(Clone, ZeroizeOnDrop)]
pub struct ZeroizedString(String);

impl ZeroizedString {
    pub fn new(inner: String) -> Self {
        Self(inner)
    }
}

impl AsRef<str> for ZeroizedString {
    fn as_ref(&self) -> &str {
        self.0.as_ref()
    }
}

/// Read a secret value from some interactive source.
pub trait SecretReader {
    fn read_secret(&self) -> anyhow::Result<ZeroizedString>;
}

pub struct StdinSecretReader;

impl SecretReader for StdinSecretReader {
    /// Read from the terminal without echoing back the characters.
    fn read_secret(&self) -> anyhow::Result<ZeroizedString> {
        let secret = rpassword::prompt_password("Password: ")
            .with_context(|| "failed to read password from the terminal")?;
        Ok(ZeroizedString::new(secret))
    }
}

#[cfg(test)]
mod test {
    use super::{Parameters, Secret};

    #[test]
    fn debug_output_should_not_contain_the_password() {
        let secret = Secret::new("app", "user", "hunter2");
        let debug = format!("{secret:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn unset_parameters_should_be_left_out_of_the_document() {
        let secret = Secret::new("app", "user", "pass");
        let json = serde_json::to_string(&secret).unwrap();
        assert_eq!(
            json,
            r#"{"application":"app","username":"user","password":"pass"}"#
        );
    }

    #[test]
    fn missing_fields_should_default_when_deserializing() {
        let secret: Secret = serde_json::from_str(r#"{"application":"app"}"#).unwrap();
        assert_eq!(secret, Secret::new("app", "", ""));
    }

    #[test]
    fn parameters_should_survive_serialization() {
        let mut secret = Secret::new("app", "user", "pass");
        secret.parameters = Some(Parameters::from([("env".to_owned(), "prod".to_owned())]));
        let json = serde_json::to_vec(&secret).unwrap();
        let decoded: Secret = serde_json::from_slice(&json).unwrap();
        assert_eq!(decoded, secret);
    }
}
