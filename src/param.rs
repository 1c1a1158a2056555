use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParamError {
    #[error(r#"invalid key:value argument for parameter "{0}""#)]
    InvalidParameterFormat(String),
}

/// A single `key:value` pair given with `--parameter`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    /// Characters accepted between the key and the value.
    pub const SEPARATORS: [char; 4] = [':', ',', ';', '='];
}

/// Splits on every separator, so a key or value containing a second separator
/// is rejected even if the first split point would have been usable.
impl FromStr for Param {
    type Err = ParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(&Self::SEPARATORS[..]);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(key), Some(value), None) if !key.is_empty() && !value.is_empty() => Ok(Self {
                key: key.to_owned(),
                value: value.to_owned(),
            }),
            _ => Err(ParamError::InvalidParameterFormat(s.to_owned())),
        }
    }
}

/// Value parser for the repeatable `--parameter` flag.
pub fn parse_param(s: &str) -> Result<Param, ParamError> {
    s.parse()
}

#[cfg(test)]
mod test {
    use super::{parse_param, Param, ParamError};

    fn param(key: &str, value: &str) -> Param {
        Param {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    #[test]
    fn should_split_on_each_supported_separator() {
        for arg in ["env:prod", "env,prod", "env;prod", "env=prod"] {
            assert_eq!(parse_param(arg).unwrap(), param("env", "prod"), "{arg}");
        }
    }

    #[test]
    fn should_reject_argument_without_separator() {
        let result = parse_param("envprod");
        assert_eq!(
            result,
            Err(ParamError::InvalidParameterFormat("envprod".to_owned()))
        );
    }

    #[test]
    fn should_reject_a_second_separator_even_of_another_kind() {
        assert!(parse_param("url=http://host").is_err());
        assert!(parse_param("a:b:c").is_err());
        assert!(parse_param("a=b;c").is_err());
    }

    #[test]
    fn should_reject_empty_key_or_value() {
        assert!(parse_param("=value").is_err());
        assert!(parse_param("key:").is_err());
        assert!(parse_param(":").is_err());
        assert!(parse_param("").is_err());
    }

    #[test]
    fn should_keep_whitespace_as_given() {
        assert_eq!(parse_param("a b= c").unwrap(), param("a b", " c"));
    }

    #[test]
    fn error_message_should_name_the_argument() {
        let err = parse_param("broken").unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"invalid key:value argument for parameter "broken""#
        );
    }
}
