use crate::{config::ConfigError, exitcode, vault::VaultError};
use clap::ErrorKind;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("no subcommand given\n\n{0}")]
    Usage(&'static str),
    #[error(r#"unknown subcommand "{0}", expected one of read, upsert, delete"#)]
    UnknownSubcommand(String),
    #[error(transparent)]
    Arguments(#[from] clap::Error),
    #[error("{0:#}")]
    Terminal(anyhow::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not open vault --> {0}")]
    VaultOpen(#[source] VaultError),
    #[error("command {command} failed --> {source}")]
    Command {
        command: &'static str,
        #[source]
        source: VaultError,
    },
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_) | Self::UnknownSubcommand(_) => exitcode::USAGE,
            Self::Arguments(e) => match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => exitcode::OK,
                ErrorKind::ValueValidation => exitcode::DATAERR,
                _ => exitcode::USAGE,
            },
            Self::Terminal(_) => exitcode::IOERR,
            Self::Config(_) => exitcode::CONFIG,
            Self::VaultOpen(_) => exitcode::UNAVAILABLE,
            Self::Command { source, .. } => match source {
                VaultError::NotFound(_) => exitcode::NOINPUT,
                VaultError::InvalidName(_) => exitcode::DATAERR,
                _ => exitcode::IOERR,
            },
        }
    }
}

#[cfg(test)]
mod test {
    use super::Error;
    use crate::{cli::CommandKind, exitcode, vault::VaultError};

    #[test]
    fn not_found_should_map_to_noinput() {
        let err = Error::Command {
            command: "read",
            source: VaultError::NotFound("app".to_owned()),
        };
        assert_eq!(err.exit_code(), exitcode::NOINPUT);
        assert_eq!(
            err.to_string(),
            r#"command read failed --> The entry "app" does not exist!"#
        );
    }

    #[test]
    fn invalid_parameter_should_map_to_dataerr() {
        let args = ["--application", "a", "--parameter", "nope"].map(String::from);
        let err: Error = CommandKind::Upsert.init(&args).unwrap_err().into();
        assert_eq!(err.exit_code(), exitcode::DATAERR);
    }

    #[test]
    fn help_request_should_exit_successfully() {
        let err: Error = CommandKind::Read
            .init(&["--help".to_owned()])
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), exitcode::OK);
    }

    #[test]
    fn usage_errors_should_map_to_usage() {
        assert_eq!(Error::Usage("usage").exit_code(), exitcode::USAGE);
        assert_eq!(
            Error::UnknownSubcommand("list".to_owned()).exit_code(),
            exitcode::USAGE
        );
    }
}
