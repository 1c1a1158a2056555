use crate::param::{parse_param, Param};
use clap::Parser;
use std::{fmt, iter};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Top level help, shown when no subcommand is given.
pub const USAGE: &str = "\
Manage application secrets stored in the vault.

USAGE:
    smcli <SUBCOMMAND> [FLAGS]

SUBCOMMANDS:
    read      Print the username, password and parameters of an application
    upsert    Create or update the secret of an application
    delete    Remove the secret of an application

Run `smcli <SUBCOMMAND> --help` for the flags of a subcommand.";

/// Print the secret stored for an application.
#[derive(Parser, Debug)]
#[clap(name = "read", bin_name = "smcli read")]
pub struct ReadCommand {
    /// Application name
    #[clap(long)]
    pub application: String,
}

/// Create or update the secret of an application.
///
/// Username and password are only replaced when a non-empty value is given.
/// Parameters are merged by key into the stored ones.
#[derive(Parser, Zeroize, ZeroizeOnDrop)]
#[clap(name = "upsert", bin_name = "smcli upsert")]
pub struct UpsertCommand {
    /// Application name
    #[clap(long)]
    #[zeroize(skip)]
    pub application: String,

    /// Application username
    #[clap(long, default_value = "", allow_hyphen_values = true)]
    pub username: String,

    /// Application password
    #[clap(long, default_value = "", allow_hyphen_values = true)]
    pub password: String,

    /// Read the password from the terminal instead
    #[clap(long, conflicts_with = "password")]
    #[zeroize(skip)]
    pub prompt_password: bool,

    /// Application parameter, format key:value or key=value (repeatable)
    #[clap(
        long = "parameter",
        value_name = "KEY:VALUE",
        value_parser = parse_param,
        allow_hyphen_values = true
    )]
    #[zeroize(skip)]
    pub parameters: Vec<Param>,
}

impl fmt::Debug for UpsertCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpsertCommand")
            .field("application", &self.application)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("prompt_password", &self.prompt_password)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// Remove the secret of an application.
#[derive(Parser, Debug)]
#[clap(name = "delete", bin_name = "smcli delete")]
pub struct DeleteCommand {
    /// Application name
    #[clap(long)]
    pub application: String,
}

/// The subcommands known to the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKind {
    Read,
    Upsert,
    Delete,
}

impl CommandKind {
    pub const ALL: [CommandKind; 3] = [Self::Read, Self::Upsert, Self::Delete];

    pub fn name(self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Upsert => "upsert",
            Self::Delete => "delete",
        }
    }

    /// Match `token` against the subcommand names, ignoring case.
    pub fn resolve(token: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(token))
    }

    /// Parse the flags following the subcommand token into a [`Command`].
    pub fn init(self, args: &[String]) -> Result<Command, clap::Error> {
        let args = iter::once(self.name().to_owned()).chain(args.iter().cloned());
        Ok(match self {
            Self::Read => Command::Read(ReadCommand::try_parse_from(args)?),
            Self::Upsert => Command::Upsert(UpsertCommand::try_parse_from(args)?),
            Self::Delete => Command::Delete(DeleteCommand::try_parse_from(args)?),
        })
    }
}

#[derive(Debug)]
pub enum Command {
    Read(ReadCommand),
    Upsert(UpsertCommand),
    Delete(DeleteCommand),
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Read(_) => CommandKind::Read,
            Self::Upsert(_) => CommandKind::Upsert,
            Self::Delete(_) => CommandKind::Delete,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn application(&self) -> &str {
        match self {
            Self::Read(read) => &read.application,
            Self::Upsert(upsert) => &upsert.application,
            Self::Delete(delete) => &delete.application,
        }
    }
}
