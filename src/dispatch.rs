use crate::{
    cli::{Command, CommandKind, USAGE},
    error::{Error, Result},
    handle::{handle, Handler, HandlerResult},
    secrets::SecretReader,
    vault::Vault,
};
use tracing::debug;

const HELP_TOKENS: [&str; 3] = ["help", "-h", "--help"];

/// Drives one invocation: resolve the subcommand, parse its flags, then run
/// it between a single vault open and close.
pub struct Dispatcher<V, R> {
    vault: V,
    reader: R,
}

impl<V: Vault, R: SecretReader> Dispatcher<V, R> {
    pub fn new(vault: V, reader: R) -> Self {
        Self { vault, reader }
    }

    /// `args` are the process arguments without the program name.
    pub fn dispatch(&mut self, args: &[String]) -> Result<HandlerResult> {
        let (token, rest) = args.split_first().ok_or(Error::Usage(USAGE))?;
        if HELP_TOKENS.contains(&token.as_str()) {
            return Ok(HandlerResult::Usage);
        }
        let kind = CommandKind::resolve(token)
            .ok_or_else(|| Error::UnknownSubcommand(token.to_owned()))?;
        let mut command = kind.init(rest)?;
        self.read_prompted_password(&mut command)?;
        debug!(command = command.name(), application = command.application(), "dispatching");

        self.vault.open().map_err(Error::VaultOpen)?;
        let result = handle(&mut Handler::new(&mut self.vault), &command);
        self.vault.close();
        result.map_err(|source| Error::Command {
            command: command.name(),
            source,
        })
    }

    fn read_prompted_password(&self, command: &mut Command) -> Result<()> {
        if let Command::Upsert(upsert) = command {
            if upsert.prompt_password {
                let password = self.reader.read_secret().map_err(Error::Terminal)?;
                upsert.password = password.as_ref().to_owned();
            }
        }
        Ok(())
    }
}
