use crate::{
    cli::{Command, DeleteCommand, ReadCommand, UpsertCommand},
    secrets::{Parameters, Secret},
    vault::{Vault, VaultError},
};
use tracing::{debug, info};

pub fn handle<V: Vault + ?Sized>(
    handler: &mut Handler<'_, V>,
    command: &Command,
) -> Result<HandlerResult, VaultError> {
    match command {
        Command::Read(read) => handler.read(read),
        Command::Upsert(upsert) => handler.upsert(upsert),
        Command::Delete(delete) => handler.delete(delete),
    }
}

#[derive(Debug)]
pub enum HandlerResult {
    Read(Secret),
    Upsert,
    Delete,
    Usage,
}

/// Runs commands against an already opened [`Vault`].
pub struct Handler<'a, V: ?Sized> {
    vault: &'a mut V,
}

impl<'a, V: Vault + ?Sized> Handler<'a, V> {
    pub fn new(vault: &'a mut V) -> Self {
        Self { vault }
    }

    pub fn read(&self, command: &ReadCommand) -> Result<HandlerResult, VaultError> {
        let secret = self.vault.read(&command.application)?;
        Ok(HandlerResult::Read(secret))
    }

    /// Read-modify-write of the application's secret. A missing entry is
    /// created; any other read failure aborts before anything is written.
    pub fn upsert(&mut self, command: &UpsertCommand) -> Result<HandlerResult, VaultError> {
        let existing = match self.vault.read(&command.application) {
            Ok(secret) => Some(secret),
            Err(VaultError::NotFound(_)) => {
                debug!(application = %command.application, "no stored secret, creating one");
                None
            }
            Err(e) => return Err(e),
        };
        let secret = merge(existing, command);
        self.vault.upsert(&secret)?;
        info!(
            application = %secret.application,
            parameters = command.parameters.len(),
            "secret upserted"
        );
        Ok(HandlerResult::Upsert)
    }

    pub fn delete(&mut self, command: &DeleteCommand) -> Result<HandlerResult, VaultError> {
        self.vault.delete(&command.application)?;
        info!(application = %command.application, "secret deleted");
        Ok(HandlerResult::Delete)
    }
}

/// Apply an upsert to the stored secret, if any.
///
/// Empty username/password leave stored values untouched. Parameters are
/// merged by key in command line order, so a later duplicate wins.
pub fn merge(existing: Option<Secret>, command: &UpsertCommand) -> Secret {
    let mut secret = match existing {
        Some(mut secret) => {
            if !command.username.is_empty() {
                secret.username = command.username.clone();
            }
            if !command.password.is_empty() {
                secret.password = command.password.clone();
            }
            secret
        }
        None => Secret::new(
            command.application.clone(),
            command.username.clone(),
            command.password.clone(),
        ),
    };
    if !command.parameters.is_empty() {
        let parameters = secret.parameters.get_or_insert_with(Parameters::new);
        for param in &command.parameters {
            parameters.insert(param.key.clone(), param.value.clone());
        }
    }
    secret
}
