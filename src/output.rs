use crate::{cli::USAGE, handle::HandlerResult, secrets::Parameters};
use std::io::Write;

pub fn write_result<W: Write>(
    result: HandlerResult,
    mut output: TerminalOutput<W>,
) -> anyhow::Result<()> {
    match result {
        HandlerResult::Read(secret) => {
            output.write_line(&format!("Username -> {}", secret.username))?;
            output.write_line(&format!("Password -> {}", secret.password))?;
            output.write_line(&format!(
                "Params -> {}",
                format_parameters(secret.parameters.as_ref())
            ))
        }
        HandlerResult::Upsert | HandlerResult::Delete => Ok(()),
        HandlerResult::Usage => output.write_line(USAGE),
    }
}

/// Render parameters as `map[key:value ...]`, keys in sorted order.
pub fn format_parameters(parameters: Option<&Parameters>) -> String {
    let entries = parameters
        .into_iter()
        .flatten()
        .map(|(key, value)| format!("{key}:{value}"))
        .collect::<Vec<_>>();
    format!("map[{}]", entries.join(" "))
}

pub struct TerminalOutput<W> {
    writer: W,
}

impl<W: Write> TerminalOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_line(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{message}")?;
        Ok(())
    }
}
