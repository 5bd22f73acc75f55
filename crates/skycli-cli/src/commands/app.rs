//! App command implementation.

use std::io::Write;

use serde::Serialize;

use crate::cli::AppCommands;
use crate::context::CliContext;
use crate::error::CliError;
use crate::output::{OutputFormat, TableDisplay};

/// Handler for app subcommands.
pub struct AppCommand<'a> {
    context: &'a CliContext,
}

impl<'a> AppCommand<'a> {
    /// Creates a new app command handler.
    #[must_use]
    pub const fn new(context: &'a CliContext) -> Self {
        Self { context }
    }

    /// Executes the app subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if no app is selected.
    pub fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        command: &AppCommands,
    ) -> Result<(), CliError> {
        match command {
            AppCommands::Current => {
                let app = self.context.require_app()?;
                format.write(
                    out,
                    &AppInfo {
                        app: app.to_string(),
                    },
                )
            }
        }
    }
}

/// The app commands act on.
#[derive(Debug, Clone, Serialize)]
pub struct AppInfo {
    /// App name.
    pub app: String,
}

impl TableDisplay for AppInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{}", self.app)?;
        Ok(())
    }
}
