//! Authentication command implementation.
//!
//! Reports and forgets the credentials stored for the current context.

use std::io::Write;

use serde::Serialize;
use skycli_config::ConfigStore;

use crate::cli::AuthCommands;
use crate::context::CliContext;
use crate::error::CliError;
use crate::output::{Message, OutputFormat, TableDisplay};

/// Handler for auth subcommands.
pub struct AuthCommand<'a> {
    store: &'a mut ConfigStore,
    context: &'a CliContext,
}

impl<'a> AuthCommand<'a> {
    /// Creates a new auth command handler.
    #[must_use]
    pub fn new(store: &'a mut ConfigStore, context: &'a CliContext) -> Self {
        Self { store, context }
    }

    /// Executes the auth subcommand.
    ///
    /// # Errors
    ///
    /// Returns error if nobody is logged in or the config cannot be written.
    pub fn execute<W: Write>(
        &mut self,
        out: &mut W,
        format: &OutputFormat,
        command: &AuthCommands,
    ) -> Result<(), CliError> {
        match command {
            AuthCommands::Whoami => self.whoami(out, format),
            AuthCommands::Logout => self.logout(out, format),
        }
    }

    fn whoami<W: Write>(&self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let user = self.context.require_user()?;
        let info = WhoamiInfo {
            context: self.context.current_context.clone(),
            login_id: user.login_id().map(str::to_string),
            user_id: user.user_id().map(str::to_string),
        };

        format.write(out, &info)
    }

    fn logout<W: Write>(&mut self, out: &mut W, format: &OutputFormat) -> Result<(), CliError> {
        let user = self.context.require_user()?;
        let login_id = user.login_id().unwrap_or_default().to_string();
        let name = self.context.user_name.as_deref().ok_or_else(|| {
            CliError::Precondition("current context does not name a user".into())
        })?;

        let updated = self.store.config().delete_user(name);
        self.store.replace(updated);
        self.store.persist()?;

        let message = if login_id.is_empty() {
            "Successfully logged out.".to_string()
        } else {
            format!("Successfully logged out {login_id}.")
        };
        format.write(out, &Message::success(message))
    }
}

// Output types

/// Identity of the logged-in user.
#[derive(Debug, Clone, Serialize)]
pub struct WhoamiInfo {
    /// Context the credentials belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// Login id, usually an email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_id: Option<String>,
    /// User id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl TableDisplay for WhoamiInfo {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(
            writer,
            "Logged in as {}",
            self.login_id
                .as_deref()
                .or(self.user_id.as_deref())
                .unwrap_or("unknown user")
        )?;
        if let Some(ref user_id) = self.user_id {
            writeln!(writer, "User ID:   {user_id}")?;
        }
        if let Some(ref context) = self.context {
            writeln!(writer, "Context:   {context}")?;
        }
        Ok(())
    }
}
