use crate::error::Result;
use dialoguer::{Input, Password};
use lean_core::{OptionRegistry, PathManager};
use log::info;
use std::io::Write;

/// Source of interactively entered credentials.
pub trait Prompt {
    fn input(&self, label: &str) -> Result<String>;
    fn secret(&self, label: &str) -> Result<String>;
}

/// Prompts on the attached terminal.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn input(&self, label: &str) -> Result<String> {
        Ok(Input::<String>::new().with_prompt(label).interact_text()?)
    }

    fn secret(&self, label: &str) -> Result<String> {
        Ok(Password::new().with_prompt(label).interact()?)
    }
}

/// `lean login`
///
/// Values not given on the command line are prompted for. Both values are
/// validated before either is written.
pub fn login(
    registry: &OptionRegistry,
    prompt: &dyn Prompt,
    user_id: Option<&str>,
    api_token: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    if user_id.is_none() || api_token.is_none() {
        writeln!(
            out,
            "Your user id and API token are needed to make authenticated requests to the API"
        )?;
        writeln!(
            out,
            "Both will be stored in {}",
            registry.user_id().storage().path().display()
        )?;
    }

    let user_id = match user_id {
        Some(value) => value.to_string(),
        None => prompt.input("User id")?,
    };
    let api_token = match api_token {
        Some(value) => value.to_string(),
        None => prompt.secret("API token")?,
    };

    let user_id = registry.user_id().validate(&user_id)?;
    let api_token = registry.api_token().validate(&api_token)?;
    registry.user_id().set_value(&user_id)?;
    registry.api_token().set_value(&api_token)?;
    info!("Stored credentials for user {}", user_id);

    writeln!(out, "Successfully logged in")?;
    Ok(())
}

/// `lean logout`
pub fn logout(paths: &PathManager, out: &mut dyn Write) -> Result<()> {
    paths.credentials_storage().clear()?;
    info!("Cleared {}", paths.credentials_file().display());
    writeln!(out, "Successfully logged out")?;
    Ok(())
}
