use crate::error::{CliError, Result};
use lean_core::{LeanError, OptionRegistry};
use log::info;
use std::io::Write;

const MASK_PREFIX_LEN: usize = 12;
const MASK_VISIBLE_CHARS: usize = 3;

/// `lean config set <key> <value>`
pub fn set(registry: &OptionRegistry, key: &str, value: &str, out: &mut dyn Write) -> Result<()> {
    let option = registry.get_option_by_key(key)?;
    option.set_value(value)?;
    info!("Stored option {} in {}", key, option.storage().path().display());

    if option.is_sensitive() {
        writeln!(out, "Successfully updated the value of '{}'", key)?;
    } else {
        let stored = option.get_value()?.unwrap_or_default();
        writeln!(out, "Successfully updated the value of '{}' to '{}'", key, stored)?;
    }
    Ok(())
}

/// `lean config get <key>`
pub fn get(registry: &OptionRegistry, key: &str, out: &mut dyn Write) -> Result<()> {
    let option = registry.get_option_by_key(key)?;
    if option.is_sensitive() {
        return Err(LeanError::SensitiveOption(key.to_string()).into());
    }
    match option.get_value()? {
        Some(value) => {
            writeln!(out, "{}", value)?;
            Ok(())
        }
        None => Err(CliError::OptionNotSet(key.to_string())),
    }
}

/// `lean config unset <key>`
pub fn unset(registry: &OptionRegistry, key: &str, out: &mut dyn Write) -> Result<()> {
    let option = registry.get_option_by_key(key)?;
    if option.unset()? {
        writeln!(out, "Successfully unset '{}'", key)?;
    } else {
        writeln!(out, "'{}' was not set", key)?;
    }
    Ok(())
}

/// `lean config list`
pub fn list(registry: &OptionRegistry, out: &mut dyn Write) -> Result<()> {
    let options = registry.options();
    let width = options.iter().map(|o| o.key().len()).max().unwrap_or(0);

    for option in options {
        let value = match option.get_value()? {
            Some(value) if option.is_sensitive() => mask(&value),
            Some(value) => value,
            None => "<not set>".to_string(),
        };
        writeln!(
            out,
            "{:<width$}  {:<20}  {}",
            option.key(),
            value,
            option.description(),
            width = width
        )?;
    }
    Ok(())
}

/// Hides all but the last few characters of a secret.
fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let stars = "*".repeat(MASK_PREFIX_LEN);
    if chars.len() <= MASK_VISIBLE_CHARS {
        return stars;
    }
    let visible: String = chars[chars.len() - MASK_VISIBLE_CHARS..].iter().collect();
    format!("{}{}", stars, visible)
}
