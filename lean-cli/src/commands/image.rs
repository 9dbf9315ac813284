use crate::error::Result;
use lean_core::OptionRegistry;
use std::io::Write;

/// `lean image`
///
/// `--version` builds a name from the default repository; otherwise the
/// `--image` override, the configured option and the default are tried in turn.
pub fn print(
    registry: &OptionRegistry,
    research: bool,
    version: Option<&str>,
    image: Option<&str>,
    out: &mut dyn Write,
) -> Result<()> {
    let name = match (version, research) {
        (Some(version), false) => OptionRegistry::engine_image_name_from_version(Some(version)),
        (Some(version), true) => OptionRegistry::research_image_name_from_version(Some(version)),
        (None, false) => registry.resolve_engine_image(image)?.to_string(),
        (None, true) => registry.resolve_research_image(image)?.to_string(),
    };
    writeln!(out, "{}", name)?;
    Ok(())
}
