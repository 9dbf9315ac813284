//! `.csproj` rewriting.
//!
//! The project file is streamed through `quick-xml`: events are copied verbatim
//! except for the `ProjectReference` being added or removed, so unrelated
//! content and formatting survive untouched.

use crate::error::{LeanError, Result};
use crate::model::library::to_forward_slashes;
use log::debug;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::path::Path;

const PROJECT: &[u8] = b"Project";
const ITEM_GROUP: &[u8] = b"ItemGroup";
const PROJECT_REFERENCE: &[u8] = b"ProjectReference";

/// Adds and removes `<ProjectReference>` elements in C# project files.
#[derive(Debug, Default, Clone)]
pub struct XmlManager;

impl XmlManager {
    pub fn new() -> Self {
        Self
    }

    /// Adds a reference to `include` to the project file at `csproj`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the file was rewritten.
    /// * `Ok(false)` if an equivalent reference already existed.
    pub fn add_project_reference(&self, csproj: &Path, include: &str) -> Result<bool> {
        let text = fs::read_to_string(csproj)?;
        match insert_project_reference(&text, include).map_err(|reason| xml_error(csproj, reason))? {
            Some(updated) => {
                debug!("Adding ProjectReference {} to {}", include, csproj.display());
                fs::write(csproj, updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes the reference to `include` from the project file at `csproj`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` if the file was rewritten.
    /// * `Ok(false)` if no such reference existed.
    pub fn remove_project_reference(&self, csproj: &Path, include: &str) -> Result<bool> {
        let text = fs::read_to_string(csproj)?;
        match strip_project_reference(&text, include).map_err(|reason| xml_error(csproj, reason))? {
            Some(updated) => {
                debug!("Removing ProjectReference {} from {}", include, csproj.display());
                fs::write(csproj, updated)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether the project file at `csproj` references `include`.
    pub fn has_project_reference(&self, csproj: &Path, include: &str) -> Result<bool> {
        let text = fs::read_to_string(csproj)?;
        contains_reference(&text, include).map_err(|reason| xml_error(csproj, reason))
    }
}

fn xml_error(path: &Path, reason: String) -> LeanError {
    LeanError::Xml {
        path: path.to_path_buf(),
        reason,
    }
}

/// How an event relates to the reference being edited.
enum Kind {
    Whitespace,
    Reference,
    ReferenceStart,
    GroupStart,
    GroupEnd,
    ProjectEnd,
    Other,
}

fn classify(event: &Event, include: &str) -> Kind {
    match event {
        Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => Kind::Whitespace,
        Event::Empty(element) if is_reference_to(element, include) => Kind::Reference,
        Event::Start(element) if is_reference_to(element, include) => Kind::ReferenceStart,
        Event::Start(element) if element.name().as_ref() == ITEM_GROUP => Kind::GroupStart,
        Event::End(element) if element.name().as_ref() == ITEM_GROUP => Kind::GroupEnd,
        Event::End(element) if element.name().as_ref() == PROJECT => Kind::ProjectEnd,
        _ => Kind::Other,
    }
}

fn is_reference_to(element: &BytesStart, include: &str) -> bool {
    if element.name().as_ref() != PROJECT_REFERENCE {
        return false;
    }
    let wanted = normalize(include);
    element
        .attributes()
        .filter_map(|attribute| attribute.ok())
        .filter(|attribute| attribute.key.as_ref() == b"Include")
        .filter_map(|attribute| attribute.unescape_value().ok())
        .any(|value| normalize(&value) == wanted)
}

fn normalize(include: &str) -> String {
    to_forward_slashes(Path::new(include.trim()))
}

fn contains_reference(text: &str, include: &str) -> std::result::Result<bool, String> {
    let mut reader = Reader::from_str(text);
    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        match event {
            Event::Eof => return Ok(false),
            _ => {
                if matches!(classify(&event, include), Kind::Reference | Kind::ReferenceStart) {
                    return Ok(true);
                }
            }
        }
    }
}

/// Returns the document with a new item group referencing `include`, or `None`
/// if the reference is already present.
fn insert_project_reference(text: &str, include: &str) -> std::result::Result<Option<String>, String> {
    if contains_reference(text, include)? {
        return Ok(None);
    }

    let mut reader = Reader::from_str(text);
    let mut writer = Writer::new(Vec::new());
    let mut inserted = false;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?;
        if let Event::Eof = event {
            break;
        }
        if !inserted && matches!(classify(&event, include), Kind::ProjectEnd) {
            let reference = BytesStart::new("ProjectReference").with_attributes([("Include", include)]);
            let new_events = [
                Event::Text(BytesText::new("  ")),
                Event::Start(BytesStart::new("ItemGroup")),
                Event::Text(BytesText::new("\n    ")),
                Event::Empty(reference),
                Event::Text(BytesText::new("\n  ")),
                Event::End(BytesEnd::new("ItemGroup")),
                Event::Text(BytesText::new("\n")),
            ];
            for new_event in new_events {
                writer.write_event(new_event).map_err(|e| e.to_string())?;
            }
            inserted = true;
        }
        writer.write_event(event).map_err(|e| e.to_string())?;
    }

    if !inserted {
        return Err("no closing </Project> element found".to_string());
    }

    String::from_utf8(writer.into_inner())
        .map(Some)
        .map_err(|e| e.to_string())
}

/// Returns the document without references to `include`, or `None` if there were none.
///
/// Whitespace leading up to a removed element is dropped with it, and item groups
/// left without content are removed entirely.
fn strip_project_reference(text: &str, include: &str) -> std::result::Result<Option<String>, String> {
    let mut reader = Reader::from_str(text);
    let mut output: Vec<Event<'static>> = Vec::new();
    let mut pending_whitespace: Option<Event<'static>> = None;
    // Buffered events of the open item group and whether anything in it survives.
    let mut group: Option<(Vec<Event<'static>>, bool)> = None;
    let mut removed = false;

    loop {
        let event = reader.read_event().map_err(|e| e.to_string())?.into_owned();
        if let Event::Eof = event {
            break;
        }

        match classify(&event, include) {
            Kind::Whitespace => {
                if let Some(previous) = pending_whitespace.replace(event) {
                    emit(&mut output, &mut group, previous, false);
                }
            }
            Kind::Reference => {
                pending_whitespace = None;
                removed = true;
            }
            Kind::ReferenceStart => {
                pending_whitespace = None;
                removed = true;
                skip_element(&mut reader)?;
            }
            Kind::GroupStart if group.is_none() => {
                let mut buffered: Vec<Event<'static>> = pending_whitespace.take().into_iter().collect();
                buffered.push(event);
                group = Some((buffered, false));
            }
            Kind::GroupEnd if group.is_some() => {
                if let Some((mut buffered, keep)) = group.take() {
                    buffered.extend(pending_whitespace.take());
                    buffered.push(event);
                    if keep {
                        output.extend(buffered);
                    }
                }
            }
            _ => {
                if let Some(previous) = pending_whitespace.take() {
                    emit(&mut output, &mut group, previous, false);
                }
                emit(&mut output, &mut group, event, true);
            }
        }
    }

    if !removed {
        return Ok(None);
    }

    if let Some((buffered, _)) = group.take() {
        output.extend(buffered);
    }
    output.extend(pending_whitespace);

    let mut writer = Writer::new(Vec::new());
    for event in output {
        writer.write_event(event).map_err(|e| e.to_string())?;
    }
    String::from_utf8(writer.into_inner())
        .map(Some)
        .map_err(|e| e.to_string())
}

fn emit(
    output: &mut Vec<Event<'static>>,
    group: &mut Option<(Vec<Event<'static>>, bool)>,
    event: Event<'static>,
    is_content: bool,
) {
    match group {
        Some((buffered, keep)) => {
            *keep |= is_content;
            buffered.push(event);
        }
        None => output.push(event),
    }
}

/// Consumes events up to and including the end of an element whose start was just read.
fn skip_element(reader: &mut Reader<&[u8]>) -> std::result::Result<(), String> {
    let mut depth = 1usize;
    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    return Ok(());
                }
            }
            Event::Eof => return Err("unexpected end of document".to_string()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSPROJ: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>net6.0</TargetFramework>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="QuantConnect.Lean" Version="2.5.*" />
  </ItemGroup>
</Project>
"#;

    const INCLUDE: &str = "../Library/CSharp Library/CSharp Library.csproj";

    #[test]
    fn test_insert_adds_item_group_before_project_end() {
        let updated = insert_project_reference(CSPROJ, INCLUDE).unwrap().unwrap();

        assert!(updated.contains(
            "  <ItemGroup>\n    <ProjectReference Include=\"../Library/CSharp Library/CSharp Library.csproj\"/>\n  </ItemGroup>\n</Project>"
        ));
        assert!(updated.contains("<PackageReference Include=\"QuantConnect.Lean\" Version=\"2.5.*\" />"));
        assert!(contains_reference(&updated, INCLUDE).unwrap());
    }

    #[test]
    fn test_insert_is_idempotent() {
        let updated = insert_project_reference(CSPROJ, INCLUDE).unwrap().unwrap();
        assert_eq!(insert_project_reference(&updated, INCLUDE).unwrap(), None);
    }

    #[test]
    fn test_existing_reference_with_backslashes_is_recognised() {
        let windows = CSPROJ.replace(
            "</Project>",
            "  <ItemGroup>\n    <ProjectReference Include=\"..\\Library\\CSharp Library\\CSharp Library.csproj\" />\n  </ItemGroup>\n</Project>",
        );
        assert_eq!(insert_project_reference(&windows, INCLUDE).unwrap(), None);

        let stripped = strip_project_reference(&windows, INCLUDE).unwrap().unwrap();
        assert_eq!(stripped, CSPROJ);
    }

    #[test]
    fn test_strip_restores_original_document() {
        let updated = insert_project_reference(CSPROJ, INCLUDE).unwrap().unwrap();
        let stripped = strip_project_reference(&updated, INCLUDE).unwrap().unwrap();
        assert_eq!(stripped, CSPROJ);
    }

    #[test]
    fn test_strip_absent_reference_is_none() {
        assert_eq!(strip_project_reference(CSPROJ, INCLUDE).unwrap(), None);
    }

    #[test]
    fn test_strip_keeps_other_items_in_group() {
        let shared = CSPROJ.replace(
            "    <PackageReference",
            "    <ProjectReference Include=\"../Other/Other.csproj\" />\n    <PackageReference",
        );
        let stripped = strip_project_reference(&shared, "../Other/Other.csproj")
            .unwrap()
            .unwrap();
        assert_eq!(stripped, CSPROJ);
    }

    #[test]
    fn test_strip_reference_with_children() {
        let nested = CSPROJ.replace(
            "    <PackageReference",
            "    <ProjectReference Include=\"../Other/Other.csproj\">\n      <Private>false</Private>\n    </ProjectReference>\n    <PackageReference",
        );
        let stripped = strip_project_reference(&nested, "../Other/Other.csproj")
            .unwrap()
            .unwrap();
        assert_eq!(stripped, CSPROJ);
    }

    #[test]
    fn test_insert_without_project_element_fails() {
        assert!(insert_project_reference("<Other></Other>", INCLUDE).is_err());
    }
}
