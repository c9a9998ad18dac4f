//! Stamps a version into .NET project files (`*.csproj` and friends).
//!
//! Only the `<Version>` element of the first `<PropertyGroup>` is touched; every
//! other XML event is written back as read.

use crate::error::{Result, ResultExt, VersionError};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::path::{Path, PathBuf};

const PROPERTY_GROUP: &[u8] = b"PropertyGroup";
const VERSION: &str = "Version";
const BOM: char = '\u{feff}';

/// Updates every project file matching `pattern`. Returns the files written.
///
/// # Errors
/// Returns an error for an invalid pattern or when a matched file cannot be updated
pub fn update_project_files(pattern: &str, version: &str) -> Result<Vec<PathBuf>> {
    log::info!("Updating .NET project files matching {pattern}");

    let mut updated = Vec::new();
    for entry in glob::glob(pattern)? {
        let path = entry?;
        update_project_file(&path, version)?;
        updated.push(path);
    }

    log::info!("Found {} projects", updated.len());
    Ok(updated)
}

/// # Errors
/// Returns an error when the file cannot be read, parsed or written, or has no `<PropertyGroup>`
pub fn update_project_file(path: &Path, version: &str) -> Result<()> {
    log::info!("{} -> {version}", path.display());

    let content =
        fs::read_to_string(path).with_context(|| format!("Reading {}", path.display()))?;
    let updated = set_version(&content, version)
        .with_context(|| format!("Parsing {}", path.display()))?
        .ok_or_else(|| {
            VersionError::ProjectFile(path.to_path_buf(), "no <PropertyGroup> element".into())
        })?;
    fs::write(path, updated).with_context(|| format!("Writing {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GroupState {
    Before,
    /// Inside the first property group; depth 1 is the group's own level
    Inside { depth: usize },
    Done,
}

/// Sets `<Version>` in the first `<PropertyGroup>`, adding the element when absent.
/// `Ok(None)` when the project has no property group.
///
/// # Errors
/// Returns an error when the content is not well-formed XML
pub fn set_version(content: &str, version: &str) -> Result<Option<String>> {
    let (bom, body) = match content.strip_prefix(BOM) {
        Some(body) => (Some(BOM), body),
        None => (None, content),
    };

    let mut reader = Reader::from_str(body);
    let mut writer = Writer::new(Vec::with_capacity(content.len() + version.len()));
    let mut state = GroupState::Before;
    let mut version_written = false;
    let mut skipping_old_value = false;
    // First whitespace inside the group, reused to indent an added element
    let mut child_indent: Option<BytesText> = None;
    // Whitespace held back so an added element lands before the closing tag's indentation
    let mut pending_text: Option<BytesText> = None;

    loop {
        let event = reader.read_event()?;
        if matches!(event, Event::Eof) {
            break;
        }

        match state {
            GroupState::Before => match event {
                Event::Start(start) if start.name().as_ref() == PROPERTY_GROUP => {
                    writer.write_event(Event::Start(start))?;
                    state = GroupState::Inside { depth: 1 };
                }
                Event::Empty(start) if start.name().as_ref() == PROPERTY_GROUP => {
                    let end = start.to_end().into_owned();
                    writer.write_event(Event::Start(start))?;
                    write_version_element(&mut writer, version)?;
                    writer.write_event(Event::End(end))?;
                    state = GroupState::Done;
                }
                other => writer.write_event(other)?,
            },
            GroupState::Inside { depth } if skipping_old_value => match event {
                Event::End(end) if depth == 2 => {
                    writer.write_event(Event::End(end))?;
                    skipping_old_value = false;
                    state = GroupState::Inside { depth: 1 };
                }
                Event::Start(_) => state = GroupState::Inside { depth: depth + 1 },
                Event::End(_) => state = GroupState::Inside { depth: depth - 1 },
                _ => {}
            },
            GroupState::Inside { depth: 1 } if matches!(event, Event::Text(_) | Event::End(_)) => {
                match event {
                    Event::Text(text) => {
                        if child_indent.is_none() {
                            child_indent = Some(text.clone());
                        }
                        if let Some(previous) = pending_text.replace(text) {
                            writer.write_event(Event::Text(previous))?;
                        }
                    }
                    Event::End(end) => {
                        if !version_written {
                            if let Some(indent) = child_indent.take() {
                                writer.write_event(Event::Text(indent))?;
                            }
                            write_version_element(&mut writer, version)?;
                        }
                        if let Some(text) = pending_text.take() {
                            writer.write_event(Event::Text(text))?;
                        }
                        writer.write_event(Event::End(end))?;
                        state = GroupState::Done;
                    }
                    _ => {}
                }
            }
            GroupState::Inside { depth } => {
                if let Some(text) = pending_text.take() {
                    writer.write_event(Event::Text(text))?;
                }
                match event {
                    Event::Start(start) => {
                        let is_version = depth == 1 && start.name().as_ref() == VERSION.as_bytes();
                        writer.write_event(Event::Start(start))?;
                        if is_version {
                            writer.write_event(Event::Text(BytesText::new(version)))?;
                            version_written = true;
                            skipping_old_value = true;
                        }
                        state = GroupState::Inside { depth: depth + 1 };
                    }
                    Event::Empty(start)
                        if depth == 1 && start.name().as_ref() == VERSION.as_bytes() =>
                    {
                        write_version_element(&mut writer, version)?;
                        version_written = true;
                    }
                    Event::End(end) => {
                        writer.write_event(Event::End(end))?;
                        state = GroupState::Inside { depth: depth - 1 };
                    }
                    other => writer.write_event(other)?,
                }
            }
            GroupState::Done => writer.write_event(event)?,
        }
    }

    if state == GroupState::Before {
        return Ok(None);
    }

    let mut rendered = String::with_capacity(content.len() + version.len());
    rendered.extend(bom);
    rendered.push_str(&String::from_utf8_lossy(&writer.into_inner()));
    Ok(Some(rendered))
}

fn write_version_element(writer: &mut Writer<Vec<u8>>, version: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(VERSION)))?;
    writer.write_event(Event::Text(BytesText::new(version)))?;
    writer.write_event(Event::End(BytesEnd::new(VERSION)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">

  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
    <Version>0.0.1</Version>
  </PropertyGroup>

  <PropertyGroup Condition="'$(Configuration)'=='Release'">
    <Version>9.9.9</Version>
  </PropertyGroup>

</Project>
"#;

    fn stamp(content: &str, version: &str) -> String {
        set_version(content, version).unwrap().unwrap()
    }

    #[test]
    fn test_replaces_version_in_first_group_only() {
        let updated = stamp(PROJECT, "1.3.0-beta.12+abc");

        assert_eq!(updated, PROJECT.replace("0.0.1", "1.3.0-beta.12+abc"));
    }

    #[test]
    fn test_group_condition_with_slash_is_first_group() {
        let project = "<Project>\n  <PropertyGroup Condition=\"Exists('../common.props')\">\n    <Version>0.0.1</Version>\n  </PropertyGroup>\n  <PropertyGroup>\n    <Version>0.0.2</Version>\n  </PropertyGroup>\n</Project>\n";

        assert_eq!(stamp(project, "1.2.3"), project.replace("0.0.1", "1.2.3"));
    }

    #[test]
    fn test_commented_out_group_is_ignored() {
        let project = "<Project>\n  <!-- <PropertyGroup><Version>old</Version></PropertyGroup> -->\n  <PropertyGroup>\n    <Version>0.0.1</Version>\n  </PropertyGroup>\n</Project>\n";

        assert_eq!(stamp(project, "1.2.3"), project.replace("0.0.1", "1.2.3"));
    }

    #[test]
    fn test_adds_missing_version_with_group_indentation() {
        let project = "<Project>\n  <PropertyGroup>\n    <OutputType>Exe</OutputType>\n  </PropertyGroup>\n</Project>\n";
        assert_eq!(
            stamp(project, "1.2.3"),
            "<Project>\n  <PropertyGroup>\n    <OutputType>Exe</OutputType>\n    <Version>1.2.3</Version>\n  </PropertyGroup>\n</Project>\n"
        );
    }

    #[test]
    fn test_adds_version_to_inline_and_empty_groups() {
        assert_eq!(
            stamp("<Project><PropertyGroup></PropertyGroup></Project>", "1.0.0"),
            "<Project><PropertyGroup><Version>1.0.0</Version></PropertyGroup></Project>"
        );
        assert_eq!(
            stamp("<Project><PropertyGroup/></Project>", "1.0.0"),
            "<Project><PropertyGroup><Version>1.0.0</Version></PropertyGroup></Project>"
        );
    }

    #[test]
    fn test_replaces_self_closing_version() {
        assert_eq!(
            stamp("<Project><PropertyGroup><Version /></PropertyGroup></Project>", "2.0.0"),
            "<Project><PropertyGroup><Version>2.0.0</Version></PropertyGroup></Project>"
        );
    }

    #[test]
    fn test_version_text_is_escaped_and_bom_kept() {
        let updated = stamp("\u{feff}<Project><PropertyGroup /></Project>", "1.0.0-a&b");
        assert!(updated.starts_with('\u{feff}'));
        assert!(updated.contains("<Version>1.0.0-a&amp;b</Version>"));
    }

    #[test]
    fn test_project_without_property_group() {
        assert!(set_version("<Project><ItemGroup /></Project>", "1.0.0").unwrap().is_none());
    }

    #[test]
    fn test_malformed_project_is_an_error() {
        assert!(set_version("<Project><PropertyGroup></Project>", "1.0.0").is_err());
    }

    #[test]
    fn test_update_project_files_by_glob() {
        let dir = TempDir::new().unwrap();
        let app = dir.path().join("App.csproj");
        let lib = dir.path().join("Lib.csproj");
        fs::write(&app, PROJECT).unwrap();
        fs::write(&lib, "<Project><PropertyGroup></PropertyGroup></Project>").unwrap();
        fs::write(dir.path().join("notes.txt"), "<PropertyGroup></PropertyGroup>").unwrap();

        let pattern = format!("{}/*.csproj", dir.path().display());
        let mut updated = update_project_files(&pattern, "2.0.0+sha").unwrap();
        updated.sort();

        assert_eq!(updated, vec![app.clone(), lib.clone()]);
        assert!(fs::read_to_string(&lib).unwrap().contains("<Version>2.0.0+sha</Version>"));
        assert_eq!(
            fs::read_to_string(dir.path().join("notes.txt")).unwrap(),
            "<PropertyGroup></PropertyGroup>"
        );
    }

    #[test]
    fn test_update_file_without_group_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Empty.csproj");
        fs::write(&path, "<Project />").unwrap();

        assert!(matches!(
            update_project_file(&path, "1.0.0"),
            Err(VersionError::ProjectFile(..))
        ));
    }
}
