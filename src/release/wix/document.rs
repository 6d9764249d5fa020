//! Rendering of the harvested file tree into the installer manifest document.
//!
//! The document is produced in two stages. First the nested
//! `Directory`/`Component`/`File` tree and the matching `ComponentRef` list
//! are rendered into plain XML strings, walking the harvested tree in its
//! already-sorted order so the output is deterministic. Then those blocks and
//! the product metadata are substituted into [`WXS_TEMPLATE`].

use std::fmt::Write as _;

use serde::Serialize;

use crate::release::error::{Error, Result};
use crate::release::settings::{InstallerSettings, PackageSettings};
use crate::release::wix::harvest::HarvestedDir;
use crate::release::wix::ids::IdentifierAllocator;
use crate::release::wix::template::WXS_TEMPLATE;

/// Indentation of entries directly under the `INSTALLDIR` directory element.
const TREE_INDENT: usize = 10;

/// Scalar values handed to the template engine.
#[derive(Serialize)]
struct TemplateData {
    product_name: String,
    manufacturer: String,
    description: String,
    version: String,
    upgrade_code: String,
    program_files_id: &'static str,
    platform: &'static str,
    install_dir_name: String,
    ui_ref: String,
    homepage: Option<String>,
    icon: Option<String>,
    shortcut: Option<ShortcutData>,
    directory_tree: String,
    component_refs: String,
}

#[derive(Serialize)]
struct ShortcutData {
    guid: String,
    target: String,
}

/// Renders the manifest document for a harvested tree.
///
/// Component GUIDs and element ids are drawn from `allocator`, so rendering
/// the same tree against the same allocator state always yields the same
/// document. Fails if the allocator reports an identifier collision or the
/// template engine rejects the data.
///
/// # Arguments
///
/// * `tree` - Harvested payload tree rooted at the install folder
/// * `version` - Product version string placed in the `Product` element
/// * `package` - Product metadata (name, manufacturer, description)
/// * `installer` - Installer settings (upgrade code, UI, architecture)
/// * `allocator` - Identifier allocator shared with record persistence
pub fn render(
    tree: &HarvestedDir,
    version: &str,
    package: &PackageSettings,
    installer: &InstallerSettings,
    allocator: &mut IdentifierAllocator<'_>,
) -> Result<String> {
    let win64 = installer.program_files.win64();

    let mut directory_tree = String::new();
    let mut component_ids = Vec::new();
    render_children(
        tree,
        allocator,
        win64,
        TREE_INDENT,
        &mut directory_tree,
        &mut component_ids,
    )?;

    let mut component_refs = String::new();
    for id in &component_ids {
        let _ = writeln!(component_refs, "      <ComponentRef Id=\"{id}\" />");
    }

    let shortcut = match &installer.start_menu_shortcut {
        Some(target) => Some(ShortcutData {
            guid: allocator.assign_shortcut()?,
            target: escape_xml(target),
        }),
        None => None,
    };

    let description = installer_description(package);
    let install_dir_name = installer
        .install_dir_name
        .clone()
        .unwrap_or_else(|| package.product_name.clone());

    let data = TemplateData {
        product_name: escape_xml(&package.product_name),
        manufacturer: escape_xml(&package.manufacturer),
        description: escape_xml(&description),
        version: escape_xml(version),
        upgrade_code: installer.upgrade_code.to_string().to_uppercase(),
        program_files_id: installer.program_files.directory_id(),
        platform: installer.program_files.platform(),
        install_dir_name: escape_xml(&install_dir_name),
        ui_ref: escape_xml(&installer.ui_ref),
        homepage: package.homepage.as_deref().map(escape_xml),
        icon: installer
            .icon
            .as_ref()
            .map(|path| escape_xml(&path.display().to_string())),
        shortcut,
        directory_tree,
        component_refs,
    };

    let mut handlebars = handlebars::Handlebars::new();
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars
        .register_template_string("manifest.wxs", WXS_TEMPLATE)
        .map_err(|e| Error::Template(format!("failed to register manifest template: {e}")))?;
    handlebars
        .render("manifest.wxs", &data)
        .map_err(|e| Error::Template(format!("failed to render manifest template: {e}")))
}

fn installer_description(package: &PackageSettings) -> String {
    package
        .description
        .clone()
        .unwrap_or_else(|| package.product_name.clone())
}

/// Renders the files and subdirectories of `dir`, files first, both in the
/// sorted order the harvester produced.
fn render_children(
    dir: &HarvestedDir,
    allocator: &mut IdentifierAllocator<'_>,
    win64: bool,
    indent: usize,
    out: &mut String,
    component_ids: &mut Vec<String>,
) -> Result<()> {
    let pad = " ".repeat(indent);
    let win64_attr = if win64 { " Win64=\"yes\"" } else { "" };

    for file in &dir.files {
        let component_id = allocator.element_id("cmp", &file.rel_path);
        let file_id = allocator.element_id("fil", &file.rel_path);
        let guid = allocator.assign(&file.rel_path)?;
        let _ = writeln!(
            out,
            "{pad}<Component Id=\"{component_id}\" Guid=\"{guid}\"{win64_attr}>"
        );
        let _ = writeln!(
            out,
            "{pad}  <File Id=\"{file_id}\" Name=\"{name}\" Source=\"{source}\" KeyPath=\"yes\" />",
            name = escape_xml(&file.name),
            source = escape_xml(&file.source.display().to_string()),
        );
        let _ = writeln!(out, "{pad}</Component>");
        component_ids.push(component_id);
    }

    for sub in &dir.dirs {
        let directory_id = allocator.element_id("dir", &sub.rel_path);
        let _ = writeln!(
            out,
            "{pad}<Directory Id=\"{directory_id}\" Name=\"{name}\">",
            name = escape_xml(&sub.name),
        );
        render_children(sub, allocator, win64, indent + 2, out, component_ids)?;
        let _ = writeln!(out, "{pad}</Directory>");
    }

    Ok(())
}

/// Escapes the five XML special characters in an attribute or text value.
pub(crate) fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
