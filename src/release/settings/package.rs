//! Product metadata.

/// Product metadata stamped into archives and installer manifests.
///
/// This typically maps from the `[package]` table of `frostpack.toml`.
///
/// # Examples
///
/// ```no_run
/// use frostpack::release::PackageSettings;
///
/// let settings = PackageSettings {
///     product_name: "Gizmo Studio".into(),
///     manufacturer: "Example Corp".into(),
///     description: Some("Profile editor for Gizmo hardware".into()),
///     homepage: None,
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackageSettings {
    /// Product name displayed to users.
    ///
    /// Shown in the installer UI and in Add/Remove Programs.
    pub product_name: String,

    /// Manufacturer/publisher name.
    ///
    /// Required by the installer toolchain; shown in package properties.
    pub manufacturer: String,

    /// Brief description of the application.
    ///
    /// Used for the installer package summary. Falls back to the product
    /// name when absent.
    pub description: Option<String>,

    /// Homepage URL for the application.
    ///
    /// Default: None
    pub homepage: Option<String>,
}

impl PackageSettings {
    /// Lowercase, underscore-separated form of the product name, used to
    /// name build artifacts (`gizmo_studio_1.2.3.zip`, `gizmo_studio.wxs`).
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.product_name.len());
        let mut last_was_sep = true;
        for ch in self.product_name.chars() {
            if ch.is_ascii_alphanumeric() {
                slug.push(ch.to_ascii_lowercase());
                last_was_sep = false;
            } else if !last_was_sep {
                slug.push('_');
                last_was_sep = true;
            }
        }
        while slug.ends_with('_') {
            slug.pop();
        }
        if slug.is_empty() { "app".to_string() } else { slug }
    }
}
