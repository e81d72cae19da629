//! Project and toolchain detection adapters.

mod project;
mod version;

pub use project::ManifestProjectDetector;
pub use version::{CommandRunner, CommandVersionDetector, SystemCommandRunner};

/// First `major` or `major.minor` number in `text`.
///
/// `"^20.1.0"` → `20` / `20.1`; `">=3.11,<4"` → `3` / `3.11`.
pub(crate) fn leading_version(text: &str, with_minor: bool) -> Option<String> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];

    let major_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
    let major = &rest[..major_len];
    if !with_minor {
        return Some(major.to_string());
    }

    let after = rest[major_len..].strip_prefix('.')?;
    let minor_len = after.find(|c: char| !c.is_ascii_digit()).unwrap_or(after.len());
    if minor_len == 0 {
        return None;
    }
    Some(format!("{major}.{}", &after[..minor_len]))
}

/// `"17"` → `17`; the legacy `"1.8"` scheme → `8`.
pub(crate) fn java_major(version: &str) -> Option<String> {
    match version.trim().strip_prefix("1.") {
        Some(legacy) => leading_version(legacy, false),
        None => leading_version(version, false),
    }
}

#[cfg(test)]
mod tests {
    use super::{java_major, leading_version};

    #[test]
    fn extracts_major() {
        assert_eq!(leading_version(">=20.1.0", false).as_deref(), Some("20"));
        assert_eq!(leading_version("v22", false).as_deref(), Some("22"));
        assert_eq!(leading_version("latest", false), None);
    }

    #[test]
    fn extracts_major_minor() {
        assert_eq!(leading_version("^8.2", true).as_deref(), Some("8.2"));
        assert_eq!(leading_version(">=3.11,<4", true).as_deref(), Some("3.11"));
        assert_eq!(leading_version("go1.23.4", true).as_deref(), Some("1.23"));
        assert_eq!(leading_version("8", true), None);
    }

    #[test]
    fn java_version_schemes() {
        assert_eq!(java_major("1.8.0_392").as_deref(), Some("8"));
        assert_eq!(java_major("21.0.2").as_deref(), Some("21"));
    }
}
