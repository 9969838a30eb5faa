//! Version comparison between the CLI and library templates

use semver::Version;

/// Parse a version string, tolerating a leading `v`
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);
    Version::parse(cleaned).ok()
}

/// Compare the CLI version against the version a template was written for
///
/// Returns a warning when the CLI is older than the template. Versions that
/// do not parse are not compared.
pub fn check_compatibility(
    cli_version: &str,
    template_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version)?;
    let template_ver = parse_version(template_version)?;

    if cli_ver >= template_ver {
        return None;
    }

    Some(format!(
        "Template targets version {} but this CLI is {}. Update with: {}",
        template_ver, cli_ver, upgrade_command
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_older_than_template() {
        let warning = check_compatibility("0.1.0", "0.2.0", "cargo install react-lib --force");
        assert!(warning.unwrap().contains("0.2.0"));
    }

    #[test]
    fn test_cli_same_or_newer() {
        assert!(check_compatibility("0.1.0", "0.1.0", "upgrade").is_none());
        assert!(check_compatibility("0.2.0", "v0.1.0", "upgrade").is_none());
    }

    #[test]
    fn test_leading_v_is_accepted() {
        assert!(check_compatibility("v0.1.0", "v0.3.1", "upgrade").is_some());
    }

    #[test]
    fn test_invalid_versions_are_skipped() {
        assert!(check_compatibility("invalid", "0.1.0", "upgrade").is_none());
        assert!(check_compatibility("0.1.0", "next", "upgrade").is_none());
    }
}
