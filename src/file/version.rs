use core::fmt;

/// The FL Studio release that saved a project, e.g. `20.8.4.2576`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Version {
    /// Major release
    pub major: u16,
    /// Minor release
    pub minor: u16,
    /// Patch release
    pub patch: u16,
    /// Build number, missing in old files
    pub build: Option<u32>,
}

impl Version {
    /// Parse a dotted version string.
    ///
    /// Missing minor and patch parts count as zero.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.trim().split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().map_or(Some(0), |p| p.parse().ok())?;
        let patch = parts.next().map_or(Some(0), |p| p.parse().ok())?;
        let build = match parts.next() {
            Some(p) => Some(p.parse().ok()?),
            None => None,
        };
        Some(Self {
            major,
            minor,
            patch,
            build,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(build) = self.build {
            write!(f, ".{build}")?;
        }
        Ok(())
    }
}

#[test]
fn parse_versions() {
    use pretty_assertions::assert_eq;
    assert_eq!(
        Version::parse("20.8.4.2576"),
        Some(Version {
            major: 20,
            minor: 8,
            patch: 4,
            build: Some(2576)
        })
    );
    assert_eq!(
        Version::parse("9"),
        Some(Version {
            major: 9,
            minor: 0,
            patch: 0,
            build: None
        })
    );
    assert_eq!(Version::parse("beta"), None);
    assert_eq!(Version::parse("12.x"), None);
}

#[test]
fn versions_order_numerically() {
    let old = Version::parse("11.4.0").unwrap();
    let new = Version::parse("11.10.0").unwrap();
    assert!(old < new);
}
