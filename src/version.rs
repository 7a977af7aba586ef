//! Semantic version tags: parsing, ordering, selection and bumping
//!
//! Tags are strictly `major.minor.patch` with non-negative integer
//! components. Anything else is unparsable and gets filtered out by the
//! selection step rather than failing the whole operation. Ordering is
//! numeric per component, never lexicographic.

use crate::error::{DrydockError, DrydockResult};
use clap::ValueEnum;
use std::fmt;

/// A release version as an ordered `(major, minor, patch)` triple.
///
/// The derived `Ord` compares major, then minor, then patch, each as an
/// integer, which is exactly the tag ordering this tool needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Which component of a version a release bumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VersionPart {
    /// Breaking release: minor and patch reset to zero
    Major,
    /// Feature release: patch resets to zero
    Minor,
    /// Fix release: only patch advances
    Patch,
}

impl Version {
    /// Create a version from its three components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a raw tag string into a version.
    ///
    /// Succeeds only for exactly three `.`-separated components, each a
    /// plain run of ASCII digits. Returns `None` for anything else;
    /// callers must not assume a version exists without checking.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = text.split('.');
        let major = parse_component(parts.next()?)?;
        let minor = parse_component(parts.next()?)?;
        let patch = parse_component(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(major, minor, patch))
    }

    /// Compute the next version after bumping `part`.
    ///
    /// The bumped component advances by one and every less significant
    /// component resets to zero; more significant components are kept.
    pub fn bumped(self, part: VersionPart) -> Self {
        match part {
            VersionPart::Major => Self::new(self.major + 1, 0, 0),
            VersionPart::Minor => Self::new(self.major, self.minor + 1, 0),
            VersionPart::Patch => Self::new(self.major, self.minor, self.patch + 1),
        }
    }
}

/// Strict component parse: non-empty, digits only, no sign or whitespace
fn parse_component(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl fmt::Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Select the highest parseable version among raw tag strings.
///
/// Malformed tags are dropped silently; only an entirely empty or
/// entirely malformed listing is reported, as [`DrydockError::NoValidTag`].
/// Duplicate maxima are fine, the returned version is unambiguous.
pub fn select_latest<'a, I>(tags: I) -> DrydockResult<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .filter_map(Version::parse)
        .max()
        .ok_or(DrydockError::NoValidTag)
}

/// Bump a raw tag string, re-validating it first.
///
/// Callers normally arrive here with a tag that already survived
/// [`select_latest`], but the tag travels as text in between, so it is
/// checked again and a malformed value fails with `InvalidCurrentTag`
/// instead of silently producing a bogus release number.
pub fn bump_tag(raw: &str, part: VersionPart) -> DrydockResult<Version> {
    let current = Version::parse(raw).ok_or_else(|| DrydockError::InvalidCurrentTag {
        tag: raw.to_string(),
    })?;
    Ok(current.bumped(part))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn parse_valid() {
        assert_eq!(Version::parse("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(Version::parse("0.0.0"), Some(Version::new(0, 0, 0)));
        assert_eq!(
            Version::parse("10.200.3000"),
            Some(Version::new(10, 200, 3000))
        );
    }

    #[test]
    fn parse_rejects_wrong_shape() {
        assert_eq!(Version::parse("0.0"), None);
        assert_eq!(Version::parse("1.2.3.4"), None);
        assert_eq!(Version::parse("1.2.x"), None);
        assert_eq!(Version::parse(""), None);
        assert_eq!(Version::parse("v1.2.3"), None);
        assert_eq!(Version::parse("1..3"), None);
        assert_eq!(Version::parse("1.2.-3"), None);
        assert_eq!(Version::parse("1.2.+3"), None);
        assert_eq!(Version::parse("1.2. 3"), None);
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        let a = Version::parse("1.1000.1").unwrap();
        let b = Version::parse("1.999.1").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Greater);
        assert!(Version::new(0, 0, 2) < Version::new(0, 0, 10));
    }

    #[test]
    fn display_roundtrip() {
        let v = Version::new(1, 1000, 3);
        assert_eq!(Version::parse(&v.to_string()), Some(v));
    }

    #[test]
    fn select_latest_picks_maximum() {
        let latest =
            select_latest(["1000.1.1", "999.1.1", "1.1000.1", "1.1.1000"]).unwrap();
        assert_eq!(latest, Version::new(1000, 1, 1));

        let latest = select_latest(["1.1.1", "1.1000.1", "1.999.1", "1.1.1000"]).unwrap();
        assert_eq!(latest, Version::new(1, 1000, 1));

        let latest = select_latest(["1.1.1", "1.1000.1", "1.1000.1000"]).unwrap();
        assert_eq!(latest, Version::new(1, 1000, 1000));
    }

    #[test]
    fn select_latest_filters_garbage() {
        let latest = select_latest(["junk", "1.2", "1.2.3", "not-a-tag"]).unwrap();
        assert_eq!(latest, Version::new(1, 2, 3));
    }

    #[test]
    fn select_latest_no_valid_tag() {
        assert!(matches!(
            select_latest([]),
            Err(DrydockError::NoValidTag)
        ));
        assert!(matches!(
            select_latest(["junk", "also junk"]),
            Err(DrydockError::NoValidTag)
        ));
    }

    #[test]
    fn select_latest_duplicate_maxima() {
        let latest = select_latest(["1.2.3", "1.2.3", "1.0.0"]).unwrap();
        assert_eq!(latest, Version::new(1, 2, 3));
    }

    #[test]
    fn bump_resets_less_significant() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bumped(VersionPart::Major), Version::new(2, 0, 0));
        assert_eq!(v.bumped(VersionPart::Minor), Version::new(1, 3, 0));
        assert_eq!(v.bumped(VersionPart::Patch), Version::new(1, 2, 4));
    }

    #[test]
    fn bump_tag_rechecks_input() {
        assert_eq!(
            bump_tag("1.2.3", VersionPart::Patch).unwrap(),
            Version::new(1, 2, 4)
        );
        assert!(matches!(
            bump_tag("1.2.x", VersionPart::Patch),
            Err(DrydockError::InvalidCurrentTag { .. })
        ));
    }

    proptest! {
        #[test]
        fn order_is_antisymmetric(
            a in (0u64..2000, 0u64..2000, 0u64..2000),
            b in (0u64..2000, 0u64..2000, 0u64..2000),
        ) {
            let va = Version::new(a.0, a.1, a.2);
            let vb = Version::new(b.0, b.1, b.2);
            match va.cmp(&vb) {
                Ordering::Less => prop_assert_eq!(vb.cmp(&va), Ordering::Greater),
                Ordering::Greater => prop_assert_eq!(vb.cmp(&va), Ordering::Less),
                Ordering::Equal => prop_assert_eq!(va, vb),
            }
        }

        #[test]
        fn order_is_transitive(
            a in (0u64..100, 0u64..100, 0u64..100),
            b in (0u64..100, 0u64..100, 0u64..100),
            c in (0u64..100, 0u64..100, 0u64..100),
        ) {
            let va = Version::new(a.0, a.1, a.2);
            let vb = Version::new(b.0, b.1, b.2);
            let vc = Version::new(c.0, c.1, c.2);
            if va <= vb && vb <= vc {
                prop_assert!(va <= vc);
            }
        }

        #[test]
        fn order_equals_itself(a in (0u64..2000, 0u64..2000, 0u64..2000)) {
            let v = Version::new(a.0, a.1, a.2);
            prop_assert_eq!(v.cmp(&v), Ordering::Equal);
        }

        #[test]
        fn parse_display_roundtrip(a in (0u64..10_000, 0u64..10_000, 0u64..10_000)) {
            let v = Version::new(a.0, a.1, a.2);
            prop_assert_eq!(Version::parse(&v.to_string()), Some(v));
        }

        #[test]
        fn bump_strictly_increases(
            a in (0u64..2000, 0u64..2000, 0u64..2000),
            part in prop::sample::select(vec![
                VersionPart::Major,
                VersionPart::Minor,
                VersionPart::Patch,
            ]),
        ) {
            let v = Version::new(a.0, a.1, a.2);
            prop_assert!(v.bumped(part) > v);
        }
    }
}
