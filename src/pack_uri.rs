//! Composite `pack://` locator parsing and composition
//!
//! A composite locator is an absolute URI of the reserved `pack` scheme that
//! names a package and, optionally, a part inside it:
//!
//! ```text
//! pack://<escaped-package-locator-with-comma-for-slash>[/part/path]
//! ```
//!
//! The package locator occupies the authority component: its text is
//! percent-escaped for `%`, `@`, `,` and `?` (in that order, `%` first) and
//! every `/` is then replaced by `,` so the whole URI fits in a single
//! authority. The part path, when present, is carried verbatim in its
//! canonical escaped form.
//!
//! The `pack` grammar is parsed by this module itself rather than through a
//! process-wide URI engine; only the embedded package locator goes through a
//! generic URI parser.

use std::fmt;
use std::str::FromStr;

use url::Url;
use urlencoding::decode;

use crate::error::{Error, Result};
use crate::part_name::{self, PartName};

/// Reserved scheme of composite package locators
pub const PACK_SCHEME: &str = "pack";

/// Check whether a locator text uses the reserved `pack` scheme
/// (case-insensitively)
pub fn is_pack_uri(uri: &str) -> bool {
    parse_scheme(uri).is_some_and(|scheme| scheme.eq_ignore_ascii_case(PACK_SCHEME))
}

/// A parsed composite locator: a package locator plus an optional part name
///
/// `part_name() == None` addresses the whole package. Values are immutable;
/// both components are validated at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackUri {
    package: Url,
    part: Option<PartName>,
}

impl PackUri {
    /// Decompose an absolute `pack://` URI into its components
    ///
    /// # Example
    ///
    /// ```
    /// use pack_uri::PackUri;
    ///
    /// let locator = PackUri::parse("pack://https:,,example.com,box/doc.xml")?;
    /// assert_eq!(locator.package_locator().as_str(), "https://example.com/box");
    /// assert_eq!(locator.part_name().unwrap().as_str(), "/doc.xml");
    /// # Ok::<(), pack_uri::Error>(())
    /// ```
    pub fn parse(uri: &str) -> Result<Self> {
        let scheme =
            parse_scheme(uri).ok_or_else(|| Error::LocatorNotAbsolute(uri.to_string()))?;
        if !scheme.eq_ignore_ascii_case(PACK_SCHEME) {
            return Err(Error::WrongScheme(scheme.to_string()));
        }
        let rest = uri[scheme.len()..]
            .strip_prefix("://")
            .ok_or_else(|| Error::LocatorNotAbsolute(uri.to_string()))?;
        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let package = decode_package_locator(&rest[..authority_end], uri)?;
        // The part path ends at any query or fragment on the outer locator.
        let tail = &rest[authority_end..];
        let path = match tail.find(['?', '#']) {
            Some(pos) => &tail[..pos],
            None => tail,
        };
        let part = part_name::validate(path)?;
        Ok(Self { package, part })
    }

    /// Compose a locator from a package locator and an optional part name
    ///
    /// The part name is already a validated value and is not re-checked; the
    /// package locator must not carry a fragment.
    pub fn new(package: Url, part: Option<PartName>) -> Result<Self> {
        if package.fragment().is_some() {
            return Err(Error::InnerPackageLocatorHasFragment(
                package.as_str().to_string(),
            ));
        }
        Ok(Self { package, part })
    }

    /// A locator addressing the whole package
    pub fn for_package(package: Url) -> Result<Self> {
        Self::new(package, None)
    }

    /// The locator of the package itself
    pub fn package_locator(&self) -> &Url {
        &self.package
    }

    /// The part addressed inside the package, if any
    pub fn part_name(&self) -> Option<&PartName> {
        self.part.as_ref()
    }

    /// Consume the locator, yielding its components
    pub fn into_parts(self) -> (Url, Option<PartName>) {
        (self.package, self.part)
    }

    /// The composite locator text, bit-exact per the wire format
    pub fn to_uri_string(&self) -> String {
        self.to_string()
    }
}

fn parse_scheme(uri: &str) -> Option<&str> {
    let colon = uri.find(':')?;
    let scheme = &uri[..colon];
    let mut chars = scheme.chars();
    if !chars.next()?.is_ascii_alphabetic() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        Some(scheme)
    } else {
        None
    }
}

/// Recover the package locator from the escaped authority component.
fn decode_package_locator(authority: &str, uri: &str) -> Result<Url> {
    let with_slashes = authority.replace(',', "/");
    let unescaped =
        decode(&with_slashes).map_err(|_| Error::LocatorNotAbsolute(uri.to_string()))?;
    let package = Url::parse(&unescaped)
        .map_err(|_| Error::LocatorNotAbsolute(unescaped.to_string()))?;
    if package.fragment().is_some() {
        return Err(Error::InnerPackageLocatorHasFragment(
            package.as_str().to_string(),
        ));
    }
    Ok(package)
}

// Escape order matters: '%' is handled first so escapes already present in
// the package locator are not double-escaped, and '/' is substituted last.
// The single pass below processes each character exactly once, which is
// equivalent to that ordering.
fn encode_package_locator(package: &str) -> String {
    let mut escaped = String::with_capacity(package.len());
    for c in package.chars() {
        match c {
            '%' => escaped.push_str("%25"),
            '@' => escaped.push_str("%40"),
            ',' => escaped.push_str("%2C"),
            '?' => escaped.push_str("%3F"),
            '/' => escaped.push(','),
            other => escaped.push(other),
        }
    }
    escaped
}

impl fmt::Display for PackUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{PACK_SCHEME}://{}",
            encode_package_locator(self.package.as_str())
        )?;
        if let Some(part) = &self.part {
            f.write_str(part.as_str())?;
        }
        Ok(())
    }
}

impl FromStr for PackUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
