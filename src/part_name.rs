//! Part name validation and the validated [`PartName`] value
//!
//! A part name is the absolute-rooted, relative-style path addressing a
//! part (a named stream) inside a package. Validation enforces the full
//! grammar: leading-slash shape, no fragments, canonical percent-escaping,
//! no `.`/`..` navigation, and the reserved relationship-part rules.
//! Successful validation yields an immutable [`PartName`] whose comparison
//! form and extension are derived lazily and cached inside the value.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use url::Url;

use crate::encoding::{canonical_escape, remove_dot_segments};
use crate::error::{Error, Result};

/// File extension (without the dot) of relationship parts
pub const RELATIONSHIP_EXTENSION: &str = "rels";

/// Reserved directory segment that holds relationship parts
pub const RELATIONSHIP_SEGMENT: &str = "_rels";

/// Part name of the package-level (root) relationship part
pub const ROOT_RELATIONSHIP_PART: &str = "/_rels/.rels";

// Upper-case forms matched against normalized names.
const RELS_SUFFIX_UPPER: &str = ".RELS";
const RELS_DOUBLE_SUFFIX_UPPER: &str = ".RELS.RELS";
const RELS_SEGMENT_UPPER: &str = "_RELS";
const ROOT_RELATIONSHIP_UPPER: &str = "/_RELS/.RELS";

/// A validated, immutable part name
///
/// The textual form (`as_str`) is always in canonical escaped form and keeps
/// the casing it was supplied with. Equality, ordering, and hashing all use
/// the case-folded comparison form, so `/Document.xml` and `/DOCUMENT.XML`
/// are the same part name while each keeps its own spelling.
#[derive(Debug)]
pub struct PartName {
    raw: String,
    is_relationship: bool,
    is_normalized: bool,
    normalized: OnceLock<String>,
    extension: OnceLock<String>,
}

/// What a relationship part describes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipSource {
    /// The relationship part describes the package itself
    Package,
    /// The relationship part describes another part
    Part(PartName),
}

impl PartName {
    fn from_raw(raw: String, is_relationship: bool, is_normalized: bool) -> Self {
        Self {
            raw,
            is_relationship,
            is_normalized,
            normalized: OnceLock::new(),
            extension: OnceLock::new(),
        }
    }

    /// Validate a candidate string as a part name
    ///
    /// The checks run in order and the first violated rule wins. An empty
    /// candidate (or the lone root `/`) fails with [`Error::PartNameEmpty`].
    ///
    /// # Example
    ///
    /// ```
    /// use pack_uri::PartName;
    ///
    /// let part = PartName::parse("/word/document.xml")?;
    /// assert_eq!(part.extension(), "xml");
    /// assert!(!part.is_relationship_part());
    /// # Ok::<(), pack_uri::Error>(())
    /// ```
    pub fn parse(candidate: &str) -> Result<Self> {
        match validate(candidate)? {
            Some(name) => Ok(name),
            None => Err(Error::PartNameEmpty),
        }
    }

    /// Non-throwing probe: `Some` for a valid part name, `None` otherwise
    ///
    /// Useful when checking speculatively whether an already-built path
    /// happens to be a valid part name, without surfacing the failure kind.
    pub fn try_parse(candidate: &str) -> Option<Self> {
        Self::parse(candidate).ok()
    }

    /// The canonical escaped text of this part name, casing preserved
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The case-folded form used for equality and ordering
    ///
    /// Never used for storage or output; derived once and cached.
    pub fn normalized(&self) -> &str {
        self.normalized
            .get_or_init(|| self.raw.to_ascii_uppercase())
    }

    /// The extension after the final `.` of the last segment, without the
    /// dot; empty if the last segment has no `.`
    pub fn extension(&self) -> &str {
        self.extension.get_or_init(|| {
            let last = self.raw.rsplit('/').next().unwrap_or("");
            match last.rfind('.') {
                Some(pos) => last[pos + 1..].to_string(),
                None => String::new(),
            }
        })
    }

    /// Whether this name addresses a relationship part (`_rels/*.rels`)
    pub fn is_relationship_part(&self) -> bool {
        self.is_relationship
    }

    /// Whether the textual form is known to equal its own comparison form
    pub fn is_normalized(&self) -> bool {
        self.is_normalized
    }

    /// A part name whose textual form is the comparison form
    ///
    /// Compares equal to `self`; constructed without re-validation.
    pub fn to_normalized(&self) -> PartName {
        let upper = self.normalized().to_string();
        let name = PartName::from_raw(upper.clone(), self.is_relationship, true);
        let _ = name.normalized.set(upper);
        name
    }

    /// The root relationship part, `/_rels/.rels`
    pub fn root_relationship_part() -> PartName {
        PartName::from_raw(ROOT_RELATIONSHIP_PART.to_string(), true, false)
    }

    /// The relationship part that describes this part
    ///
    /// `/word/document.xml` maps to `/word/_rels/document.xml.rels`.
    /// Relationship parts have no relationship parts of their own; asking
    /// for one fails with [`Error::NestedRelationshipPart`].
    pub fn relationship_part(&self) -> Result<PartName> {
        if self.is_relationship {
            return Err(Error::NestedRelationshipPart(self.raw.clone()));
        }
        let file_start = self.raw.rfind('/').map(|pos| pos + 1).unwrap_or(0);
        let (dir, file) = self.raw.split_at(file_start);
        PartName::parse(&format!(
            "{dir}{RELATIONSHIP_SEGMENT}/{file}.{RELATIONSHIP_EXTENSION}"
        ))
    }

    /// The source a relationship part describes
    ///
    /// Returns `None` when this is not a relationship part (or the
    /// degenerate case where stripping `_rels/` and `.rels` leaves no
    /// nameable part). The root relationship part describes the package.
    pub fn relationship_source(&self) -> Option<RelationshipSource> {
        if !self.is_relationship {
            return None;
        }
        if self.normalized() == ROOT_RELATIONSHIP_UPPER {
            return Some(RelationshipSource::Package);
        }
        // "/word/_rels/document.xml.rels" -> "/word/" + "document.xml"
        let file_start = self.raw.rfind('/').map(|pos| pos + 1).unwrap_or(0);
        let dir = &self.raw[..file_start.max(1) - 1];
        let parent_end = dir.rfind('/').map(|pos| pos + 1).unwrap_or(0);
        let parent = &self.raw[..parent_end];
        let stem_len = self.raw.len() - file_start - RELS_SUFFIX_UPPER.len();
        let stem = &self.raw[file_start..file_start + stem_len];
        PartName::try_parse(&format!("{parent}{stem}")).map(RelationshipSource::Part)
    }

    /// Total order over optional part names, with `None` greater than any
    /// present value
    pub fn compare(a: Option<&PartName>, b: Option<&PartName>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Validate a candidate, distinguishing "no part name" from failure.
///
/// `Ok(None)` means the candidate safe-unescapes to nothing (empty or the
/// lone `/`); the composite-locator parser treats that as a whole-package
/// locator while [`PartName::parse`] reports it as an error.
pub(crate) fn validate(candidate: &str) -> Result<Option<PartName>> {
    if Url::parse(candidate).is_ok() {
        return Err(Error::PartNameIsAbsolute(candidate.to_string()));
    }
    let canonical = canonical_escape(candidate);
    if canonical.is_empty() || canonical == "/" {
        return Ok(None);
    }
    if !canonical.starts_with('/') {
        return Err(Error::MissingLeadingSlash(candidate.to_string()));
    }
    if canonical.starts_with("//") {
        return Err(Error::DoubleLeadingSlash(candidate.to_string()));
    }
    if canonical.ends_with('/') {
        return Err(Error::TrailingSlash(candidate.to_string()));
    }
    if canonical.contains('#') {
        return Err(Error::FragmentPresent(candidate.to_string()));
    }
    // Resolving against any fixed base and re-extracting the path keeps only
    // the path component and collapses dot segments. The result must
    // reproduce the original input exactly, up to ASCII case; otherwise the
    // input was ambiguously encoded or contained navigation.
    let path_only = match canonical.find('?') {
        Some(pos) => &canonical[..pos],
        None => canonical.as_str(),
    };
    let resolved = remove_dot_segments(path_only);
    if !resolved.eq_ignore_ascii_case(candidate) {
        return Err(Error::NotCanonical(candidate.to_string()));
    }
    let is_relationship = classify_relationship(&resolved.to_ascii_uppercase(), candidate)?;
    Ok(Some(PartName::from_raw(resolved, is_relationship, false)))
}

/// Relationship classification over the case-folded name.
///
/// A name qualifies iff it ends in `.rels` and either sits directly inside a
/// `_rels` segment (at least 3 segments counting the leading empty one) or
/// is exactly the root `/_rels/.rels`. A qualifying name with more than 3
/// segments whose last segment ends in the doubled `.rels.rels` and whose
/// third-from-last segment is also `_rels` is a relationship of a
/// relationship, which is illegal. The doubled-suffix condition is
/// intentionally narrow; ordinary `.rels` names under stacked `_rels`
/// segments do not trip it.
fn classify_relationship(normalized: &str, original: &str) -> Result<bool> {
    if !normalized.ends_with(RELS_SUFFIX_UPPER) {
        return Ok(false);
    }
    let segments: Vec<&str> = normalized.split('/').collect();
    let qualifies = (segments.len() >= 3 && segments[segments.len() - 2] == RELS_SEGMENT_UPPER)
        || normalized == ROOT_RELATIONSHIP_UPPER;
    if !qualifies {
        return Ok(false);
    }
    if segments.len() > 3
        && segments[segments.len() - 1].ends_with(RELS_DOUBLE_SUFFIX_UPPER)
        && segments[segments.len() - 3] == RELS_SEGMENT_UPPER
    {
        return Err(Error::NestedRelationshipPart(original.to_string()));
    }
    Ok(true)
}

impl Clone for PartName {
    fn clone(&self) -> Self {
        let clone = Self::from_raw(self.raw.clone(), self.is_relationship, self.is_normalized);
        if let Some(normalized) = self.normalized.get() {
            let _ = clone.normalized.set(normalized.clone());
        }
        if let Some(extension) = self.extension.get() {
            let _ = clone.extension.set(extension.clone());
        }
        clone
    }
}

impl PartialEq for PartName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for PartName {}

impl Ord for PartName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(other.normalized())
    }
}

impl PartialOrd for PartName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for PartName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl fmt::Display for PartName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for PartName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
