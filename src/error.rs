//! Error types for pack URI and part name validation
//!
//! Every grammar violation is reported as its own enumerable variant so
//! callers can react to the exact rule that failed. Validation is
//! first-failure-wins: the first violated rule aborts with that one kind,
//! never an aggregate.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: composite-locator (pack URI) errors
//! - **E2xxx**: part-name grammar errors
//! - **E3xxx**: relationship-part classification errors

use thiserror::Error;

/// Result type for pack URI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing pack URIs or validating part names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The composite locator is not an absolute URI
    ///
    /// **Error Code**: E1001
    ///
    /// **Common Causes**:
    /// - A relative reference passed where a full `pack://` URI is expected
    /// - A package locator (the authority component) that is itself relative
    #[error("[E1001] Locator is not an absolute URI: {0}")]
    LocatorNotAbsolute(String),

    /// The locator's scheme is not the reserved `pack` scheme
    ///
    /// **Error Code**: E1002
    ///
    /// The scheme comparison is case-insensitive, so `PACK://...` is
    /// accepted; anything else (`http`, `file`, ...) is not.
    #[error("[E1002] Locator scheme must be 'pack', got '{0}'")]
    WrongScheme(String),

    /// The embedded package locator carries a fragment component
    ///
    /// **Error Code**: E1003
    ///
    /// A package locator addresses the container as a whole; a fragment on
    /// it would be unreachable once the locator is folded into the pack URI
    /// authority, so it is rejected outright.
    #[error("[E1003] Package locator must not contain a fragment: {0}")]
    InnerPackageLocatorHasFragment(String),

    /// The part name candidate is an absolute URI
    ///
    /// **Error Code**: E2001
    ///
    /// Part names are always package-relative paths; `http://...` or any
    /// other scheme-qualified text cannot name a part.
    #[error("[E2001] Part name must be a relative reference, got absolute URI: {0}")]
    PartNameIsAbsolute(String),

    /// The part name candidate is empty (or the lone root `/`)
    ///
    /// **Error Code**: E2002
    #[error("[E2002] Part name is empty")]
    PartNameEmpty,

    /// The part name does not start with `/`
    ///
    /// **Error Code**: E2003
    #[error("[E2003] Part name must start with '/': {0}")]
    MissingLeadingSlash(String),

    /// The part name starts with `//`
    ///
    /// **Error Code**: E2004
    ///
    /// A double-slash relative reference is a network-path reference when
    /// resolved, which can never address a part inside the package.
    #[error("[E2004] Part name must not start with '//': {0}")]
    DoubleLeadingSlash(String),

    /// The part name ends with `/`
    ///
    /// **Error Code**: E2005
    ///
    /// Parts are streams, not directories; a trailing slash names nothing.
    #[error("[E2005] Part name must not end with '/': {0}")]
    TrailingSlash(String),

    /// The part name contains a `#` fragment delimiter
    ///
    /// **Error Code**: E2006
    #[error("[E2006] Part name must not contain a fragment: {0}")]
    FragmentPresent(String),

    /// The part name is not in canonical escaped form
    ///
    /// **Error Code**: E2007
    ///
    /// **Common Causes**:
    /// - Percent-escapes for unreserved characters (`%41` instead of `A`)
    /// - Unescaped characters that require escaping (spaces, non-ASCII)
    /// - `.` or `..` navigation segments that resolution would collapse
    /// - A `?` query component, which a part name cannot carry
    ///
    /// Re-deriving the canonical escaped form must reproduce the input
    /// exactly (case-insensitively); any mismatch means the name is an
    /// ambiguous encoding and is rejected.
    #[error("[E2007] Part name is not canonically escaped or contains navigation segments: {0}")]
    NotCanonical(String),

    /// The part name addresses a relationship of a relationship part
    ///
    /// **Error Code**: E3001
    ///
    /// Relationship parts (`_rels/*.rels`) describe other parts; a
    /// relationship part describing another relationship part is forbidden
    /// by the packaging conventions.
    #[error("[E3001] Relationship parts cannot have relationships of their own: {0}")]
    NestedRelationshipPart(String),
}
