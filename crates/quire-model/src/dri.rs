//! Declaration reference identity.

use std::fmt;
use std::str::FromStr;

/// Structural identity of a documented declaration.
///
/// A `Dri` is stable across source sets and merges: the same logical
/// declaration compiled for several platforms carries equal identities.
/// Equality, hashing and ordering consider every field.
///
/// The string form is `package/classNames/callable/extra` with absent fields
/// rendered empty. It doubles as the in-page anchor of the declaration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Dri {
    package: Option<String>,
    class_names: Option<String>,
    callable: Option<String>,
    extra: Option<String>,
}

/// Error returned when a string is not a valid [`Dri`] string form.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid DRI '{0}': expected package/classNames/callable/extra")]
pub struct DriParseError(String);

impl Dri {
    /// Identity of a module.
    ///
    /// Modules have no package; the module name is stored in `extra` so that
    /// several modules in one run get distinct identities.
    #[must_use]
    pub fn for_module(name: &str) -> Self {
        Self {
            extra: Some(format!("module:{name}")),
            ..Self::default()
        }
    }

    /// Identity of a package (empty string for the root package).
    #[must_use]
    pub fn for_package(package: &str) -> Self {
        Self {
            package: Some(package.to_owned()),
            ..Self::default()
        }
    }

    /// Identity of a classlike. Nested classes use a dotted chain (`Outer.Inner`).
    #[must_use]
    pub fn for_classlike(package: &str, class_names: &str) -> Self {
        Self {
            package: Some(package.to_owned()),
            class_names: Some(class_names.to_owned()),
            ..Self::default()
        }
    }

    /// Identity of a callable or property nested under this identity.
    #[must_use]
    pub fn with_callable(mut self, signature: &str) -> Self {
        self.callable = Some(signature.to_owned());
        self
    }

    /// Attach an extra discriminator (e.g. enum entry marker).
    #[must_use]
    pub fn with_extra(mut self, extra: &str) -> Self {
        self.extra = Some(extra.to_owned());
        self
    }

    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    #[must_use]
    pub fn class_names(&self) -> Option<&str> {
        self.class_names.as_deref()
    }

    #[must_use]
    pub fn callable(&self) -> Option<&str> {
        self.callable.as_deref()
    }

    #[must_use]
    pub fn extra(&self) -> Option<&str> {
        self.extra.as_deref()
    }
}

impl fmt::Display for Dri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}",
            self.package.as_deref().unwrap_or_default(),
            self.class_names.as_deref().unwrap_or_default(),
            self.callable.as_deref().unwrap_or_default(),
            self.extra.as_deref().unwrap_or_default(),
        )
    }
}

impl FromStr for Dri {
    type Err = DriParseError;

    /// Parse the string form produced by `Display`.
    ///
    /// Empty fields parse as absent, except the package. Only module
    /// identities have no package, so an empty package is absent when `extra`
    /// is the only field present and denotes the root package otherwise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.splitn(4, '/');
        let (Some(package), Some(class_names), Some(callable), Some(extra)) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DriParseError(s.to_owned()));
        };

        let non_empty = |part: &str| (!part.is_empty()).then(|| part.to_owned());
        let module_only = class_names.is_empty() && callable.is_empty() && !extra.is_empty();
        let package = (!package.is_empty() || !module_only).then(|| package.to_owned());

        Ok(Self {
            package,
            class_names: non_empty(class_names),
            callable: non_empty(callable),
            extra: non_empty(extra),
        })
    }
}
