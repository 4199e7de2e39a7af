//! Binding flags and the default binding policy.
//!
//! [`BindingFlags`] is the matching-rule set every lookup runs with. Bit values follow the CLI
//! `System.Reflection.BindingFlags` numbering so flags read from configuration or logs line up
//! with what .NET tooling prints.
//!
//! When a caller does not pass flags, [`resolve_flags`] picks the defaults for the lookup's
//! [`BindingMode`]:
//!
//! | Mode                       | Defaults                                                       |
//! |----------------------------|----------------------------------------------------------------|
//! | [`BindingMode::NonStatic`] | `Instance, Public, NonPublic, IgnoreCase, FlattenHierarchy`    |
//! | [`BindingMode::Static`]    | `Static, Public, NonPublic, IgnoreCase, FlattenHierarchy`      |
//! | [`BindingMode::Generic`]   | `Instance, Static, Public, NonPublic, IgnoreCase, FlattenHierarchy` |
//!
//! Flags supplied by the caller are always used verbatim.
//!
//! # Examples
//!
//! ```rust
//! use dotreflect::{resolve_flags, BindingFlags, BindingMode};
//!
//! let defaults = resolve_flags(None, BindingMode::Static);
//! assert!(defaults.contains(BindingFlags::STATIC | BindingFlags::NON_PUBLIC));
//!
//! let explicit = BindingFlags::INSTANCE | BindingFlags::PUBLIC;
//! assert_eq!(resolve_flags(Some(explicit), BindingMode::Static), explicit);
//!
//! let parsed: BindingFlags = "Instance, Public, IgnoreCase".parse()?;
//! assert_eq!(parsed.to_string(), "IgnoreCase, Instance, Public");
//! # Ok::<(), dotreflect::Error>(())
//! ```

use std::{fmt, str::FromStr};

use bitflags::bitflags;
use strum::{Display, EnumIter};

use crate::{Error, Result};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    /// Flags controlling which members a lookup may match
    pub struct BindingFlags: u32 {
        /// Compare member names case-insensitively
        const IGNORE_CASE = 0x0001;
        /// Only consider members declared on the searched level itself
        const DECLARED_ONLY = 0x0002;
        /// Instance members are eligible
        const INSTANCE = 0x0004;
        /// Static members are eligible
        const STATIC = 0x0008;
        /// Public members are eligible
        const PUBLIC = 0x0010;
        /// Non-public (private, family, assembly) members are eligible
        const NON_PUBLIC = 0x0020;
        /// Static members inherited from ancestors are reported by a level
        const FLATTEN_HIERARCHY = 0x0040;
        /// Properties are surfaced for reading
        const GET_PROPERTY = 0x1000;
        /// Properties are surfaced for writing
        const SET_PROPERTY = 0x2000;
    }
}

/// Display names of the individual flags, in bit order.
const FLAG_NAMES: [(BindingFlags, &str); 9] = [
    (BindingFlags::IGNORE_CASE, "IgnoreCase"),
    (BindingFlags::DECLARED_ONLY, "DeclaredOnly"),
    (BindingFlags::INSTANCE, "Instance"),
    (BindingFlags::STATIC, "Static"),
    (BindingFlags::PUBLIC, "Public"),
    (BindingFlags::NON_PUBLIC, "NonPublic"),
    (BindingFlags::FLATTEN_HIERARCHY, "FlattenHierarchy"),
    (BindingFlags::GET_PROPERTY, "GetProperty"),
    (BindingFlags::SET_PROPERTY, "SetProperty"),
];

impl BindingFlags {
    /// Returns `true` if a member with the given scope and visibility is eligible under
    /// these flags.
    #[must_use]
    pub fn admits(self, is_static: bool, is_public: bool) -> bool {
        let scope = if is_static {
            BindingFlags::STATIC
        } else {
            BindingFlags::INSTANCE
        };
        let visibility = if is_public {
            BindingFlags::PUBLIC
        } else {
            BindingFlags::NON_PUBLIC
        };

        self.contains(scope | visibility)
    }

    /// Compares a declared member name against a requested one, honoring
    /// [`BindingFlags::IGNORE_CASE`].
    #[must_use]
    pub fn name_matches(self, declared: &str, requested: &str) -> bool {
        if declared == requested {
            return true;
        }

        if !self.contains(BindingFlags::IGNORE_CASE) {
            return false;
        }

        if declared.is_ascii() && requested.is_ascii() {
            return declared.eq_ignore_ascii_case(requested);
        }

        declared
            .chars()
            .flat_map(char::to_lowercase)
            .eq(requested.chars().flat_map(char::to_lowercase))
    }
}

impl fmt::Display for BindingFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Default");
        }

        let mut first = true;
        for (flag, name) in FLAG_NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }

        Ok(())
    }
}

impl FromStr for BindingFlags {
    type Err = Error;

    /// Parses a comma or `|` separated list of flag names, case-insensitively. Accepts both the
    /// display names (`NonPublic`) and the constant names (`NON_PUBLIC`).
    fn from_str(s: &str) -> Result<Self> {
        let mut flags = BindingFlags::empty();

        for part in s.split([',', '|']) {
            let part = part.trim();
            if part.is_empty() || part.eq_ignore_ascii_case("Default") {
                continue;
            }

            let normalized: String = part.chars().filter(|c| *c != '_').collect();
            let Some((flag, _)) = FLAG_NAMES
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(&normalized))
            else {
                return Err(Error::InvalidFlags(part.to_string()));
            };

            flags |= *flag;
        }

        Ok(flags)
    }
}

/// Which defaults apply when a lookup is started without explicit flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BindingMode {
    /// Lookups on an object for instance members
    NonStatic,
    /// Lookups for static members, through an object or a type
    Static,
    /// Lookups that accept instance and static members alike
    Generic,
}

/// The default flags per [`BindingMode`].
///
/// [`BindingPolicy::DEFAULT`] is the policy every operation of this crate applies to `None`
/// flags. A custom policy can be resolved up front and its result passed as explicit flags.
///
/// ```rust
/// use dotreflect::{BindingFlags, BindingMode, BindingPolicy};
///
/// let strict = BindingPolicy {
///     non_static: BindingFlags::INSTANCE | BindingFlags::PUBLIC,
///     ..BindingPolicy::DEFAULT
/// };
/// let flags = strict.resolve(None, BindingMode::NonStatic);
/// assert!(!flags.contains(BindingFlags::IGNORE_CASE));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingPolicy {
    /// Defaults for [`BindingMode::NonStatic`]
    pub non_static: BindingFlags,
    /// Defaults for [`BindingMode::Static`]
    pub static_: BindingFlags,
    /// Defaults for [`BindingMode::Generic`]
    pub generic: BindingFlags,
}

const COMMON_DEFAULTS: BindingFlags = BindingFlags::FLATTEN_HIERARCHY
    .union(BindingFlags::PUBLIC)
    .union(BindingFlags::NON_PUBLIC)
    .union(BindingFlags::IGNORE_CASE);

impl BindingPolicy {
    /// The policy applied when no flags are passed to an operation
    pub const DEFAULT: BindingPolicy = BindingPolicy {
        non_static: COMMON_DEFAULTS.union(BindingFlags::INSTANCE),
        static_: COMMON_DEFAULTS.union(BindingFlags::STATIC),
        generic: COMMON_DEFAULTS
            .union(BindingFlags::INSTANCE)
            .union(BindingFlags::STATIC),
    };

    /// The default flags of this policy for `mode`
    #[must_use]
    pub fn defaults(&self, mode: BindingMode) -> BindingFlags {
        match mode {
            BindingMode::NonStatic => self.non_static,
            BindingMode::Static => self.static_,
            BindingMode::Generic => self.generic,
        }
    }

    /// Returns `explicit` unchanged if present, the defaults for `mode` otherwise
    #[must_use]
    pub fn resolve(&self, explicit: Option<BindingFlags>, mode: BindingMode) -> BindingFlags {
        explicit.unwrap_or_else(|| self.defaults(mode))
    }
}

impl Default for BindingPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Resolves `explicit` against [`BindingPolicy::DEFAULT`].
#[must_use]
pub fn resolve_flags(explicit: Option<BindingFlags>, mode: BindingMode) -> BindingFlags {
    BindingPolicy::DEFAULT.resolve(explicit, mode)
}
