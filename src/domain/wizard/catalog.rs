//! Configuration catalog.
//!
//! Closed table of deployment variants (board + software stack) with the
//! canonical location of their debug-unlock integration files.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::platform::Platform;

/// Directory name every integration path ends in.
pub const INTEGRATION_DIR: &str = "debug_unlock";

/// Placeholder path for variants that are not in the catalog.
pub const GENERIC_PATH_TEMPLATE: &str = "integration/<board>/<stack>/debug_unlock";

/// Named deployment configuration of the target platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    S32gLinux,
    S32gAutosar,
    RcarLinux,
    AurixAutosar,
    Generic,
}

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub variant: Variant,
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub platform: Option<Platform>,
}

static CATALOG: [CatalogEntry; 5] = [
    CatalogEntry {
        variant: Variant::S32gLinux,
        id: "s32g-linux",
        name: "S32G / Linux",
        description: "NXP S32G gateway running embedded Linux (POSIX shared memory)",
        path: "platform/s32g/linux/debug_unlock",
        platform: Some(Platform::Posix),
    },
    CatalogEntry {
        variant: Variant::S32gAutosar,
        id: "s32g-autosar",
        name: "S32G / Classic AUTOSAR",
        description: "NXP S32G real-time cores running a Classic AUTOSAR stack",
        path: "platform/s32g/autosar/debug_unlock",
        platform: Some(Platform::Autosar),
    },
    CatalogEntry {
        variant: Variant::RcarLinux,
        id: "rcar-linux",
        name: "R-Car / Linux",
        description: "Renesas R-Car SoC running embedded Linux",
        path: "platform/rcar/linux/debug_unlock",
        platform: Some(Platform::Posix),
    },
    CatalogEntry {
        variant: Variant::AurixAutosar,
        id: "aurix-autosar",
        name: "AURIX TC3xx / Classic AUTOSAR",
        description: "Infineon AURIX TC3xx microcontroller with Classic AUTOSAR BSW",
        path: "platform/aurix/autosar/debug_unlock",
        platform: Some(Platform::Autosar),
    },
    CatalogEntry {
        variant: Variant::Generic,
        id: "generic",
        name: "Generic / unknown",
        description: "Any other board; files go to a placeholder path you adapt later",
        path: GENERIC_PATH_TEMPLATE,
        platform: None,
    },
];

impl Variant {
    /// Returns all variants in menu order.
    pub fn all() -> &'static [Variant] {
        &[
            Variant::S32gLinux,
            Variant::S32gAutosar,
            Variant::RcarLinux,
            Variant::AurixAutosar,
            Variant::Generic,
        ]
    }

    /// Returns this variant's catalog row.
    pub fn entry(&self) -> &'static CatalogEntry {
        let idx = self.menu_index() - 1;
        &CATALOG[idx]
    }

    /// Returns the 1-based position in the selection menu.
    pub fn menu_index(&self) -> usize {
        match self {
            Variant::S32gLinux => 1,
            Variant::S32gAutosar => 2,
            Variant::RcarLinux => 3,
            Variant::AurixAutosar => 4,
            Variant::Generic => 5,
        }
    }

    /// Returns the stable identifier.
    pub fn id(&self) -> &'static str {
        self.entry().id
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        self.entry().name
    }

    /// Returns the human-readable description.
    pub fn description(&self) -> &'static str {
        self.entry().description
    }

    /// Returns the platform this variant runs, if fixed.
    pub fn platform(&self) -> Option<Platform> {
        self.entry().platform
    }

    /// Returns true for the catch-all variant.
    pub fn is_generic(&self) -> bool {
        matches!(self, Variant::Generic)
    }

    /// Matches a user's menu reply: a 1-based index, an id, or a display name.
    pub fn parse_selection(input: &str) -> Option<Variant> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(index) = input.parse::<usize>() {
            return Variant::all().get(index.checked_sub(1)?).copied();
        }

        Variant::all().iter().copied().find(|variant| {
            variant.id().eq_ignore_ascii_case(input)
                || variant.display_name().eq_ignore_ascii_case(input)
        })
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Resolves the canonical integration path for a variant.
///
/// Total over the closed set; the generic variant yields the placeholder
/// template.
pub fn resolve(variant: Variant) -> String {
    variant.entry().path.to_string()
}

/// Placeholder path used when integrating directly for a platform.
pub fn generic_path_for(platform: Platform) -> String {
    GENERIC_PATH_TEMPLATE.replace("<stack>", platform.as_str())
}

/// Glob matching files already present under any integration path.
pub fn existing_integration_pattern() -> String {
    format!("**/{}/**", INTEGRATION_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod resolve {
        use super::*;

        #[test]
        fn every_variant_has_a_non_empty_path() {
            for variant in Variant::all() {
                let path = resolve(*variant);
                assert!(!path.is_empty(), "{:?} resolved to an empty path", variant);
                assert!(path.ends_with(INTEGRATION_DIR));
            }
        }

        #[test]
        fn generic_variant_resolves_to_template() {
            assert_eq!(resolve(Variant::Generic), GENERIC_PATH_TEMPLATE);
        }

        #[test]
        fn generic_path_for_platform_fills_stack() {
            assert_eq!(
                generic_path_for(Platform::Posix),
                "integration/<board>/posix/debug_unlock"
            );
        }
    }

    mod entries {
        use super::*;

        #[test]
        fn entry_lookup_matches_variant() {
            for variant in Variant::all() {
                assert_eq!(variant.entry().variant, *variant);
            }
        }

        #[test]
        fn menu_indexes_are_one_based_and_ordered() {
            for (i, variant) in Variant::all().iter().enumerate() {
                assert_eq!(variant.menu_index(), i + 1);
            }
        }

        #[test]
        fn only_generic_has_no_platform() {
            for variant in Variant::all() {
                assert_eq!(variant.platform().is_none(), variant.is_generic());
            }
        }
    }

    mod parse_selection {
        use super::*;

        #[test]
        fn accepts_index() {
            assert_eq!(Variant::parse_selection("3"), Some(Variant::RcarLinux));
            assert_eq!(Variant::parse_selection(" 5 "), Some(Variant::Generic));
        }

        #[test]
        fn rejects_out_of_range_index() {
            assert_eq!(Variant::parse_selection("0"), None);
            assert_eq!(Variant::parse_selection("6"), None);
        }

        #[test]
        fn accepts_id_and_name_case_insensitively() {
            assert_eq!(Variant::parse_selection("S32G-LINUX"), Some(Variant::S32gLinux));
            assert_eq!(
                Variant::parse_selection("aurix tc3xx / classic autosar"),
                Some(Variant::AurixAutosar)
            );
        }

        #[test]
        fn rejects_unknown_text() {
            assert_eq!(Variant::parse_selection(""), None);
            assert_eq!(Variant::parse_selection("raspberry"), None);
        }
    }
}
