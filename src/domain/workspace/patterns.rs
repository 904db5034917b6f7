//! Fixed probing tables: which paths and markers identify what.

use crate::domain::wizard::{Platform, Variant};

/// A workspace path glob that identifies a deployment variant.
#[derive(Debug, Clone, Copy)]
pub struct VariantPattern {
    pub glob: &'static str,
    pub variant: Variant,
}

/// Checked in order; the first glob with any match wins, so each
/// board-plus-stack pattern precedes its board-only fallback.
pub static VARIANT_PATTERNS: &[VariantPattern] = &[
    VariantPattern {
        glob: "**/s32g*/**/autosar/**",
        variant: Variant::S32gAutosar,
    },
    VariantPattern {
        glob: "**/s32g*/**",
        variant: Variant::S32gLinux,
    },
    VariantPattern {
        glob: "**/rcar*/**",
        variant: Variant::RcarLinux,
    },
    VariantPattern {
        glob: "**/aurix*/**",
        variant: Variant::AurixAutosar,
    },
    VariantPattern {
        glob: "**/tc3*/**",
        variant: Variant::AurixAutosar,
    },
];

/// Marker substrings per platform, AUTOSAR first because AUTOSAR sources
/// commonly include POSIX-looking code as well.
pub static PLATFORM_MARKERS: &[(Platform, &[&str])] = &[
    (
        Platform::Autosar,
        &["#include \"Rte_", "#include \"EcuM", "EcuM_Init", "SchM_", "Os_"],
    ),
    (
        Platform::Posix,
        &["#include <unistd.h>", "#include <pthread.h>", "pthread_create", "shm_open", "int main("],
    ),
];

/// Files most likely to reveal the platform.
pub static ENTRY_POINT_PATTERNS: &[&str] = &["**/main.c", "**/main.cpp", "**/*_main.c", "**/EcuM_Callout*.c"];

/// Files scanned for candidate function declarations.
pub static HEADER_PATTERNS: &[&str] = &["**/*.h", "**/*.hpp"];

/// Returns the first platform whose marker occurs in `contents`.
pub fn platform_from_markers(contents: &str) -> Option<Platform> {
    PLATFORM_MARKERS
        .iter()
        .find(|(_, markers)| markers.iter().any(|marker| contents.contains(marker)))
        .map(|(platform, _)| *platform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn autosar_markers_win_over_posix() {
        let source = "#include \"Rte_DebugUnlock.h\"\nint main(void) { return 0; }";
        assert_eq!(platform_from_markers(source), Some(Platform::Autosar));
    }

    #[test]
    fn posix_markers_detected() {
        let source = "#include <unistd.h>\nint main(int argc, char** argv) {}";
        assert_eq!(platform_from_markers(source), Some(Platform::Posix));
    }

    #[test]
    fn no_markers_no_platform() {
        assert_eq!(platform_from_markers("void helper(void);"), None);
    }

    #[test]
    fn specific_variant_patterns_precede_board_fallbacks() {
        let autosar = VARIANT_PATTERNS
            .iter()
            .position(|p| p.variant == Variant::S32gAutosar)
            .unwrap();
        let linux = VARIANT_PATTERNS
            .iter()
            .position(|p| p.variant == Variant::S32gLinux)
            .unwrap();
        assert!(autosar < linux);
    }

    #[test]
    fn variant_patterns_are_valid_globs() {
        for pattern in VARIANT_PATTERNS {
            assert!(glob::Pattern::new(pattern.glob).is_ok(), "{}", pattern.glob);
        }
        for pattern in ENTRY_POINT_PATTERNS.iter().chain(HEADER_PATTERNS) {
            assert!(glob::Pattern::new(pattern).is_ok(), "{}", pattern);
        }
    }
}
