//! Function detection in header text.
//!
//! Detection is a substring heuristic behind the `FunctionMatcher` trait so a
//! real parser can replace it without touching the prober or the engine.

use once_cell::sync::Lazy;
use regex::Regex;

/// What an integration function is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionRole {
    MemoryAllocation,
    DatasetLoading,
}

/// A function name found in a file, tagged with its role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionMatch {
    pub role: FunctionRole,
    pub name: String,
}

/// Finds candidate integration functions in file contents.
pub trait FunctionMatcher: Send + Sync {
    /// Returns matches in order of appearance. Duplicates are allowed; the
    /// prober de-duplicates.
    fn scan(&self, contents: &str) -> Vec<FunctionMatch>;
}

/// Identifier directly followed by an opening parenthesis.
static CALLABLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)\s*\(").expect("callable pattern is valid")
});

const KEYWORDS: &[&str] = &["if", "for", "while", "switch", "return", "sizeof", "defined"];

/// AUTOSAR compiler-abstraction macros; their argument lists wrap the return
/// type, never the declared name.
const COMPILER_ABSTRACTIONS: &[&str] = &[
    "FUNC",
    "FUNC_P2VAR",
    "FUNC_P2CONST",
    "P2VAR",
    "P2CONST",
    "CONSTP2VAR",
    "CONSTP2CONST",
    "P2FUNC",
    "VAR",
    "CONST",
];

const DEFAULT_MEMORY_MARKERS: &[&str] = &["ShmM_Map", "SharedMem", "MemAlloc", "_Alloc", "Mem_Map", "mmap"];

const DEFAULT_DATASET_MARKERS: &[&str] = &["Dataset", "DataSet", "LoadData", "_Load", "NvM_Read", "Reader"];

/// Classifies a declared function by marker substrings in its name.
#[derive(Debug, Clone)]
pub struct MarkerMatcher {
    memory_markers: Vec<String>,
    dataset_markers: Vec<String>,
}

impl Default for MarkerMatcher {
    fn default() -> Self {
        Self::new(
            DEFAULT_MEMORY_MARKERS.iter().map(|m| m.to_string()).collect(),
            DEFAULT_DATASET_MARKERS.iter().map(|m| m.to_string()).collect(),
        )
    }
}

impl MarkerMatcher {
    pub fn new(memory_markers: Vec<String>, dataset_markers: Vec<String>) -> Self {
        Self {
            memory_markers,
            dataset_markers,
        }
    }

    fn declared_name(line: &str) -> Option<&str> {
        let trimmed = line.trim_start();
        if trimmed.starts_with("//") || trimmed.starts_with('*') || trimmed.starts_with("/*") {
            return None;
        }

        let mut rest = line;
        while let Some(caps) = CALLABLE.captures(rest) {
            let (whole, name) = (caps.get(0)?, caps.get(1)?.as_str());
            let after_paren = &rest[whole.end()..];

            if COMPILER_ABSTRACTIONS.contains(&name) {
                rest = Self::skip_group(after_paren)?;
            } else if KEYWORDS.contains(&name) {
                rest = after_paren;
            } else {
                return Some(name);
            }
        }
        None
    }

    /// Returns the text after the `)` closing an already-opened group.
    fn skip_group(text: &str) -> Option<&str> {
        let mut depth = 1usize;
        for (idx, ch) in text.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&text[idx + 1..]);
                    }
                }
                _ => {}
            }
        }
        None
    }
}

impl FunctionMatcher for MarkerMatcher {
    fn scan(&self, contents: &str) -> Vec<FunctionMatch> {
        let mut matches = Vec::new();

        for line in contents.lines() {
            let Some(name) = Self::declared_name(line) else {
                continue;
            };

            if self.memory_markers.iter().any(|m| name.contains(m.as_str())) {
                matches.push(FunctionMatch {
                    role: FunctionRole::MemoryAllocation,
                    name: name.to_string(),
                });
            }
            if self.dataset_markers.iter().any(|m| name.contains(m.as_str())) {
                matches.push(FunctionMatch {
                    role: FunctionRole::DatasetLoading,
                    name: name.to_string(),
                });
            }
        }

        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(matches: &[FunctionMatch], role: FunctionRole) -> Vec<&str> {
        matches
            .iter()
            .filter(|m| m.role == role)
            .map(|m| m.name.as_str())
            .collect()
    }

    #[test]
    fn finds_memory_and_dataset_declarations() {
        let header = "\
#ifndef SHMM_H
void* ShmM_MapOwner(uint32 size);
Std_ReturnType Calib_DatasetLoad(const char* path, void* dst);
int MyReader_Open(void);
";
        let matches = MarkerMatcher::default().scan(header);
        assert_eq!(names(&matches, FunctionRole::MemoryAllocation), vec!["ShmM_MapOwner"]);
        assert_eq!(
            names(&matches, FunctionRole::DatasetLoading),
            vec!["Calib_DatasetLoad", "MyReader_Open"]
        );
    }

    #[test]
    fn ignores_comments_and_keywords() {
        let source = "\
// void* ShmM_MapOwner(uint32 size);
 * Dataset_Load(path) is documented here
if (mmap(NULL, 4096) == NULL) {}
";
        let matches = MarkerMatcher::default().scan(source);
        assert_eq!(names(&matches, FunctionRole::MemoryAllocation), vec!["mmap"]);
        assert!(names(&matches, FunctionRole::DatasetLoading).is_empty());
    }

    #[test]
    fn sees_through_compiler_abstraction_macros() {
        let header = "\
FUNC(Std_ReturnType, NVM_CODE) NvM_ReadBlock(NvM_BlockIdType BlockId, P2VAR(void, AUTOMATIC, NVM_APPL_DATA) Dst);
FUNC(P2VAR(void, AUTOMATIC, SHMM_APPL_DATA), SHMM_CODE) ShmM_MapOwner(uint32 Size);
";
        let matches = MarkerMatcher::default().scan(header);
        assert_eq!(names(&matches, FunctionRole::MemoryAllocation), vec!["ShmM_MapOwner"]);
        assert_eq!(names(&matches, FunctionRole::DatasetLoading), vec!["NvM_ReadBlock"]);
    }

    #[test]
    fn unbalanced_macro_arguments_yield_nothing() {
        let matches = MarkerMatcher::default().scan("FUNC(P2VAR(void, AUTOMATIC, X) ShmM_MapOwner(void);");
        assert!(matches.is_empty());
    }

    #[test]
    fn custom_markers_replace_defaults() {
        let matcher = MarkerMatcher::new(vec!["Pool".to_string()], vec!["Fetch".to_string()]);
        let matches = matcher.scan("void* Pool_Get(void);\nint Cfg_Fetch(int id);\nvoid* ShmM_MapOwner(int);");
        assert_eq!(names(&matches, FunctionRole::MemoryAllocation), vec!["Pool_Get"]);
        assert_eq!(names(&matches, FunctionRole::DatasetLoading), vec!["Cfg_Fetch"]);
    }

    #[test]
    fn empty_input_has_no_matches() {
        assert!(MarkerMatcher::default().scan("").is_empty());
    }
}
