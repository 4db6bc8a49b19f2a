use std::sync::LazyLock;

use regex::Regex;

/// Section-numbering patterns in priority order; the first match wins.
static SECTION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        // 第一章 (chapter, Chinese numeral)
        r"^第[一二三四五六七八九十百零]+章",
        // 第3章 (chapter, Arabic numeral)
        r"^第\d+章",
        // 1.2 / 1.2.3
        r"^\d+\.\d+(?:\.\d+)?",
        // 三、
        r"^[一二三四五六七八九十]+、",
        // 4、
        r"^\d+、",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("section pattern compiles"))
    .collect()
});

/// Return the section number at the very start of `text`, if any.
#[must_use]
pub fn extract_section_number(text: &str) -> Option<&str> {
    SECTION_PATTERNS
        .iter()
        .find_map(|re| re.find(text))
        .map(|m| m.as_str())
}

/// The section most recently seen while scanning a document top to bottom.
///
/// Owned by a single analysis run; a new run starts with an empty section.
#[derive(Debug, Clone, Default)]
pub struct SectionState {
    current: String,
}

impl SectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the current section if `text` starts with a section number.
    /// Leading whitespace is ignored. Returns true when `text` carried a section number.
    pub fn observe(&mut self, text: &str) -> bool {
        match extract_section_number(text.trim_start()) {
            Some(tag) => {
                if tag != self.current {
                    tracing::trace!(section = tag, "section tag");
                }
                tag.clone_into(&mut self.current);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn current(&self) -> &str {
        &self.current
    }
}
