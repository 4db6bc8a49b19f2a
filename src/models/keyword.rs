use std::collections::BTreeSet;

use serde::Serialize;

/// Normalize a user-supplied keyword: trim, strip enclosing quotes, trim again.
#[must_use]
pub fn clean_keyword(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .to_string()
}

/// Ordered set of normalized keywords.
///
/// Iteration is sorted ascending so that analysis output is reproducible
/// across runs. Matching is case-insensitive downstream; the set itself
/// compares exact strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeywordSet {
    keywords: BTreeSet<String>,
}

impl KeywordSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a raw keyword. Returns false if it was empty after cleaning or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        let cleaned = clean_keyword(raw);
        if cleaned.is_empty() {
            return false;
        }
        self.keywords.insert(cleaned)
    }

    #[must_use]
    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.contains(keyword)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    /// Keywords ordered longest first (by character count), ties alphabetical.
    #[must_use]
    pub fn by_length_desc(&self) -> Vec<&str> {
        let mut sorted: Vec<&str> = self.iter().collect();
        sorted.sort_by(|a, b| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        sorted
    }
}

impl<S: AsRef<str>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for kw in iter {
            set.insert(kw.as_ref());
        }
        set
    }
}

impl<S: AsRef<str>> Extend<S> for KeywordSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for kw in iter {
            self.insert(kw.as_ref());
        }
    }
}

/// A keyword row from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct KeywordEntry {
    /// Database row ID (0 if not yet persisted).
    pub id: i64,
    pub keyword: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl KeywordEntry {
    #[must_use]
    pub fn new(keyword: String, category: Option<String>, description: Option<String>) -> Self {
        Self {
            id: 0,
            keyword,
            category,
            description,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Parse a keyword list file.
///
/// Lines containing a TAB are read as `keyword<TAB>category<TAB>description`.
/// Other lines may hold several keywords separated by `，` or `,`.
/// Keywords are cleaned; empties are dropped and duplicates keep their first occurrence.
#[must_use]
pub fn parse_keyword_file(text: &str) -> Vec<KeywordEntry> {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::new();

    let mut push = |keyword: String, category: Option<String>, description: Option<String>| {
        if !keyword.is_empty() && seen.insert(keyword.clone()) {
            entries.push(KeywordEntry::new(keyword, category, description));
        }
    };

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        if line.contains('\t') {
            let mut fields = line.split('\t');
            let keyword = clean_keyword(fields.next().unwrap_or_default());
            let category = fields.next().map(str::trim).filter(|s| !s.is_empty());
            let description = fields.next().map(str::trim).filter(|s| !s.is_empty());
            push(
                keyword,
                category.map(String::from),
                description.map(String::from),
            );
        } else {
            for word in line.split(['，', ',']) {
                push(clean_keyword(word), None, None);
            }
        }
    }

    entries
}
