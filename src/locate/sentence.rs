/// Characters that end a sentence.
pub const SENTENCE_TERMINATORS: [char; 6] = ['。', '！', '？', '.', '!', '?'];

#[must_use]
pub fn is_terminator(c: char) -> bool {
    SENTENCE_TERMINATORS.contains(&c)
}

/// Lowercase a character when that maps it to exactly one character.
///
/// Keeps the folded text aligned 1:1 with the original, so offsets found in
/// the folded copy index the original directly.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// A sentence enclosing one keyword occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedSentence {
    /// Trimmed sentence text, original casing.
    pub sentence: String,
    /// Character offset of the keyword occurrence in the unit text.
    pub match_start: usize,
    /// Character offset where the (untrimmed) sentence starts.
    pub sentence_start: usize,
}

/// Case-insensitive keyword search over one unit's text.
///
/// The text is folded once and reused for every keyword.
pub struct SentenceLocator {
    original: Vec<char>,
    folded: Vec<char>,
}

impl SentenceLocator {
    #[must_use]
    pub fn new(content: &str) -> Self {
        let original: Vec<char> = content.chars().collect();
        let folded = original.iter().copied().map(fold_char).collect();
        Self { original, folded }
    }

    /// Character offsets of every non-overlapping occurrence of `keyword`,
    /// each search resuming at the end of the previous match.
    #[must_use]
    pub fn occurrences(&self, keyword: &str) -> Vec<usize> {
        let needle: Vec<char> = keyword.chars().map(fold_char).collect();
        let n = needle.len();
        let mut found = Vec::new();
        if n == 0 || n > self.folded.len() {
            return found;
        }

        let mut i = 0;
        while i + n <= self.folded.len() {
            if self.folded[i..i + n] == needle[..] {
                found.push(i);
                i += n;
            } else {
                i += 1;
            }
        }
        found
    }

    /// The enclosing sentence of every occurrence of `keyword`, in text order.
    ///
    /// A sentence starts right after the nearest terminator before the match
    /// (or at the text start) and runs through the nearest terminator after
    /// the match (or to the text end).
    #[must_use]
    pub fn locate(&self, keyword: &str) -> Vec<LocatedSentence> {
        let len = keyword.chars().count();
        self.occurrences(keyword)
            .into_iter()
            .map(|idx| {
                let start = self.original[..idx]
                    .iter()
                    .rposition(|c| is_terminator(*c))
                    .map_or(0, |p| p + 1);
                let after = idx + len;
                let end = self.original[after..]
                    .iter()
                    .position(|c| is_terminator(*c))
                    .map_or(self.original.len(), |p| after + p + 1);
                let sentence: String = self.original[start..end].iter().collect();
                LocatedSentence {
                    sentence: sentence.trim().to_string(),
                    match_start: idx,
                    sentence_start: start,
                }
            })
            .collect()
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        self.original.len()
    }
}

/// Locate every sentence in `content` that contains `keyword`.
#[must_use]
pub fn locate(content: &str, keyword: &str) -> Vec<LocatedSentence> {
    SentenceLocator::new(content).locate(keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(content: &str, keyword: &str) -> Vec<String> {
        locate(content, keyword)
            .into_iter()
            .map(|l| l.sentence)
            .collect()
    }

    #[test]
    fn extracts_enclosing_chinese_sentence() {
        let found = locate("第一章 总则。本项目采购计算机设备。", "计算机");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sentence, "本项目采购计算机设备。");
        assert_eq!(found[0].sentence_start, 7);
        assert_eq!(found[0].match_start, 12);
    }

    #[test]
    fn no_terminators_returns_whole_content() {
        assert_eq!(
            sentences("  投标保证金为人民币五万元  ", "保证金"),
            vec!["投标保证金为人民币五万元"]
        );
    }

    #[test]
    fn each_occurrence_gets_its_sentence() {
        let content = "供应商须提供服务器。服务器须原厂质保！其他要求见附件？";
        assert_eq!(
            sentences(content, "服务器"),
            vec!["供应商须提供服务器。", "服务器须原厂质保！"]
        );
    }

    #[test]
    fn repeated_keyword_in_one_sentence_yields_repeats() {
        let found = locate("服务器与服务器机柜。", "服务器");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].sentence, found[1].sentence);
    }

    #[test]
    fn matching_is_case_insensitive_and_preserves_case() {
        assert_eq!(
            sentences("Intro. The SERVER must run Linux! Done.", "server"),
            vec!["The SERVER must run Linux!"]
        );
    }

    #[test]
    fn occurrences_do_not_overlap() {
        let locator = SentenceLocator::new("aaaa");
        assert_eq!(locator.occurrences("aa"), vec![0, 2]);
    }

    #[test]
    fn ascii_terminators_count() {
        assert_eq!(
            sentences("Price is 3.5 yuan per unit", "yuan"),
            vec!["5 yuan per unit"]
        );
    }

    #[test]
    fn empty_or_absent_keyword_finds_nothing() {
        assert!(locate("任意文本。", "").is_empty());
        assert!(locate("任意文本。", "不存在").is_empty());
        assert!(locate("短", "更长的关键词").is_empty());
    }

    #[test]
    fn relocating_an_isolated_sentence_is_stable() {
        let first = sentences("前言。本项目采购计算机设备。后记。", "计算机");
        let again = sentences(&first[0], "计算机");
        assert_eq!(again, first);
    }

    #[test]
    fn multi_char_lowercase_keeps_alignment() {
        // 'İ' lowercases to two chars; folding leaves it as-is so offsets stay aligned.
        let found = locate("İstanbul office. Contact sales.", "sales");
        assert_eq!(found[0].sentence, "Contact sales.");
        assert_eq!(found[0].match_start, 25);
    }
}
