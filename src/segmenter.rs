//! Flat-text chapter segmentation.
//!
//! Text is walked line by line; a line recognised by [`is_heading`] closes the
//! chapter being accumulated and opens a new one titled by that line. When the
//! walk finds fewer than two chapters the result is discarded and the text is
//! cut into fixed-size chunks instead.

use crate::reader::Chapter;
use crate::text::{is_heading, normalize};

/// Characters per chapter when no headings are found.
pub const DEFAULT_CHUNK_SIZE: usize = 1200;

#[derive(Debug, Clone, PartialEq, Eq)]
enum SegmentState {
    /// No heading seen yet; flushed chapters get a placeholder title.
    NoChapterOpen,
    AccumulatingUnderTitle(String),
}

/// Line-driven state machine that cuts chapters at heading lines.
#[derive(Debug)]
pub struct Segmenter<'a> {
    default_title: &'a str,
    state: SegmentState,
    buffer: Vec<String>,
    chapters: Vec<Chapter>,
}

impl<'a> Segmenter<'a> {
    pub fn new(default_title: &'a str) -> Self {
        Self {
            default_title,
            state: SegmentState::NoChapterOpen,
            buffer: Vec::new(),
            chapters: Vec::new(),
        }
    }

    /// Feed the next line of normalized text.
    pub fn push_line(&mut self, line: &str) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            self.buffer.push(String::new());
            return;
        }

        if is_heading(trimmed) {
            // Blank lines count: a heading after leading blank lines still
            // flushes an (empty) chapter.
            if !self.buffer.is_empty() {
                self.flush(false);
            }
            self.state = SegmentState::AccumulatingUnderTitle(trimmed.to_string());
        }

        self.buffer.push(trimmed.to_string());
    }

    /// Flush whatever is buffered and return all chapters in order.
    pub fn finish(mut self) -> Vec<Chapter> {
        if !self.buffer.is_empty() {
            self.flush(true);
        }
        self.chapters
    }

    fn flush(&mut self, at_end: bool) {
        let title = match &self.state {
            SegmentState::AccumulatingUnderTitle(title) => title.clone(),
            SegmentState::NoChapterOpen if at_end && self.chapters.is_empty() => {
                self.default_title.to_string()
            }
            SegmentState::NoChapterOpen => {
                format!("{} {}", self.default_title, self.chapters.len() + 1)
            }
        };

        let content = self.buffer.join("\n").trim().to_string();
        self.buffer.clear();
        self.chapters.push(Chapter { title, content });
    }
}

/// Split at every line boundary `str.splitlines` knows about, including form
/// feeds (page breaks) and the Unicode line/paragraph separators. A trailing
/// terminator does not produce an extra empty line.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut lines: Vec<&str> = text
        .split(|c| {
            matches!(
                c,
                '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
            )
        })
        .collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines.into_iter()
}

/// Segment already-normalized text at heading lines, without any fallback.
pub fn segment_by_headings(text: &str, default_title: &str) -> Vec<Chapter> {
    let mut segmenter = Segmenter::new(default_title);
    for line in split_lines(text) {
        segmenter.push_line(line);
    }
    segmenter.finish()
}

/// Cut text into chunks of `chunk_size` characters, each trimmed.
///
/// Text that fits in a single chunk yields one chapter titled exactly
/// `default_title`; otherwise titles are numbered from 1.
pub fn chunk(text: &str, default_title: &str, chunk_size: usize) -> Vec<Chapter> {
    let chunk_size = chunk_size.max(1);
    let chars: Vec<char> = text.chars().collect();

    if chars.len() <= chunk_size {
        return vec![Chapter::new(default_title, text.trim())];
    }

    chars
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, part)| {
            let content: String = part.iter().collect();
            Chapter::new(format!("{} {}", default_title, i + 1), content.trim())
        })
        .collect()
}

/// Normalize raw text and split it into chapters, falling back to fixed-size
/// chunks when fewer than two chapters are found.
pub fn split_into_chapters(text: &str, default_title: &str, chunk_size: usize) -> Vec<Chapter> {
    let cleaned = normalize(text);
    let chapters = segment_by_headings(&cleaned, default_title);

    if chapters.len() <= 1 {
        return chunk(&cleaned, default_title, chunk_size);
    }
    chapters
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = "文本章节";

    #[test]
    fn cjk_headings_split_and_stay_in_body() {
        let text = "第一章 开始\n内容一\n\n第二章 结束\n内容二\n";
        let chapters = split_into_chapters(text, TITLE, DEFAULT_CHUNK_SIZE);

        assert_eq!(
            chapters,
            vec![
                Chapter::new("第一章 开始", "第一章 开始\n内容一"),
                Chapter::new("第二章 结束", "第二章 结束\n内容二"),
            ]
        );
    }

    #[test]
    fn text_before_first_heading_gets_placeholder() {
        let text = "Preface line\nChapter 1 Start\nbody one\nChapter 2 Next\nbody two";
        let chapters = split_into_chapters(text, TITLE, DEFAULT_CHUNK_SIZE);

        let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["文本章节 1", "Chapter 1 Start", "Chapter 2 Next"]);
        assert_eq!(chapters[0].content, "Preface line");
    }

    #[test]
    fn leading_blank_lines_flush_an_empty_chapter() {
        // Current behavior: blank lines make the buffer non-empty.
        let chapters = segment_by_headings("\n第一章\nA\n第二章\nB", TITLE);

        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0], Chapter::new("文本章节 1", ""));
        assert_eq!(chapters[1], Chapter::new("第一章", "第一章\nA"));
    }

    #[test]
    fn blank_lines_are_kept_inside_bodies() {
        let chapters = segment_by_headings("第一章\n\n段落\n\n\n第二章\n尾", TITLE);
        assert_eq!(chapters[0].content, "第一章\n\n段落");
    }

    #[test]
    fn lines_are_trimmed_in_content() {
        let chapters = segment_by_headings("  第一章 甲  \n   正文   \n第二章\n乙", TITLE);
        assert_eq!(chapters[0], Chapter::new("第一章 甲", "第一章 甲\n正文"));
    }

    #[test]
    fn single_heading_falls_back_to_whole_text() {
        let text = "第一章 开始\n短文";
        let chapters = split_into_chapters(text, TITLE, DEFAULT_CHUNK_SIZE);
        assert_eq!(chapters, vec![Chapter::new(TITLE, text)]);
    }

    #[test]
    fn short_text_without_headings_is_one_chapter() {
        let chapters = split_into_chapters("  hello\r\nworld  \n", TITLE, DEFAULT_CHUNK_SIZE);
        assert_eq!(chapters, vec![Chapter::new(TITLE, "hello\nworld")]);
    }

    #[test]
    fn empty_text_is_one_empty_chapter() {
        let chapters = split_into_chapters("", TITLE, DEFAULT_CHUNK_SIZE);
        assert_eq!(chapters, vec![Chapter::new(TITLE, "")]);
    }

    #[test]
    fn long_text_without_headings_is_chunked_by_characters() {
        let text = "字".repeat(2500);
        let chapters = split_into_chapters(&text, TITLE, DEFAULT_CHUNK_SIZE);

        assert_eq!(chapters.len(), 3);
        assert_eq!(chapters[0].title, "文本章节 1");
        assert_eq!(chapters[2].title, "文本章节 3");
        assert_eq!(chapters[0].content.chars().count(), 1200);
        assert_eq!(chapters[2].content.chars().count(), 100);
    }

    #[test]
    fn exactly_one_chunk_keeps_plain_title() {
        let text = "a".repeat(1200);
        let chapters = chunk(&text, TITLE, 1200);
        assert_eq!(chapters, vec![Chapter::new(TITLE, text)]);
    }

    #[test]
    fn chunk_size_is_configurable() {
        let chapters = chunk("abcdefg", "T", 3);
        let contents: Vec<_> = chapters.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["abc", "def", "g"]);
        assert_eq!(chapters[1].title, "T 2");
    }

    #[test]
    fn heading_flushes_previous_chapter() {
        let mut segmenter = Segmenter::new(TITLE);
        segmenter.push_line("第一章");
        segmenter.push_line("正文");
        segmenter.push_line("第二章");

        assert_eq!(
            segmenter.finish(),
            vec![
                Chapter::new("第一章", "第一章\n正文"),
                Chapter::new("第二章", "第二章"),
            ]
        );
    }

    #[test]
    fn form_feed_page_break_is_a_line_boundary() {
        let chapters = split_into_chapters("第一章 开始\n甲\x0c第二章 结束\n乙", "Word 章节", DEFAULT_CHUNK_SIZE);
        assert_eq!(
            chapters,
            vec![
                Chapter::new("第一章 开始", "第一章 开始\n甲"),
                Chapter::new("第二章 结束", "第二章 结束\n乙"),
            ]
        );
    }

    #[test]
    fn unicode_line_separators_are_line_boundaries() {
        let chapters = segment_by_headings("第一章\u{2028}甲\u{2029}第二章\u{85}乙", TITLE);
        let titles: Vec<_> = chapters.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["第一章", "第二章"]);
    }

    #[test]
    fn split_lines_drops_only_the_trailing_terminator() {
        assert_eq!(split_lines("a\n\nb\n").collect::<Vec<_>>(), ["a", "", "b"]);
        assert_eq!(split_lines("a\x0b\x1cb").collect::<Vec<_>>(), ["a", "", "b"]);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn lone_text_at_end_uses_plain_default_title() {
        let mut segmenter = Segmenter::new(TITLE);
        segmenter.push_line("no heading here");
        assert_eq!(segmenter.finish(), vec![Chapter::new(TITLE, "no heading here")]);
    }
}
