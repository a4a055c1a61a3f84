use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use tango::index::DisplayWord;
use tango::model::{DailySelection, Frequency, VocabularyList};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const VOCAB_WIDTH: usize = 16;
const READING_WIDTH: usize = 18;
const TIER_WIDTH: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub level: MessageLevel,
    pub content: String,
}

impl Message {
    pub fn new(level: MessageLevel, content: impl Into<String>) -> Self {
        Self {
            level,
            content: content.into(),
        }
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Info, content)
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, content)
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, content)
    }
}

pub(super) fn render_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|message| {
            let styled = match message.level {
                MessageLevel::Info => message.content.dimmed(),
                MessageLevel::Success => message.content.green(),
                MessageLevel::Warning => message.content.yellow(),
            };
            format!("{}\n", styled)
        })
        .collect()
}

pub(super) fn print_messages(messages: &[Message]) {
    print!("{}", render_messages(messages));
}

pub(super) fn render_word_list(words: &[DisplayWord]) -> String {
    if words.is_empty() {
        return "No words found.\n".to_string();
    }

    let idx_width = words
        .iter()
        .map(|dw| index_label(dw).width())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for dw in words {
        let idx_str = pad_to_width(&index_label(dw), idx_width);
        let vocabulary = pad_to_width(
            &truncate_to_width(&dw.word.vocabulary, VOCAB_WIDTH),
            VOCAB_WIDTH,
        );
        let reading = pad_to_width(
            &truncate_to_width(&dw.word.pronunciation, READING_WIDTH),
            READING_WIDTH,
        );

        let fixed = 4 + idx_width + VOCAB_WIDTH + READING_WIDTH + TIER_WIDTH + TIME_WIDTH + 4;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let meaning = pad_to_width(&truncate_to_width(&dw.word.meaning, available), available);

        let tier = pad_to_width(dw.word.frequency.as_str(), TIER_WIDTH);
        let idx_colored = if dw.index.is_some() {
            idx_str.normal()
        } else {
            idx_str.red()
        };

        output.push_str(&format!(
            "    {}{} {} {} {} {}\n",
            idx_colored,
            vocabulary.bold(),
            reading,
            meaning,
            tier_colored(&tier, dw.word.frequency),
            format_time_ago(dw.word.date_added).dimmed()
        ));
    }
    output
}

pub(super) fn print_word_list(words: &[DisplayWord]) {
    print!("{}", render_word_list(words));
}

pub(super) fn render_word_detail(dw: &DisplayWord, lists: &[VocabularyList]) -> String {
    let word = &dw.word;
    let mut output = String::new();
    output.push_str(&format!(
        "{}{} {}\n",
        index_label(dw).yellow(),
        word.vocabulary.bold(),
        format!("({})", word.pronunciation).dimmed()
    ));
    output.push_str("--------------------------------\n");
    output.push_str(&format!("{}\n", word.meaning));
    output.push('\n');
    output.push_str(&format!(
        "Frequency: {}   Reviews: {}   Added: {}\n",
        tier_colored(word.frequency.as_str(), word.frequency),
        word.review_count,
        format_time_ago(word.date_added).trim()
    ));
    if lists.is_empty() {
        output.push_str(&format!("{}\n", "Not in any list".dimmed()));
    } else {
        let names: Vec<&str> = lists.iter().map(|l| l.name.as_str()).collect();
        output.push_str(&format!("Lists: {}\n", names.join(", ")));
    }
    output
}

pub(super) fn render_lists(lists: &[VocabularyList]) -> String {
    if lists.is_empty() {
        return "No lists yet.\n".to_string();
    }
    let name_width = lists.iter().map(|l| l.name.width()).max().unwrap_or(0);
    lists
        .iter()
        .map(|list| {
            let count = match list.word_ids.len() {
                1 => "1 word".to_string(),
                n => format!("{} words", n),
            };
            format!(
                "    {}  {:>9}  {}\n",
                pad_to_width(&list.name, name_width).bold(),
                count,
                format_time_ago(list.date_created).dimmed()
            )
        })
        .collect()
}

pub(super) fn render_daily(selection: &DailySelection, words: &[DisplayWord]) -> String {
    if selection.is_empty() {
        return format!(
            "No daily words for {}. Run `tango daily --generate` to build a card.\n",
            selection.date.format("%Y-%m-%d")
        );
    }
    format!(
        "{}\n\n{}",
        format!(
            "Daily words for {} ({})",
            selection.date.format("%Y-%m-%d"),
            selection.len()
        )
        .bold(),
        render_word_list(words)
    )
}

fn index_label(dw: &DisplayWord) -> String {
    match dw.index {
        Some(idx) => format!("{}. ", idx),
        None => "-. ".to_string(),
    }
}

fn tier_colored(text: &str, frequency: Frequency) -> ColoredString {
    match frequency {
        Frequency::High => text.red(),
        Frequency::Medium => text.yellow(),
        Frequency::Low => text.green(),
        Frequency::Unset => text.dimmed(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let c = if c == '\n' { ' ' } else { c };
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// Right-pads with spaces to a display width; wide characters count double.
fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tango::index::DisplayIndex;
    use tango::model::{WordEntry, WordFields};

    fn plain() {
        colored::control::set_override(false);
    }

    fn make_word(index: Option<usize>, v: &str, p: &str, m: &str) -> DisplayWord {
        DisplayWord {
            index: index.map(DisplayIndex),
            word: WordEntry::new(1, WordFields::new(v, p, m)),
        }
    }

    #[test]
    fn test_render_empty_list() {
        plain();
        assert_eq!(render_word_list(&[]).trim(), "No words found.");
    }

    #[test]
    fn test_render_word_row() {
        plain();
        let output = render_word_list(&[make_word(Some(3), "猫", "ねこ", "cat")]);
        assert!(output.starts_with("    3. 猫"));
        assert!(output.contains("ねこ"));
        assert!(output.contains("cat"));
        assert!(output.contains("unset"));
    }

    #[test]
    fn test_wide_characters_align() {
        plain();
        let output = render_word_list(&[
            make_word(Some(1), "猫", "ねこ", "cat"),
            make_word(Some(2), "cat", "kyat", "neko"),
        ]);
        let columns: Vec<usize> = output
            .lines()
            .map(|line| {
                let reading = if line.contains("ねこ") { "ねこ" } else { "kyat" };
                line[..line.find(reading).unwrap()].width()
            })
            .collect();
        assert_eq!(columns[0], columns[1]);
    }

    #[test]
    fn test_missing_index_is_marked() {
        plain();
        let output = render_word_list(&[make_word(None, "a", "b", "c")]);
        assert!(output.contains("-. a"));
    }

    #[test]
    fn test_truncate_to_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        // Each kanji is two columns wide.
        assert_eq!(truncate_to_width("日本語の単語", 5), "日本…");
    }

    #[test]
    fn test_render_lists() {
        plain();
        let mut list = VocabularyList::new(1, "Animals".to_string());
        list.word_ids = vec![1];
        let output = render_lists(&[list, VocabularyList::new(2, "Verbs".to_string())]);
        assert!(output.contains("Animals"));
        assert!(output.contains("1 word"));
        assert!(output.contains("0 words"));
        assert_eq!(render_lists(&[]).trim(), "No lists yet.");
    }

    #[test]
    fn test_render_empty_daily() {
        plain();
        let date = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let output = render_daily(&DailySelection::empty(date), &[]);
        assert!(output.contains("No daily words for 2024-04-01"));
    }

    #[test]
    fn test_render_word_detail() {
        plain();
        let dw = make_word(Some(1), "犬", "いぬ", "dog");
        let output = render_word_detail(&dw, &[]);
        assert!(output.contains("犬 (いぬ)"));
        assert!(output.contains("Reviews: 0"));
        assert!(output.contains("Not in any list"));
    }

    #[test]
    fn test_render_messages() {
        plain();
        let output = render_messages(&[Message::success("Added"), Message::info("x")]);
        assert_eq!(output, "Added\nx\n");
    }
}
