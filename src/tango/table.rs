//! # Markdown Table Codec
//!
//! Export writes the collection as a small markdown document:
//!
//! ```text
//! # Japanese Vocabulary Export
//!
//! Export Date: 2024-03-15
//! Total Words: 2
//!
//! | Vocabulary | Hiragana | Meaning |
//! |------------|----------|---------|
//! | 猫 | ねこ | cat |
//! | 犬 | いぬ | dog |
//!
//! ---
//! Generated by tango vocabulary manager
//! ```
//!
//! Import is deliberately loose so hand-written tables work too. The header is
//! the first `|`-delimited row that names all three columns, matched by
//! fragment and in any order:
//!
//! | column        | header cell contains                   |
//! |---------------|----------------------------------------|
//! | vocabulary    | `vocabulary`, `word`                   |
//! | pronunciation | `hiragana`, `pronunciation`, `reading` |
//! | meaning       | `meaning`, `translation`, `english`    |
//!
//! Rows start two lines below the header and run until a blank line, a
//! heading, a horizontal rule or the footer. Rows missing any of the three
//! values are dropped. A document without a recognizable header decodes to
//! nothing; it is never an error.
//!
//! A `|` inside a value would split the cell, so export writes it as the
//! full-width `｜` and import turns it back.

use crate::model::{WordEntry, WordFields};
use chrono::NaiveDate;
use log::warn;
use std::fmt::Write;

pub const FULLWIDTH_PIPE: char = '｜';
pub const TITLE: &str = "# Japanese Vocabulary Export";
pub const FOOTER: &str = "Generated by tango vocabulary manager";

/// Upper bound on decoded rows; anything past it is ignored.
pub const MAX_ROWS: usize = 100_000;

const FOOTER_PREFIX: &str = "Generated by";
const VOCABULARY_HINTS: [&str; 2] = ["vocabulary", "word"];
const PRONUNCIATION_HINTS: [&str; 3] = ["hiragana", "pronunciation", "reading"];
const MEANING_HINTS: [&str; 3] = ["meaning", "translation", "english"];

pub fn encode(words: &[WordEntry], exported_on: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(TITLE);
    out.push_str("\n\n");
    // Writing to a String cannot fail.
    let _ = writeln!(out, "Export Date: {}", exported_on.format("%Y-%m-%d"));
    let _ = writeln!(out, "Total Words: {}", words.len());
    out.push('\n');
    out.push_str("| Vocabulary | Hiragana | Meaning |\n");
    out.push_str("|------------|----------|---------|\n");

    for word in words {
        let _ = writeln!(
            out,
            "| {} | {} | {} |",
            escape_cell(&word.vocabulary),
            escape_cell(&word.pronunciation),
            escape_cell(&word.meaning)
        );
    }

    out.push_str("\n---\n");
    out.push_str(FOOTER);
    out.push('\n');
    out
}

pub fn decode(text: &str) -> Vec<WordFields> {
    let lines: Vec<&str> = text.lines().collect();
    let Some((header_at, columns)) = find_header(&lines) else {
        return Vec::new();
    };

    let mut rows = Vec::new();
    for raw in lines.iter().skip(header_at + 2) {
        let line = raw.trim();
        if ends_table(line) {
            break;
        }
        if rows.len() >= MAX_ROWS {
            warn!("import stopped after {} rows", MAX_ROWS);
            break;
        }
        let Some(cells) = split_row(line) else {
            continue;
        };
        if let Some(fields) = columns.extract(&cells) {
            rows.push(fields);
        }
    }
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    vocabulary: usize,
    pronunciation: usize,
    meaning: usize,
}

impl ColumnMap {
    fn from_header(cells: &[&str]) -> Option<Self> {
        let mut vocabulary = None;
        let mut pronunciation = None;
        let mut meaning = None;

        for (i, cell) in cells.iter().enumerate() {
            let cell = cell.to_lowercase();
            // A cell claims at most one column, checked in this order. When
            // several cells name the same column, the rightmost one wins.
            if mentions(&cell, &VOCABULARY_HINTS) {
                vocabulary = Some(i);
            } else if mentions(&cell, &PRONUNCIATION_HINTS) {
                pronunciation = Some(i);
            } else if mentions(&cell, &MEANING_HINTS) {
                meaning = Some(i);
            }
        }

        Some(Self {
            vocabulary: vocabulary?,
            pronunciation: pronunciation?,
            meaning: meaning?,
        })
    }

    fn extract(&self, cells: &[&str]) -> Option<WordFields> {
        let vocabulary = unescape_cell(cells.get(self.vocabulary)?);
        let pronunciation = unescape_cell(cells.get(self.pronunciation)?);
        let meaning = unescape_cell(cells.get(self.meaning)?);
        if vocabulary.is_empty() || pronunciation.is_empty() || meaning.is_empty() {
            return None;
        }
        Some(WordFields {
            vocabulary,
            pronunciation,
            meaning,
        })
    }
}

fn mentions(cell: &str, hints: &[&str]) -> bool {
    hints.iter().any(|h| cell.contains(h))
}

fn find_header(lines: &[&str]) -> Option<(usize, ColumnMap)> {
    lines.iter().enumerate().find_map(|(i, line)| {
        let cells = split_row(line.trim())?;
        ColumnMap::from_header(&cells).map(|columns| (i, columns))
    })
}

/// Cells of a `| a | b |` line, or `None` if the line is not a table row.
fn split_row(line: &str) -> Option<Vec<&str>> {
    if line.len() < 2 || !line.starts_with('|') || !line.ends_with('|') {
        return None;
    }
    Some(line[1..line.len() - 1].split('|').map(str::trim).collect())
}

fn ends_table(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('#')
        || line.starts_with("---")
        || line.starts_with(FOOTER_PREFIX)
}

fn escape_cell(value: &str) -> String {
    value
        .replace('|', "｜")
        .replace(['\r', '\n'], " ")
}

fn unescape_cell(value: &str) -> String {
    value.replace(FULLWIDTH_PIPE, "|").trim().to_string()
}
