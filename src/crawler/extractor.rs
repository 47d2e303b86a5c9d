//! Level extractor
//!
//! Parses an answer page into per-level word lists. A page contains zero or
//! more level sections: a heading whose text starts with the level marker and
//! a number, followed by a paragraph holding the words. Inside the paragraph,
//! the main words sit in plain text nodes and the bonus words in a dedicated
//! sub-container; the label element is ignored.

use scraper::{ElementRef, Html, Node, Selector};

/// Selector for the bonus-word sub-container inside a word paragraph
const BONUS_CLASS: &str = "uk-text-meta";

/// Word lists extracted for one level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedLevel {
    pub level: u32,
    pub main_words: Vec<String>,
    pub bonus_words: Vec<String>,
}

/// Extracts every level section from an answer page body
///
/// # Section rules
///
/// - A section starts at an `<h2>` whose text begins with `marker` followed
///   by an integer; a heading with an unparsable number is skipped.
/// - The words live in the nearest following sibling `<p>`; a heading with
///   no such paragraph before the next heading is skipped.
/// - Bonus words are the text of the paragraph's bonus sub-container; every
///   other text in the paragraph (outside the label) is a main word.
/// - All words are uppercased.
///
/// # Arguments
///
/// * `html` - The page body
/// * `marker` - The heading word preceding the level number (e.g. "Уровень")
///
/// # Returns
///
/// * `Ok(Vec<ExtractedLevel>)` - Zero or more level sections, in page order
/// * `Err(String)` - Failed to build the heading selector
pub fn extract_levels(html: &str, marker: &str) -> Result<Vec<ExtractedLevel>, String> {
    let document = Html::parse_document(html);
    let heading_selector =
        Selector::parse("h2").map_err(|e| format!("invalid heading selector: {:?}", e))?;

    let mut levels = Vec::new();

    for heading in document.select(&heading_selector) {
        let title = heading.text().collect::<String>();
        let title = title.trim();

        let level = match parse_level_number(title, marker) {
            Some(n) => n,
            None => continue,
        };

        let paragraph = match find_word_paragraph(heading) {
            Some(p) => p,
            None => continue,
        };

        let (main_words, bonus_words) = split_paragraph_words(paragraph);
        levels.push(ExtractedLevel {
            level,
            main_words,
            bonus_words,
        });
    }

    Ok(levels)
}

/// Parses the level number out of a heading like "Уровень 42"
fn parse_level_number(title: &str, marker: &str) -> Option<u32> {
    let rest = title.strip_prefix(marker)?;
    rest.split_whitespace().next()?.parse().ok()
}

/// Finds the word paragraph for a heading: the nearest following sibling
/// `<p>`, not looking past the next heading
fn find_word_paragraph(heading: ElementRef) -> Option<ElementRef> {
    for sibling in heading.next_siblings() {
        let element = match ElementRef::wrap(sibling) {
            Some(e) => e,
            None => continue,
        };
        match element.value().name() {
            "p" => return Some(element),
            "h2" => return None,
            _ => continue,
        }
    }
    None
}

/// Splits a word paragraph into (main, bonus) word lists
///
/// Walks the paragraph's direct children and matches on node kind: text nodes
/// carry main words, the bonus sub-container carries bonus words, and the
/// label and line breaks carry nothing.
fn split_paragraph_words(paragraph: ElementRef) -> (Vec<String>, Vec<String>) {
    let mut main_words = Vec::new();
    let mut bonus_words = Vec::new();

    for child in paragraph.children() {
        match child.value() {
            Node::Text(text) => {
                collect_words(text, &mut main_words);
            }
            Node::Element(element) => match element.name() {
                "strong" | "br" => {}
                "span" if element.classes().any(|c| c == BONUS_CLASS) => {
                    if let Some(span) = ElementRef::wrap(child) {
                        let text = span.text().collect::<String>();
                        collect_words(&text, &mut bonus_words);
                    }
                }
                _ => {
                    if let Some(inner) = ElementRef::wrap(child) {
                        let text = inner.text().collect::<String>();
                        collect_words(&text, &mut main_words);
                    }
                }
            },
            _ => {}
        }
    }

    (main_words, bonus_words)
}

/// Splits raw text on whitespace and commas into uppercased words
fn collect_words(text: &str, out: &mut Vec<String>) {
    for word in text.split(|c: char| c.is_whitespace() || c == ',') {
        let word = word.trim();
        if !word.is_empty() {
            out.push(word.to_uppercase());
        }
    }
}
