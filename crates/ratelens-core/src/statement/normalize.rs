//! Statement text normalization.

use crate::models::statement::StatementLine;

use super::rules::patterns::CURRENCY_CODE_PREFIX;

/// Page separator emitted by PDF-to-text tools.
pub const PAGE_BREAK: char = '\u{000C}';

/// Split raw statement text into normalized, non-empty lines.
///
/// Curly quotes and dashes become ASCII, a `USD` code in front of an amount
/// is dropped, pages are split on form feeds and whitespace runs collapse
/// to single spaces. Lines break on `\n`, `\r\n` or a lone `\r`.
pub fn normalize_text(raw: &str) -> Vec<StatementLine> {
    let ascii = canonicalize_punctuation(raw);
    let stripped = CURRENCY_CODE_PREFIX.replace_all(&ascii, "$1");

    stripped
        .split(PAGE_BREAK)
        .enumerate()
        .flat_map(|(page_idx, page)| {
            let page_no = page_idx as u32 + 1;
            page.split(['\r', '\n']).filter_map(move |line| {
                let text = line.split_whitespace().collect::<Vec<_>>().join(" ");
                (!text.is_empty()).then(|| StatementLine::new(page_no, text))
            })
        })
        .collect()
}

fn canonicalize_punctuation(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => '-',
            '\u{00A0}' => ' ',
            other => other,
        })
        .collect()
}
