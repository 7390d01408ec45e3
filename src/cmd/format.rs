/*!
format.rs

Human output for the `xbe` CLI: tables for lists, `Label: value` detail views
for single resources.

Style decisions:
  - Color only when stdout is a terminal and NO_COLOR is unset.
  - Width: env COLUMNS (clamped 40..=220), else 100 on a terminal; piped
    output is never shrunk to fit.
  - Widths are measured in terminal columns (unicode-width), ANSI stripped.

Public API Summary:
  - StyleOptions::detect() -> StyleOptions
  - color(role, text, &StyleOptions) -> String
  - table(headers, rows, TableOpts, &StyleOptions) -> String
  - detail(pairs, &StyleOptions) -> String
  - rows_table(spec, rows, &StyleOptions) / row_detail(spec, row, &StyleOptions)
  - truncate_ellipsis(s, max_width) -> String

JSON output paths do not use these helpers.
*/

use std::borrow::Cow;
use std::io::IsTerminal;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::cmd::row::{Row, display_first, display_value};
use crate::resources::ResourceSpec;
use crate::utils::humanize_key;

/* ---- Style Options ---- */

#[derive(Debug, Clone)]
pub struct StyleOptions {
    pub use_color: bool,
    /// 0 -> unlimited
    pub term_width: usize,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self::detect()
    }
}

impl StyleOptions {
    pub fn detect() -> Self {
        let tty = std::io::stdout().is_terminal();
        let no_color = std::env::var_os("NO_COLOR").is_some();

        let width = std::env::var("COLUMNS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .map(|w| w.clamp(40, 220))
            .unwrap_or(if tty { 100 } else { 0 });

        StyleOptions {
            use_color: tty && !no_color,
            term_width: width,
        }
    }
}

/* ---- Color ---- */

#[derive(Debug, Clone, Copy)]
pub enum Role {
    Accent,
    Success,
    Dim,
    Bold,
}

pub fn color(role: Role, text: impl AsRef<str>, style: &StyleOptions) -> String {
    if !style.use_color {
        return text.as_ref().to_string();
    }
    let code = match role {
        Role::Accent => "38;5;45",
        Role::Success => "38;5;82",
        Role::Dim => "2",
        Role::Bold => "1",
    };
    format!("\x1b[{code}m{}\x1b[0m", text.as_ref())
}

/* ---- Table Rendering ---- */

#[derive(Debug, Clone)]
pub struct TableOpts {
    pub max_width: usize,
    pub truncate: bool,
    pub header_sep: bool,
    pub min_col_width: usize,
}

impl Default for TableOpts {
    fn default() -> Self {
        Self {
            max_width: 0, // 0 -> style.term_width
            truncate: true,
            header_sep: true,
            min_col_width: 2,
        }
    }
}

pub fn table(
    headers: &[&str],
    rows: &[Vec<String>],
    opts: TableOpts,
    style: &StyleOptions,
) -> String {
    if headers.is_empty() {
        return String::new();
    }
    let col_count = headers.len();
    let width_limit = match (opts.max_width, style.term_width) {
        (0, term) => term,
        (max, 0) => max,
        (max, term) => max.min(term),
    };

    let mut widths: Vec<usize> = headers.iter().map(|h| display_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(col_count) {
            widths[i] = widths[i].max(display_width(cell));
        }
    }

    // Greedy shrink from the widest columns.
    let total_raw: usize = widths.iter().sum::<usize>() + (col_count - 1) * 2;
    if width_limit > 0 && total_raw > width_limit {
        let mut overflow = total_raw - width_limit;
        let mut ordered: Vec<(usize, usize)> = widths.iter().copied().enumerate().collect();
        ordered.sort_by(|a, b| b.1.cmp(&a.1));
        for (idx, _) in ordered {
            if overflow == 0 {
                break;
            }
            let target = widths[idx];
            if target > opts.min_col_width {
                let shrink = (target - opts.min_col_width).min(overflow);
                widths[idx] -= shrink;
                overflow -= shrink;
            }
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header = headers
        .iter()
        .enumerate()
        .map(|(i, h)| color(Role::Accent, pad_or_truncate(h, widths[i], opts.truncate), style))
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(header.trim_end().to_string());

    if opts.header_sep {
        let sep = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(color(Role::Dim, sep, style));
    }

    for row in rows {
        let line = (0..col_count)
            .map(|c| {
                let raw = row.get(c).map(String::as_str).unwrap_or("");
                pad_or_truncate(raw, widths[c], opts.truncate)
            })
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

fn pad_or_truncate(s: &str, width: usize, truncate: bool) -> String {
    let len = display_width(s);
    if len == width {
        return s.to_string();
    }
    if len < width {
        return format!("{s}{}", " ".repeat(width - len));
    }
    if !truncate {
        return s.to_string();
    }
    let out = truncate_ellipsis(&strip_ansi(s), width);
    let final_len = display_width(&out);
    format!("{out}{}", " ".repeat(width.saturating_sub(final_len)))
}

/* ---- Detail View ---- */

/// `Label: value` lines with labels aligned.
pub fn detail(pairs: &[(String, String)], style: &StyleOptions) -> String {
    let label_width = pairs
        .iter()
        .map(|(label, _)| display_width(label) + 1)
        .max()
        .unwrap_or(0);
    pairs
        .iter()
        .map(|(label, value)| {
            let label = format!("{label}:");
            let padded = pad_or_truncate(&label, label_width, false);
            format!("{} {value}", color(Role::Bold, padded, style))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/* ---- Resource Views ---- */

/// Table of rows using the descriptor's columns. Each cell shows the first
/// non-empty field of the column, truncated to the column's limit.
pub fn rows_table(spec: &ResourceSpec, rows: &[Row], style: &StyleOptions) -> String {
    let headers: Vec<&str> = spec.columns.iter().map(|c| c.header).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            spec.columns
                .iter()
                .map(|column| {
                    let value = display_first(spec, row, column.fields);
                    match column.max_width {
                        Some(max) => truncate_ellipsis(&value, max),
                        None => value,
                    }
                })
                .collect()
        })
        .collect();
    table(&headers, &cells, TableOpts::default(), style)
}

/// Detail view of one row; blank values are skipped.
pub fn row_detail(spec: &ResourceSpec, row: &Row, style: &StyleOptions) -> String {
    let pairs: Vec<(String, String)> = row
        .iter()
        .map(|(key, value)| (humanize_key(key), display_value(spec.field(key), value)))
        .filter(|(_, value)| !value.trim().is_empty())
        .collect();
    detail(&pairs, style)
}

/* ---- Text Helpers ---- */

/// Cuts `s` to `max_width` columns, the last one being `…`.
pub fn truncate_ellipsis(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if display_width(s) <= max_width {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/* ---- ANSI / Width Utilities ---- */

fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\x1b') {
        return Cow::Borrowed(s);
    }
    let mut buf = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            // Skip parameters up to and including the final letter.
            for c in chars.by_ref() {
                if c.is_ascii_alphabetic() {
                    break;
                }
            }
            continue;
        }
        buf.push(ch);
    }
    Cow::Owned(buf)
}

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::registry;
    use serde_json::json;

    fn plain() -> StyleOptions {
        StyleOptions {
            use_color: false,
            term_width: 0,
        }
    }

    #[test]
    fn test_table_basic() {
        let t = table(
            &["A", "B"],
            &[
                vec!["x".into(), "y".into()],
                vec!["longer".into(), "val".into()],
            ],
            TableOpts::default(),
            &plain(),
        );
        assert_eq!(t, "A       B\n------  ---\nx       y\nlonger  val");
    }

    #[test]
    fn test_table_shrinks_to_width() {
        let style = StyleOptions {
            use_color: false,
            term_width: 12,
        };
        let t = table(
            &["ID", "NAME"],
            &[vec!["1".into(), "abcdefghijklmnop".into()]],
            TableOpts::default(),
            &style,
        );
        for line in t.lines() {
            assert!(display_width(line) <= 12, "{line:?}");
        }
        assert!(t.contains('…'));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate_ellipsis("abcdef", 4), "abc…");
        assert_eq!(truncate_ellipsis("abc", 4), "abc");
        // Wide characters count as two columns.
        assert_eq!(truncate_ellipsis("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_strip_ansi() {
        let colored = "\x1b[31mRED\x1b[0m";
        assert_eq!(strip_ansi(colored), "RED");
        assert_eq!(display_width(colored), 3);
    }

    #[test]
    fn test_detail_alignment() {
        let out = detail(
            &[
                ("ID".into(), "5".into()),
                ("Company Name".into(), "Acme".into()),
            ],
            &plain(),
        );
        assert_eq!(out, "ID:           5\nCompany Name: Acme");
    }

    #[test]
    fn test_rows_table_uses_column_fallback_and_limit() {
        let spec = registry::find("brokers").unwrap();
        let mut row = Row::new();
        row.insert("id".into(), json!("7"));
        row.insert("company_name".into(), json!("x".repeat(100)));
        let out = rows_table(spec, &[row], &plain());
        let last = out.lines().last().unwrap();
        assert!(last.starts_with("7   "));
        assert_eq!(display_width(last.trim_start_matches("7").trim()), 80);
    }

    #[test]
    fn test_row_detail_skips_blanks() {
        let spec = registry::find("job-sites").unwrap();
        let mut row = Row::new();
        row.insert("id".into(), json!("5"));
        row.insert("name".into(), json!("Quarry"));
        row.insert("customer_id".into(), json!(""));
        let out = row_detail(spec, &row, &plain());
        assert_eq!(out, "ID:   5\nName: Quarry");
    }
}
