#[derive(Clone, Copy, Debug)]
pub struct TableOptions {
    pub max_width: Option<usize>,
    pub color: bool,
}

const MIN_COLUMN_WIDTH: usize = 6;
const SEPARATOR: &str = "  ";

/// Render an aligned table of string rows. Widths count characters, so
/// labels with non-ASCII names still line up.
#[must_use]
pub fn render_entity_table<H: AsRef<str>>(
    headers: &[H],
    rows: &[Vec<String>],
    options: TableOptions,
) -> String {
    let mut widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(index, header)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| display_width(cell))
                .max()
                .unwrap_or(0)
                .max(display_width(header.as_ref()))
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    fit_widths(&mut widths, options.max_width);

    let header_line = headers
        .iter()
        .zip(widths.iter())
        .map(|(header, width)| pad(&truncate_text(header.as_ref(), *width), *width, false))
        .collect::<Vec<_>>()
        .join(SEPARATOR);

    let divider = "-".repeat(display_width(&header_line));

    let row_lines = rows.iter().map(|row| {
        widths
            .iter()
            .enumerate()
            .map(|(index, width)| {
                let value = row.get(index).map_or("-", String::as_str);
                let truncated = truncate_text(value, *width);
                let padded = pad(&truncated, *width, looks_numeric(&truncated));
                if options.color {
                    colorize_status(&truncated, padded)
                } else {
                    padded
                }
            })
            .collect::<Vec<_>>()
            .join(SEPARATOR)
    });

    let mut lines = Vec::with_capacity(2 + rows.len());
    lines.push(header_line.trim_end().to_string());
    lines.push(divider);
    lines.extend(row_lines.map(|line| line.trim_end().to_string()));
    lines.join("\n")
}

/// Shrink the widest column one character at a time until the table fits.
/// Headers are truncated too; no column goes below `MIN_COLUMN_WIDTH`.
fn fit_widths(widths: &mut [usize], max_width: Option<usize>) {
    let Some(max_width) = max_width else {
        return;
    };
    let separators = widths.len().saturating_sub(1) * SEPARATOR.len();

    while widths.iter().sum::<usize>() + separators > max_width {
        let widest = widths
            .iter()
            .enumerate()
            .filter(|(_, width)| **width > MIN_COLUMN_WIDTH)
            .max_by_key(|(_, width)| **width)
            .map(|(idx, _)| idx);

        let Some(idx) = widest else {
            break;
        };
        widths[idx] -= 1;
    }
}

fn display_width(value: &str) -> usize {
    value.chars().count()
}

fn truncate_text(value: &str, width: usize) -> String {
    if display_width(value) <= width {
        return value.to_string();
    }
    if width <= 1 {
        return "…".to_string();
    }
    let mut out: String = value.chars().take(width - 1).collect();
    out.push('…');
    out
}

fn pad(value: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(value)));
    if right_align {
        format!("{fill}{value}")
    } else {
        format!("{value}{fill}")
    }
}

fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '-' | '+' | '.'))
}

/// Wrap a padded cell in an ANSI color when its text is a known status.
fn colorize_status(text: &str, padded: String) -> String {
    let code = match text.to_ascii_lowercase().as_str() {
        "active" | "true" | "created" => "32",
        "planned" | "updated" => "33",
        "false" | "deleted" => "31",
        "completed" => "90",
        _ => return padded,
    };
    format!("\u{1b}[{code}m{padded}\u{1b}[0m")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{TableOptions, render_entity_table, truncate_text};

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[test]
    fn columns_align_across_rows() {
        let headers = ["id", "status", "name"];
        let rows = vec![
            vec!["opr-1".to_string(), "planned".to_string(), "Spring".to_string()],
            vec![
                "opr-200".to_string(),
                "active".to_string(),
                "Autumn intake".to_string(),
            ],
        ];
        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[1].chars().all(|c| c == '-'));
        let status_at = lines[0].find("status").expect("status header");
        assert_eq!(lines[2].find("planned"), Some(status_at));
        assert_eq!(lines[3].find("active"), Some(status_at));
    }

    #[test]
    fn non_ascii_cells_do_not_shift_columns() {
        let headers = ["name", "code"];
        let rows = vec![
            vec!["Él".to_string(), "CSE".to_string()],
            vec!["El".to_string(), "EEE".to_string()],
        ];
        let table = render_entity_table(&headers, &rows, PLAIN);
        let lines: Vec<&str> = table.lines().collect();
        let col = |line: &str, needle: &str| {
            line.char_indices()
                .position(|(idx, _)| line[idx..].starts_with(needle))
        };
        assert_eq!(col(lines[2], "CSE"), col(lines[3], "EEE"));
    }

    #[test]
    fn max_width_truncates_widest_column() {
        let headers = ["id", "title"];
        let rows = vec![vec![
            "evt-1".to_string(),
            "An unusually long lecture title for a narrow terminal".to_string(),
        ]];
        let table = render_entity_table(
            &headers,
            &rows,
            TableOptions {
                max_width: Some(30),
                color: false,
            },
        );
        assert!(table.lines().all(|line| line.chars().count() <= 30));
        assert!(table.contains('…'));
    }

    #[test]
    fn truncate_keeps_short_values() {
        assert_eq!(truncate_text("Lab", 6), "Lab");
        assert_eq!(truncate_text("Laboratory", 4), "Lab…");
    }
}
