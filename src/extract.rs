use std::path::Path;

use crate::report::Position;

/// Placeholder embedded in prompts when the original code can't be recovered.
pub const NOT_AVAILABLE: &str = "<not available>";

/// Slice the text covered by `start..end` out of `text`.
///
/// Lines are 1-based, columns are 0-based `char` offsets and the end column
/// is exclusive. Returns `None` when any index falls outside the text.
pub fn extract_range(text: &str, start: Position, end: Position) -> Option<String> {
    if start.line == 0 || end.line < start.line {
        return None;
    }
    let lines: Vec<&str> = text
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect();
    let selected = lines.get(start.line - 1..end.line)?;

    if let [only] = selected {
        return Some(char_slice(*only, start.column, end.column)?.trim().to_string());
    }

    let last = selected.len() - 1;
    let mut parts = Vec::with_capacity(selected.len());
    for (i, line) in selected.iter().enumerate() {
        let part = if i == 0 {
            char_slice(line, start.column, line.chars().count())?
        } else if i == last {
            char_slice(line, 0, end.column)?
        } else {
            *line
        };
        parts.push(part);
    }
    Some(parts.join("\n").trim().to_string())
}

/// Recover the original code for a mutant from the file on disk.
///
/// Falls back to the source embedded in the report when the file can't be
/// read, and to [`NOT_AVAILABLE`] when neither yields a valid slice.
pub fn original_code(path: &Path, embedded: Option<&str>, start: Position, end: Position) -> String {
    let from_disk = match std::fs::read_to_string(path) {
        Ok(text) => extract_range(&text, start, end),
        Err(e) => {
            tracing::debug!("failed to read {}: {e}", path.display());
            embedded.and_then(|text| extract_range(text, start, end))
        }
    };
    from_disk.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn char_slice(line: &str, from: usize, to: usize) -> Option<&str> {
    if from > to {
        return None;
    }
    let begin = byte_offset(line, from)?;
    let finish = byte_offset(line, to)?;
    line.get(begin..finish)
}

fn byte_offset(line: &str, column: usize) -> Option<usize> {
    if column == 0 {
        return Some(0);
    }
    line.char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()))
        .nth(column)
}
