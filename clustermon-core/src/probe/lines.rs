//! Whitespace tokenizing and fixed-format line consumption shared by all
//! probe parsers.

/// Splits a line into non-empty tokens on runs of whitespace.
///
/// Leading and trailing whitespace is ignored; there is no quoting or
/// escaping. Column spacing changes in the underlying commands are
/// transparent as long as column order is stable.
#[must_use]
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Cursor over the lines of one command's output
pub(crate) struct OutputLines<'a> {
    lines: std::str::Lines<'a>,
}

impl<'a> OutputLines<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        Self { lines: raw.lines() }
    }

    /// Discards `count` leading header lines.
    pub(crate) fn skip_headers(&mut self, count: usize) -> Result<(), String> {
        for n in 0..count {
            if self.lines.next().is_none() {
                return Err(format!("output ended inside the header (line {n} of {count})"));
            }
        }
        Ok(())
    }

    /// Tokenizes the next line, requiring at least `min_columns` tokens.
    pub(crate) fn row(&mut self, what: &str, min_columns: usize) -> Result<Vec<&'a str>, String> {
        let line = self
            .lines
            .next()
            .ok_or_else(|| format!("missing {what} line"))?;
        let tokens = tokenize(line);
        if tokens.len() < min_columns {
            return Err(format!(
                "{what} line has {} columns, expected at least {min_columns}",
                tokens.len()
            ));
        }
        Ok(tokens)
    }

    /// Tokenizes the next line without a column requirement; `None` when
    /// the output is exhausted.
    pub(crate) fn next_row(&mut self) -> Option<Vec<&'a str>> {
        self.lines.next().map(tokenize)
    }
}
