/// Number of positional parameters a statement expects.
///
/// Recognises bare `?`, numbered `?N` and Postgres-style `$N` placeholders. A bare `?` takes the
/// index one past the largest seen so far, as `SQLite` numbers them. Placeholders inside quoted
/// strings, comments, and dollar-quoted blocks are skipped by a byte cursor, so
/// unusual SQL may still be miscounted; the result is informational and never used to reject a
/// statement.
///
/// ```rust
/// use sql_rowmap::count_placeholders;
///
/// assert_eq!(count_placeholders("SELECT * FROM t WHERE a = ? AND b = ?"), 2);
/// assert_eq!(count_placeholders("SELECT $2, $1, '$3'"), 2);
/// ```
#[must_use]
pub fn count_placeholders(sql: &str) -> usize {
    let mut cursor = Cursor {
        bytes: sql.as_bytes(),
        pos: 0,
    };
    let mut highest = 0usize;

    while let Some(b) = cursor.peek() {
        match b {
            b'\'' | b'"' => cursor.skip_quoted(b),
            b'-' if cursor.starts_with(b"--") => cursor.skip_line(),
            b'/' if cursor.starts_with(b"/*") => cursor.skip_block_comment(),
            b'$' => {
                cursor.pos += 1;
                if let Some(index) = cursor.take_number() {
                    highest = highest.max(index);
                } else if let Some(tag_len) = cursor.dollar_tag_len() {
                    cursor.skip_dollar_body(tag_len);
                }
            }
            b'?' => {
                cursor.pos += 1;
                match cursor.take_number() {
                    Some(index) => highest = highest.max(index),
                    None => highest += 1,
                }
            }
            _ => cursor.pos += 1,
        }
    }

    highest
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn rest(&self) -> &[u8] {
        self.bytes.get(self.pos..).unwrap_or_default()
    }

    fn starts_with(&self, prefix: &[u8]) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Skip a quoted literal or identifier. A doubled quote is an escape.
    fn skip_quoted(&mut self, quote: u8) {
        self.pos += 1;
        while let Some(b) = self.peek() {
            self.pos += 1;
            if b == quote {
                if self.peek() == Some(quote) {
                    self.pos += 1;
                } else {
                    return;
                }
            }
        }
    }

    fn skip_line(&mut self) {
        match self.rest().iter().position(|&b| b == b'\n') {
            Some(offset) => self.pos += offset + 1,
            None => self.pos = self.bytes.len(),
        }
    }

    // block comments nest
    fn skip_block_comment(&mut self) {
        let mut depth = 0usize;
        while self.pos < self.bytes.len() {
            if self.starts_with(b"/*") {
                depth += 1;
                self.pos += 2;
            } else if self.starts_with(b"*/") {
                depth = depth.saturating_sub(1);
                self.pos += 2;
                if depth == 0 {
                    return;
                }
            } else {
                self.pos += 1;
            }
        }
    }

    /// Consume a run of ASCII digits and parse it.
    fn take_number(&mut self) -> Option<usize> {
        let digits = self.rest().iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return None;
        }
        let value = std::str::from_utf8(&self.rest()[..digits])
            .ok()
            .and_then(|text| text.parse().ok());
        self.pos += digits;
        value
    }

    /// Tag length of a `$tag$` opener, with the cursor just past its first `$`.
    fn dollar_tag_len(&self) -> Option<usize> {
        let rest = self.rest();
        let tag_len = rest
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count();
        (rest.get(tag_len) == Some(&b'$')).then_some(tag_len)
    }

    fn skip_dollar_body(&mut self, tag_len: usize) {
        let mut delimiter = Vec::with_capacity(tag_len + 2);
        delimiter.push(b'$');
        delimiter.extend_from_slice(&self.rest()[..tag_len]);
        delimiter.push(b'$');

        self.pos += tag_len + 1;
        match self
            .rest()
            .windows(delimiter.len())
            .position(|window| window == delimiter.as_slice())
        {
            Some(offset) => self.pos += offset + delimiter.len(),
            None => self.pos = self.bytes.len(),
        }
    }
}
