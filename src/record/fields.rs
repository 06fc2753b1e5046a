use super::RECORD_DELIMITER;

/// A data field read back from a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataField<'a> {
    /// Field name from the `> <NAME>` header
    pub name: &'a str,
    /// Field value; multi-line values keep their inner line breaks
    pub value: &'a str,
}

/// Iterator over the data fields of one record, in file order.
#[derive(Debug, Clone)]
pub struct DataFields<'a> {
    text: &'a str,
    pos: usize,
}

/// Read the data fields of a record block (or of a whole annotated record).
///
/// Header lines may carry extra text around the name, as in
/// `> 25  <MELTING.POINT>`; only the text between the angle brackets is kept.
pub fn data_fields(record: &str) -> DataFields<'_> {
    DataFields {
        text: record,
        pos: 0,
    }
}

impl<'a> DataFields<'a> {
    /// Line starting at `pos` without its terminator, and the offset after it.
    fn line_at(&self, pos: usize) -> Option<(&'a str, usize)> {
        if pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[pos..];
        match rest.find('\n') {
            Some(i) => Some((rest[..i].trim_end_matches('\r'), pos + i + 1)),
            None => Some((rest, self.text.len())),
        }
    }
}

fn header_name(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('>')?;
    let open = rest.find('<')? + 1;
    let close = rest[open..].find('>')?;
    Some(&rest[open..open + close])
}

impl<'a> Iterator for DataFields<'a> {
    type Item = DataField<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((line, after)) = self.line_at(self.pos) {
            self.pos = after;
            let Some(name) = header_name(line) else {
                continue;
            };

            let value_start = self.pos;
            let mut value_end = self.pos;
            while let Some((line, after)) = self.line_at(self.pos) {
                if line.trim().is_empty() {
                    self.pos = after;
                    break;
                }
                if line.starts_with('>') || line == RECORD_DELIMITER {
                    break;
                }
                self.pos = after;
                value_end = after;
            }

            let value = self.text[value_start..value_end]
                .trim_end_matches(|c| c == '\r' || c == '\n');
            return Some(DataField { name, value });
        }
        None
    }
}
