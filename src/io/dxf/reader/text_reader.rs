//! DXF ASCII text reader

use super::stream_reader::{DxfCodePair, DxfStreamReader};

/// Tokenizer over the lines of an ASCII DXF document.
///
/// Two lines make one [`DxfCodePair`]: a group-code line then a value line,
/// both trimmed. Lines are pulled lazily from the underlying iterator. A
/// final code line with no value line still yields a pair, with an empty
/// value; the reader never fails on truncated input.
pub struct DxfTextReader<I> {
    lines: I,
    line_number: usize,
    peeked_pair: Option<DxfCodePair>,
    dangling_line: Option<usize>,
}

impl<I, S> DxfTextReader<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    /// Create a new DXF text reader
    pub fn new<T>(lines: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            lines: lines.into_iter(),
            line_number: 0,
            peeked_pair: None,
            dangling_line: None,
        }
    }

    fn next_line(&mut self) -> Option<S> {
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line)
    }

    /// Read a code/value pair from the line source
    fn read_pair_internal(&mut self) -> Option<DxfCodePair> {
        let code_line = self.next_line()?;
        let line = self.line_number;
        let code = code_line.as_ref();
        // A UTF-8 byte order mark can only lead the first line
        let code = if line == 1 {
            code.strip_prefix('\u{feff}').unwrap_or(code)
        } else {
            code
        };

        let pair = match self.next_line() {
            Some(value_line) => DxfCodePair::from_lines(code, value_line.as_ref(), line),
            None => {
                self.dangling_line = Some(line);
                DxfCodePair::from_lines(code, "", line)
            }
        };
        Some(pair)
    }
}

impl<I, S> DxfStreamReader for DxfTextReader<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn read_pair(&mut self) -> Option<DxfCodePair> {
        // If we have a peeked pair, return it
        if let Some(pair) = self.peeked_pair.take() {
            return Some(pair);
        }

        self.read_pair_internal()
    }

    fn peek_pair(&mut self) -> Option<&DxfCodePair> {
        if self.peeked_pair.is_none() {
            self.peeked_pair = self.read_pair_internal();
        }
        self.peeked_pair.as_ref()
    }

    fn push_back(&mut self, pair: DxfCodePair) {
        debug_assert!(self.peeked_pair.is_none(), "only one pair can be pushed back");
        self.peeked_pair = Some(pair);
    }

    fn line_number(&self) -> usize {
        self.line_number
    }

    fn dangling_line(&self) -> Option<usize> {
        self.dangling_line
    }
}

impl<I, S> Iterator for DxfTextReader<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = DxfCodePair;

    fn next(&mut self) -> Option<DxfCodePair> {
        self.read_pair()
    }
}
