//! DXF stream reader trait and common types

use crate::io::dxf::DxfCode;

/// A DXF code/value pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DxfCodePair {
    /// The group code, or `None` when the code line is not an integer
    pub code: Option<i32>,

    /// Trimmed value line
    pub value: String,

    /// 1-based line number of the code line
    pub line: usize,
}

impl DxfCodePair {
    /// Create a new code/value pair from the two raw lines.
    pub fn from_lines(code_line: &str, value_line: &str, line: usize) -> Self {
        Self {
            code: code_line.trim().parse::<i32>().ok(),
            value: value_line.trim().to_string(),
            line,
        }
    }

    /// Create a pair with a known code.
    pub fn new(code: i32, value: impl Into<String>, line: usize) -> Self {
        Self {
            code: Some(code),
            value: value.into(),
            line,
        }
    }

    /// Check the group code
    pub fn has_code(&self, code: DxfCode) -> bool {
        self.code == Some(code.as_i32())
    }

    /// A group-0 record marker such as `SECTION` or `ENDTAB`
    pub fn is_marker(&self, name: &str) -> bool {
        self.has_code(DxfCode::Start) && self.value == name
    }

    /// Any group-0 record marker
    pub fn is_start(&self) -> bool {
        self.has_code(DxfCode::Start)
    }

    /// Get value as string
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Get value as i32
    pub fn as_i32(&self) -> Option<i32> {
        self.value.parse().ok()
    }

    /// Get value as double
    pub fn as_f64(&self) -> Option<f64> {
        self.value.parse().ok()
    }
}

/// Cursor over DXF code/value pairs.
///
/// Reading is a single forward pass. The only way back is [`push_back`],
/// which returns one pair to the cursor so an enclosing loop sees the marker
/// that ended an inner one.
///
/// [`push_back`]: DxfStreamReader::push_back
pub trait DxfStreamReader {
    /// Read the next code/value pair
    fn read_pair(&mut self) -> Option<DxfCodePair>;

    /// Look at the next pair without consuming it
    fn peek_pair(&mut self) -> Option<&DxfCodePair>;

    /// Push a pair back to be read again on the next `read_pair` call.
    ///
    /// At most one pair may be pending; pushing a second one before it is
    /// read again is a logic error.
    fn push_back(&mut self, pair: DxfCodePair);

    /// Number of input lines consumed so far
    fn line_number(&self) -> usize;

    /// Line of a final group-code line that had no value line, if any
    fn dangling_line(&self) -> Option<usize>;

    /// Read the next pair only if it carries `code`.
    fn read_if_code(&mut self, code: DxfCode) -> Option<DxfCodePair> {
        if self.peek_pair().is_some_and(|pair| pair.has_code(code)) {
            self.read_pair()
        } else {
            None
        }
    }
}
