//! DXF file reader

mod section_reader;
mod stream_reader;
mod text_reader;

pub use section_reader::SectionReader;
pub use stream_reader::{DxfCodePair, DxfStreamReader};
pub use text_reader::DxfTextReader;

use crate::error::{DxfError, Result};
use crate::io::dxf::code_page::encoding_from_code_page;
use crate::io::dxf::DxfCode;
use crate::notification::{Notification, NotificationType};
use crate::tables::{LayerNamePolicy, LayerRegistry};
use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Configuration for the DXF reader.
#[derive(Debug, Clone)]
pub struct DxfReaderConfiguration {
    /// When `true`, non-empty input without any top-level `SECTION` or `EOF`
    /// marker is rejected with [`DxfError::MissingMarker`]. When `false` it
    /// reads as an empty registry.
    ///
    /// Default: `true`.
    pub strict: bool,

    /// Commit the last entity of an ENTITIES section that runs out of input
    /// before its `ENDSEC`.
    ///
    /// Default: `false` (the entity is dropped and reported).
    pub flush_unterminated_entities: bool,

    /// Cleaning applied to layer names before they become registry keys.
    pub layer_names: LayerNamePolicy,

    /// Decoding for input that is not valid UTF-8. `None` means Latin-1
    /// (byte-to-char).
    pub encoding: Option<&'static Encoding>,
}

impl Default for DxfReaderConfiguration {
    fn default() -> Self {
        Self {
            strict: true,
            flush_unterminated_entities: false,
            layer_names: LayerNamePolicy::Verbatim,
            encoding: None,
        }
    }
}

impl DxfReaderConfiguration {
    /// Accept non-DXF input as an empty document.
    pub fn lenient() -> Self {
        Self {
            strict: false,
            ..Self::default()
        }
    }

    /// Set strict mode
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set whether an unterminated trailing entity is kept
    pub fn flush_unterminated_entities(mut self, flush: bool) -> Self {
        self.flush_unterminated_entities = flush;
        self
    }

    /// Set the layer name policy
    pub fn layer_names(mut self, policy: LayerNamePolicy) -> Self {
        self.layer_names = policy;
        self
    }

    /// Set the fallback encoding
    pub fn encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the fallback encoding from a DXF code page name such as
    /// `ANSI_1252`. Unknown names leave the Latin-1 fallback in place.
    pub fn with_code_page(mut self, code_page: &str) -> Self {
        if let Some(encoding) = encoding_from_code_page(code_page) {
            self.encoding = Some(encoding);
        } else {
            tracing::warn!(code_page, "unknown DXF code page; keeping Latin-1 fallback");
        }
        self
    }
}

/// Where the reader's lines come from.
enum Source {
    Bytes(Vec<u8>),
    Lines(Vec<String>),
}

/// Top-level section of a DXF document, as far as this reader cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Tables,
    Entities,
    Unknown,
}

impl SectionKind {
    fn from_name(name: &str) -> Self {
        match name {
            "TABLES" => SectionKind::Tables,
            "ENTITIES" => SectionKind::Entities,
            _ => SectionKind::Unknown,
        }
    }
}

/// ASCII DXF reader producing a [`LayerRegistry`].
///
/// The input is loaded when the reader is created, so I/O failures surface
/// from the constructor and [`read`](Self::read) only parses. A reader is
/// used once.
///
/// ```rust
/// use dxf_survey::DxfReader;
///
/// let text = "0\nSECTION\n2\nENTITIES\n0\nPOINT\n8\nTOPO\n10\n1.0\n0\nENDSEC\n0\nEOF\n";
/// let layers = DxfReader::from_text(text).read()?;
/// assert_eq!(layers.get("TOPO").unwrap().entity_count(), 1);
/// # Ok::<(), dxf_survey::DxfError>(())
/// ```
pub struct DxfReader {
    source: Source,
    config: DxfReaderConfiguration,
}

impl DxfReader {
    /// Create a new DXF reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "loaded DXF file");
        Ok(Self::from_source(Source::Bytes(bytes)))
    }

    /// Create a new DXF reader from any reader, reading it to the end
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(Self::from_source(Source::Bytes(bytes)))
    }

    /// Create a new DXF reader over in-memory text
    pub fn from_text(text: &str) -> Self {
        Self::from_source(Source::Bytes(text.as_bytes().to_vec()))
    }

    /// Create a new DXF reader over already split lines
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_source(Source::Lines(lines.into_iter().map(Into::into).collect()))
    }

    fn from_source(source: Source) -> Self {
        Self {
            source,
            config: DxfReaderConfiguration::default(),
        }
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: DxfReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the document and return its layers.
    pub fn read(self) -> Result<LayerRegistry> {
        let DxfReader { source, config } = self;
        match source {
            Source::Bytes(bytes) => {
                let text = decode(&bytes, config.encoding);
                read_layers(&mut DxfTextReader::new(text.lines()), &config)
            }
            Source::Lines(lines) => read_layers(&mut DxfTextReader::new(lines), &config),
        }
    }
}

/// Decode input bytes: UTF-8 when valid, otherwise the configured encoding
/// or Latin-1.
fn decode<'a>(bytes: &'a [u8], encoding: Option<&'static Encoding>) -> Cow<'a, str> {
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => match encoding {
            Some(encoding) => encoding.decode_without_bom_handling(bytes).0,
            // Latin-1 is a 1:1 mapping of bytes 0-255 to Unicode code points
            None => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
        },
    }
}

/// Run the top-level section loop over a token cursor.
fn read_layers(reader: &mut dyn DxfStreamReader, config: &DxfReaderConfiguration) -> Result<LayerRegistry> {
    let mut registry = LayerRegistry::with_policy(config.layer_names);
    let mut saw_tokens = false;
    let mut saw_marker = false;

    while let Some(pair) = reader.read_pair() {
        // Blank lines alone do not make a document
        if pair.code.is_some() || !pair.value.is_empty() {
            saw_tokens = true;
        }

        if pair.is_marker("SECTION") {
            saw_marker = true;
            // A missing name reads as an unknown section
            let section_name = reader
                .read_if_code(DxfCode::Name)
                .map(|name| name.value)
                .unwrap_or_default();
            tracing::debug!(section = %section_name, line = pair.line, "reading section");

            let mut section_reader = SectionReader::new(&mut *reader, &mut registry, config);
            match SectionKind::from_name(&section_name) {
                SectionKind::Tables => section_reader.read_tables(),
                SectionKind::Entities => section_reader.read_entities(),
                SectionKind::Unknown => section_reader.skip_section(&section_name, pair.line),
            }
        } else if pair.is_marker("EOF") {
            saw_marker = true;
        }
    }

    if saw_tokens && !saw_marker {
        let lines = reader.line_number();
        if config.strict {
            return Err(DxfError::MissingMarker {
                expected: "SECTION or EOF",
                lines,
            });
        }
        registry.notifications_mut().notify(
            NotificationType::Error,
            format!("no SECTION or EOF marker in {} line(s); not a DXF document", lines),
        );
    }

    if let Some(line) = reader.dangling_line() {
        registry.notifications_mut().push(
            Notification::new(
                NotificationType::Error,
                "group code line has no value line; read as empty value",
            )
            .at_line(line),
        );
    }

    tracing::info!(
        layers = registry.len(),
        entities = registry.entity_count(),
        notifications = registry.notifications().len(),
        "DXF read complete"
    );
    Ok(registry)
}
