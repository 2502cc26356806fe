//! Shared test utilities for dxf-survey integration tests.
//!
//! Test crates import this via `mod common;`. It builds DXF text in memory
//! and manages temporary files for the file-based tests.

#![allow(dead_code)]

use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Builds ASCII DXF text one group-code/value pair at a time.
///
/// Code lines are right-aligned to three columns the way AutoCAD writes them,
/// so every test also exercises line trimming.
#[derive(Debug, Default, Clone)]
pub struct DxfBuilder {
    lines: Vec<String>,
}

impl DxfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one pair
    pub fn pair(mut self, code: i32, value: impl Display) -> Self {
        self.lines.push(format!("{:>3}", code));
        self.lines.push(value.to_string());
        self
    }

    /// Append a raw line (for malformed input)
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn section(self, name: &str) -> Self {
        self.pair(0, "SECTION").pair(2, name)
    }

    pub fn end_section(self) -> Self {
        self.pair(0, "ENDSEC")
    }

    /// A complete HEADER section with a version variable
    pub fn header(self) -> Self {
        self.section("HEADER")
            .pair(9, "$ACADVER")
            .pair(1, "AC1015")
            .pair(9, "$EXTMIN")
            .pair(10, "0.0")
            .pair(20, "0.0")
            .pair(30, "0.0")
            .end_section()
    }

    /// One LAYER table record, with the usual subclass markers
    pub fn layer_record(self, name: &str, color: i32, line_type: &str) -> Self {
        self.pair(0, "LAYER")
            .pair(5, "10")
            .pair(100, "AcDbSymbolTableRecord")
            .pair(100, "AcDbLayerTableRecord")
            .pair(2, name)
            .pair(70, 0)
            .pair(62, color)
            .pair(6, line_type)
    }

    /// A complete TABLES section holding one LAYER table
    pub fn layer_tables(self, layers: &[(&str, i32, &str)]) -> Self {
        let mut builder = self
            .section("TABLES")
            .pair(0, "TABLE")
            .pair(2, "LAYER")
            .pair(70, layers.len());
        for (name, color, line_type) in layers {
            builder = builder.layer_record(name, *color, line_type);
        }
        builder.pair(0, "ENDTAB").end_section()
    }

    /// One entity with its layer tag placed after the subclass marker
    pub fn entity(self, entity_type: &str, layer: &str, fields: &[(i32, &str)]) -> Self {
        let mut builder = self
            .pair(0, entity_type)
            .pair(100, "AcDbEntity")
            .pair(8, layer);
        for (code, value) in fields {
            builder = builder.pair(*code, value);
        }
        builder
    }

    pub fn eof(self) -> Self {
        self.pair(0, "EOF")
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn build(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// A file under the system temp directory, removed on drop.
pub struct TempDxf {
    path: PathBuf,
}

impl TempDxf {
    pub fn new(content: impl AsRef<[u8]>) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "dxf_survey_test_{}_{}.dxf",
            std::process::id(),
            n
        ));
        fs::write(&path, content).expect("write temp DXF");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDxf {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}
