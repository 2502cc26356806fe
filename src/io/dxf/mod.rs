//! DXF (Drawing Exchange Format) reading, ASCII flavour only

pub mod code_page;
mod dxf_code;
mod reader;

pub use code_page::encoding_from_code_page;
pub use dxf_code::DxfCode;
pub use reader::{
    DxfCodePair, DxfReader, DxfReaderConfiguration, DxfStreamReader, DxfTextReader, SectionReader,
};
