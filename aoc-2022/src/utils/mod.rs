//! Helpers shared across days

pub mod ocr;
pub mod parsing;
