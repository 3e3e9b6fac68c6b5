//! Text analysis pipeline.
//!
//! This module provides the tokenizer and the tables it reads:
//! - **ascii**: Byte classification and case mapping tables
//! - **unicode**: UTF-8 decode/encode, Unicode classes and case folding
//! - **buffer**: The bounded buffer token text is written to
//! - **markup**: XML construct recognition after `<`
//! - **tokenizer**: The pull tokenizer tying them together

pub mod ascii;
pub mod buffer;
mod markup;
pub mod tokenizer;
pub mod unicode;

pub use buffer::TokenBuffer;
pub use tokenizer::{Tokenizer, TokenizerConfig};
