//! # EWAH Bitmap Library
//!
//! Compressed bitmaps with word-aligned hybrid run-length encoding.
//! * `ewah` holds the compressed bitmap itself, with streaming construction,
//! bit enumeration, the logical combiners (AND, OR, XOR, AND-NOT) that work
//! directly on the compressed form, and a fixed big-endian persistence format
//! * `bitmap` is the trivial uncompressed bitmap, useful as a staging buffer
//! and as a correctness oracle
//!
//! Bits can only be set in increasing order; the encoder is append-only.
//! A set bit cannot be cleared later on.
//!
//! ## Streaming Example
//!
//! ```rs
//! use ewah::ewah::EwahBitmap;
//! let mut e = EwahBitmap::new();
//! e.set(3);
//! e.set(24);
//! e.set(4242);
//! let positions: Vec<usize> = e.ones().collect();
//! ```
//!
//! ## File Example
//!
//! ```rs
//! use ewah::ewah::EwahBitmap;
//! let mut out_file = std::fs::File::create("some_output_path").expect("create failed");
//! let mut e = EwahBitmap::new();
//! e.set(1000000);
//! let bytes = e.serialize(&mut out_file).expect("serialization failed");
//! eprintln!("wrote {} bytes",bytes);
//! ```

mod tools;
mod ops;
pub mod ewah;
pub mod bitmap;

type DYNERR = Box<dyn std::error::Error>;

/// Bitmap Errors
#[derive(thiserror::Error,Debug)]
pub enum Error {
    #[error("bitmap format mismatch")]
    FormatMismatch,
    #[error("bitmap too large")]
    TooLarge
}

/// The machine word the codec is built on.  The width is part of the
/// persistence contract: files written by a 32-bit variant of the encoding
/// are not interoperable with this one.
pub type Word = u64;

/// Number of bits in a `Word`
pub const BITS_IN_WORD: usize = Word::BITS as usize;

/// A word with every bit set
pub const FULL: Word = !0;
