//! # Input Module
//!
//! Input acceptance for a merge: classifying files by extension, holding their
//! content (in memory or on disk), and collecting them into an ordered,
//! de-duplicated [`InputBatch`].
//!
//! ```rust
//! use sdfmerge::input::{InputBatch, InputFile};
//!
//! let mut batch = InputBatch::new();
//! batch.add(InputFile::from_bytes("a.sdf", "mol\nM  END\n$$$$\n")?)?;
//!
//! // Same name and size: rejected before any merge runs
//! assert!(batch.add(InputFile::from_bytes("a.sdf", "mol\nM  END\n$$$$\n")?).is_err());
//!
//! // Unsupported extension: rejected when the file is created
//! assert!(InputFile::from_bytes("notes.txt", "hello").is_err());
//! # Ok::<(), sdfmerge::input::InputError>(())
//! ```

mod batch;
mod error;
mod file;
mod kind;


pub use batch::InputBatch;
pub use error::InputError;
pub use file::{FileSource, InputFile};
pub use kind::{FileKind, ARCHIVE_EXTENSIONS, STRUCTURE_EXTENSIONS};
