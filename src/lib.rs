//! fastreplace: exact, binary-safe, whole-file search and replace
//!
//! Rewrites a file so that every non-overlapping occurrence of a literal byte
//! pattern is replaced by a literal byte replacement, keeping the file's
//! permission bits. Typical use is relocating build artifacts whose contents
//! embed absolute paths.
//!
//! # Architecture
//!
//! One linear pass per file:
//!
//! 1. [`SourceFile`] reads the whole file and snapshots its mode bits.
//! 2. [`matcher::find_all`] scans with a Rabin-Karp rolling hash and yields
//!    ordered, non-overlapping [`MatchOffsets`].
//! 3. [`rebuild::rebuild`] builds the output buffer at its exact final size.
//! 4. [`writer::write_replacing`] relaxes owner write if needed, writes
//!    atomically (tempfile + fsync + rename) and restores the mode bits.
//!
//! If no occurrence is found the file is never opened for writing.
//!
//! # Example
//!
//! ```no_run
//! use fastreplace::replace_in_file;
//!
//! match replace_in_file("_install/bin/tool", b"/old/store", b"/new/store") {
//!     Ok(outcome) => println!("{}", outcome),
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```

pub mod matcher;
pub mod permissions;
pub mod rebuild;
pub mod replace;
pub mod source;
pub mod sys;
pub mod writer;

// Re-exports
pub use matcher::{find, find_all, MatchOffsets, Pattern};
pub use permissions::PermissionSnapshot;
pub use replace::{replace_in_file, ReplaceError, ReplaceOutcome, Replacement};
pub use source::SourceFile;
