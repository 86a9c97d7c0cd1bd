//! Filesystem access for component bundles
//!
//! Provides normalized path handling, the [`FileReader`] capability used to
//! fetch file references, atomic writes and content checksums.

pub mod checksum;
pub mod error;
pub mod io;
pub mod path;
pub mod reader;

pub use error::{Error, Result};
pub use path::NormalizedPath;
pub use reader::{FILE_SCHEME, FileReader, LocalFileReader, MemoryFileReader, local_path};
