//! Report generation and delivery to disk.
//!
//! # Submodules
//!
//! - [`html`]: Renders records into a self-contained HTML document (pure)
//! - [`writer`]: Atomically replaces the report file on disk
//!
//! # Output
//!
//! ```text
//! ai-news-agent/
//! └── index.html   # fully replaced on every run
//! ```

pub mod html;
pub mod writer;
