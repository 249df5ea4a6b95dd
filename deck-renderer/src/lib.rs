//! # DeckForge Renderer
//!
//! Two render paths over one resolver:
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           deck-core resolver                │
//! └──────────────┬───────────────┬──────────────┘
//!                │               │
//!     ┌──────────▼─────┐  ┌──────▼───────────┐
//!     │ Interactive    │  │ Static           │
//!     │ - view frames  │  │ - HTML fragment  │
//!     │ - decorations  │  │ - page breaks    │
//!     └────────────────┘  └──────────────────┘
//! ```
//!
//! Both renderers consume [`deck_core::resolve`] output and nothing else,
//! so live editing and document export cannot drift apart. The parity law
//! is enforced by the integration tests in `tests/parity.rs`.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod html;
pub mod interactive;

pub use error::{RenderError, RenderResult};
pub use html::{ExportOutput, ExportPage, PageMetadata, StaticRenderer};
pub use interactive::{
    Decoration, InteractiveRenderer, ScreenRect, ViewFrame, ViewNode, ViewTransform, HANDLE_SIZE,
};
