//! # DeckForge Core
//!
//! Core slide composition logic: the typed element model, the single
//! style-and-content resolver shared by every render path, the canvas
//! interaction controller, and the slide store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                 deck-core                   │
//! ├─────────────────────────────────────────────┤
//! │  Element Model    │  Interaction Controller │
//! │  - Tagged variants│  - Selection/hover      │
//! │  - Style/config   │  - Drag/resize/snap     │
//! │  - Slide document │  - Zoom ladder          │
//! ├─────────────────────────────────────────────┤
//! │  Resolver         │  Slide Store            │
//! │  - Default chain  │  - Snapshot writes      │
//! │  - Brand overlay  │  - JSON persistence     │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The resolver is the correctness keystone: the interactive renderer and
//! the static renderer both consume [`resolve::resolve_element`], so the
//! editor and exported documents cannot drift apart visually.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod brand;
pub mod element;
pub mod error;
pub mod interaction;
pub mod resolve;
pub mod schema;
pub mod slide;
pub mod store;

pub use brand::{BrandColorRole, BrandKit};
pub use element::{
    BrandBindings, ConfigPatch, DataConfig, DataFormat, Dimension, Element, ElementId,
    ElementKind, ElementPatch, ImageConfig, ImageStyle, MediaType, ObjectFit, Position,
    PositionPatch, ShapeConfig, ShapeKind, ShapeStyle, Size, SizePatch, StylePatch, TextAlign,
    TextConfig, TextStyle,
};
pub use error::{DeckError, DeckResult};
pub use interaction::{
    EditorSession, GridSettings, GuideSettings, InteractionState, PaletteItem, ResizeHandle,
    ZOOM_LEVELS,
};
pub use resolve::{
    resolve_element, resolve_slide, ResolveContext, ResolvedElement, ResolvedImage, ResolvedShape,
    ResolvedSize, ResolvedText, ResolvedVisual, SlotStyling,
};
pub use schema::{ElementDocument, SlideDocument};
pub use slide::{Background, CanvasSize, Slide, SlideId};
pub use store::{SlideStore, StoreError};

/// Deck core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
