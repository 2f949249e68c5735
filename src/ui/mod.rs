//! Rendering layer.
//!
//! This module turns the view state into element trees and keeps a live
//! [`Surface`] in sync with them. The concrete UI toolkit stays behind the
//! [`Surface`] trait; [`MemorySurface`] is the bundled in-memory implementation.
//!
//! # Architecture
//!
//! ```text
//! ViewState + rows → viewmodel → components → Element tree → Renderer → Surface
//!                                                                  ↓
//!                               Event ← Renderer::resolve ← SurfaceEvent
//! ```
//!
//! # Modules
//!
//! - [`surface`]: surface trait, element tree, in-memory surface
//! - [`renderer`]: incremental renderer and binding ownership
//! - [`components`]: element builders for toolbar, header, body and footer
//! - [`viewmodel`]: pagination, info and header-cell models
//! - [`helpers`]: escaping and class-list utilities
//! - [`theme`]: class overrides and icons

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod surface;
pub mod theme;
pub mod viewmodel;

pub use renderer::Renderer;
pub use surface::{BindingId, Element, EventKind, MemorySurface, Node, NodeHandle, Surface, SurfaceEvent};
pub use theme::ClassOverrides;
pub use viewmodel::{page_items, PageItem, PaginationModel, PAGE_WINDOW};
