//! Frame-number overlay node for node-graph image hosts.
//!
//! Takes a batch of decoded frames and stamps each one with a configurable
//! frame-number label (prefix, zero padding, font, anchor, optional outline
//! stroke). The transform is pure and synchronous: the input batch is never
//! mutated and a new batch of identical shape comes back.

pub mod data_types;
mod error;
pub mod fonts;
pub mod node;
pub mod overlay;

pub use error::{OverlayError, Result};
pub use overlay::{FrameNumberOverlay, OverlayConfig};
