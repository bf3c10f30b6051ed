//! UI layer for meshpick using egui.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::cast_possible_truncation)]

pub mod integration;
pub mod panels;
pub mod popup;

pub use integration::{EguiIntegration, UiFrame};
pub use panels::*;
pub use popup::InfoPopup;
