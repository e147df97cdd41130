//! Fullscreen PDF slideshow.
//!
//! Pages are shown one at a time or as facing pairs, scaled to a fixed
//! viewport. Clicks, the space bar, the mouse wheel and a position slider all
//! drive a single [`navigation::Navigation`] through the [`presenter::Presenter`].

pub mod app;
pub mod config;
pub mod input;
pub mod layout;
pub mod navigation;
pub mod page_group;
pub mod presenter;
pub mod renderer;
