//! Utility helpers shared across widgets.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pure string helpers live here so they can be tested without a page.

pub mod html;
