//! Widget state, independent of the page.
//!
//! DESIGN
//! ======
//! Each widget keeps its state in one of these small models and reflects it
//! into markup. Past install, state is never read back out of classes or attributes,
//! which keeps tests deterministic.

pub mod avatar;
pub mod contact;
pub mod disclosure;
