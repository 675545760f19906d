//! Page widgets.
//!
//! Each widget resolves its elements once in `install`, keeps its state
//! behind an `Rc`, and is driven afterwards only by the listeners it
//! registered. Widgets never reference each other; they share nothing but the
//! page.
//!
//! | Widget | Host markup |
//! |---|---|
//! | [`contact_form::ContactForm`] | `#contactForm` and its four fields |
//! | [`live_clock::LiveClock`] | `[data-testid="test-user-time"]` |
//! | [`avatar_picker::AvatarPicker`] | `.upload-wrap`, `#upload-popover`, avatar image |
//! | [`menu_toggle::MenuToggle`] | `.menu-trigger`, `.menu-links` |

pub mod avatar_picker;
pub mod contact_form;
pub mod live_clock;
pub mod menu_toggle;
