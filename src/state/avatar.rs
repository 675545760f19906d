//! Which image the avatar currently shows, and ownership of the object URL
//! behind a locally picked file.
//!
//! At most one [`ObjectUrl`] is alive at a time. Every transition drops the
//! previous one (revoking it) before anything new is minted.

#[cfg(test)]
#[path = "avatar_test.rs"]
mod avatar_test;

use crate::dom::ObjectUrl;
use crate::error::Result;

/// Alt text for the original or a remote avatar.
pub const DEFAULT_ALT: &str = "User avatar";
/// Alt text for a local file with no usable name.
pub const UPLOADED_ALT: &str = "Uploaded avatar";

#[derive(Debug)]
pub enum AvatarSource {
    /// The `src` the page shipped with.
    Original,
    /// A user-supplied URL.
    Remote(String),
    /// A locally selected file.
    Local(ObjectUrl),
}

#[derive(Debug)]
pub struct AvatarState {
    original_src: String,
    current: AvatarSource,
}

impl AvatarState {
    #[must_use]
    pub fn new(original_src: impl Into<String>) -> Self {
        Self { original_src: original_src.into(), current: AvatarSource::Original }
    }

    /// The `src` the image should carry.
    #[must_use]
    pub fn src(&self) -> &str {
        match &self.current {
            AvatarSource::Original => &self.original_src,
            AvatarSource::Remote(url) => url,
            AvatarSource::Local(object_url) => object_url.as_str(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &AvatarSource {
        &self.current
    }

    #[must_use]
    pub fn original_src(&self) -> &str {
        &self.original_src
    }

    /// Show a remote URL, revoking any local object URL.
    pub fn set_remote(&mut self, url: impl Into<String>) {
        self.release();
        self.current = AvatarSource::Remote(url.into());
    }

    /// Revoke any local object URL, then show a freshly minted one.
    ///
    /// If minting fails the previous local image is already gone and the
    /// state falls back to the original; a remote URL is kept.
    pub fn set_local(&mut self, mint: impl FnOnce() -> Result<ObjectUrl>) -> Result<()> {
        self.release();
        self.current = AvatarSource::Local(mint()?);
        Ok(())
    }

    /// Back to the original image, revoking any local object URL.
    pub fn reset(&mut self) {
        self.current = AvatarSource::Original;
    }

    fn release(&mut self) {
        if matches!(self.current, AvatarSource::Local(_)) {
            self.current = AvatarSource::Original;
        }
    }
}
