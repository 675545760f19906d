//! SweetAlert2 driver for the browser.
//!
//! Looks `window.Swal` up on every call, so a library that finishes loading
//! after the widgets mount is still picked up.

use js_sys::{Function, JSON, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use super::{DialogOptions, Dialogs, OnDismiss};
use crate::error::{Error, Result};

const GLOBAL: &str = "Swal";

/// [`Dialogs`] backed by `window.Swal` and `window.alert`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweetAlert;

impl SweetAlert {
    fn library() -> Option<JsValue> {
        let window = web_sys::window()?;
        match Reflect::get(&window, &JsValue::from_str(GLOBAL)) {
            Ok(swal) if !swal.is_undefined() && !swal.is_null() => Some(swal),
            _ => None,
        }
    }
}

impl Dialogs for SweetAlert {
    fn available(&self) -> bool {
        Self::library().is_some()
    }

    fn fire(&self, options: &DialogOptions, on_dismiss: OnDismiss) -> Result<()> {
        let swal = Self::library().ok_or_else(|| Error::Dialog(format!("window.{GLOBAL} is not loaded")))?;
        let fire = Reflect::get(&swal, &JsValue::from_str("fire"))
            .map_err(js_error)?
            .dyn_into::<Function>()
            .map_err(|_| Error::Dialog(format!("{GLOBAL}.fire is not a function")))?;

        let raw = serde_json::to_string(options).map_err(|e| Error::Dialog(e.to_string()))?;
        let config = JSON::parse(&raw).map_err(js_error)?;
        let returned = fire.call1(&swal, &config).map_err(js_error)?;

        let Ok(promise) = returned.dyn_into::<Promise>() else {
            on_dismiss();
            return Ok(());
        };
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("{GLOBAL}.fire rejected: {err:?}");
            }
            on_dismiss();
        });
        Ok(())
    }

    fn alert(&self, text: &str) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(err) = window.alert_with_message(text) {
            log::warn!("window.alert failed: {err:?}");
        }
    }
}

fn js_error(err: JsValue) -> Error {
    Error::Dialog(format!("{err:?}"))
}
