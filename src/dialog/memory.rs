//! Recording [`Dialogs`] for tests.

use std::cell::RefCell;
use std::rc::Rc;

use super::{DialogOptions, Dialogs, OnDismiss};
use crate::error::{Error, Result};

#[derive(Default)]
struct Log {
    fired: Vec<DialogOptions>,
    alerts: Vec<String>,
    open: Vec<OnDismiss>,
    unavailable: bool,
    broken: bool,
}

/// Records every dialog and alert; dismissal is driven by the test.
#[derive(Clone, Default)]
pub struct MemoryDialogs {
    log: Rc<RefCell<Log>>,
}

impl MemoryDialogs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A page where the dialog library never loaded.
    #[must_use]
    pub fn unavailable() -> Self {
        let dialogs = Self::default();
        dialogs.log.borrow_mut().unavailable = true;
        dialogs
    }

    /// A library that is present but rejects every call.
    #[must_use]
    pub fn broken() -> Self {
        let dialogs = Self::default();
        dialogs.log.borrow_mut().broken = true;
        dialogs
    }

    #[must_use]
    pub fn fired(&self) -> Vec<DialogOptions> {
        self.log.borrow().fired.clone()
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.log.borrow().alerts.clone()
    }

    /// Dialogs shown and not yet dismissed.
    #[must_use]
    pub fn open_count(&self) -> usize {
        self.log.borrow().open.len()
    }

    /// Close the oldest open dialog, running its callback. Returns `false`
    /// when nothing was open.
    pub fn dismiss(&self) -> bool {
        let next = {
            let mut log = self.log.borrow_mut();
            if log.open.is_empty() { None } else { Some(log.open.remove(0)) }
        };
        match next {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }
}

impl Dialogs for MemoryDialogs {
    fn available(&self) -> bool {
        !self.log.borrow().unavailable
    }

    fn fire(&self, options: &DialogOptions, on_dismiss: OnDismiss) -> Result<()> {
        let mut log = self.log.borrow_mut();
        if log.broken {
            return Err(Error::Dialog("Swal.fire is not a function".to_owned()));
        }
        log.fired.push(options.clone());
        log.open.push(on_dismiss);
        Ok(())
    }

    fn alert(&self, text: &str) {
        self.log.borrow_mut().alerts.push(text.to_owned());
    }
}
