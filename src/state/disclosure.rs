//! Two-state open/closed model shared by the avatar popover and the menu.

#[cfg(test)]
#[path = "disclosure_test.rs"]
mod disclosure_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disclosure {
    #[default]
    Closed,
    Open,
}

impl Disclosure {
    #[must_use]
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }

    /// Move to `Open`. Returns `false` if already open.
    pub fn open(&mut self) -> bool {
        self.transition(Self::Open)
    }

    /// Move to `Closed`. Returns `false` if already closed.
    pub fn close(&mut self) -> bool {
        self.transition(Self::Closed)
    }

    fn transition(&mut self, to: Self) -> bool {
        let changed = *self != to;
        *self = to;
        changed
    }
}
