//! Terminal palette for dumps, traces and rendered trees.

/// Escape sequences, or empty strings when color is off.
///
/// Sticks to the basic 16-color codes. Rule names and labels are blue,
/// matched text green, structure dim.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    pub blue: &'static str,
    pub green: &'static str,
    pub dim: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub const ON: Self = Self {
        blue: "\x1b[34m",
        green: "\x1b[32m",
        dim: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        blue: "",
        green: "",
        dim: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        match enabled {
            true => Self::ON,
            false => Self::OFF,
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}
