use std::os::raw::c_int;

/// Icon and tone of a message box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum BoxerStyle {
    Info,
    Warning,
    Error,
    Question,
}

impl BoxerStyle {
    /// Decodes a style received over the C ABI, unknown values become [`BoxerStyle::Info`].
    pub fn from_raw(value: c_int) -> Self {
        match value {
            0 => Self::Info,
            1 => Self::Warning,
            2 => Self::Error,
            3 => Self::Question,
            _ => {
                debug!("Unknown dialog style {}, falling back to Info", value);
                Self::Info
            }
        }
    }
}

impl Default for BoxerStyle {
    fn default() -> Self {
        BoxerStyle::Info
    }
}

/// Set of buttons a message box offers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum BoxerButtons {
    OK,
    OKCancel,
    YesNo,
    Quit,
}

impl BoxerButtons {
    /// Decodes a button set received over the C ABI, unknown values become [`BoxerButtons::OK`].
    pub fn from_raw(value: c_int) -> Self {
        match value {
            0 => Self::OK,
            1 => Self::OKCancel,
            2 => Self::YesNo,
            3 => Self::Quit,
            _ => {
                debug!("Unknown dialog buttons {}, falling back to OK", value);
                Self::OK
            }
        }
    }
}

impl Default for BoxerButtons {
    fn default() -> Self {
        BoxerButtons::OK
    }
}

/// Outcome of a message box.
///
/// `None` means the dialog was dismissed without pressing one of its buttons,
/// `Error` means the native toolkit could not show the dialog at all.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(u32)]
pub enum BoxerSelection {
    OK,
    Cancel,
    Yes,
    No,
    Quit,
    None,
    Error,
}

impl Default for BoxerSelection {
    fn default() -> Self {
        BoxerSelection::None
    }
}
