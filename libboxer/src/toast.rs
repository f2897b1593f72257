use crate::dialog::{show_dialog, show_native, DialogRequest, DialogToolkit};
use crate::{BoxerButtons, BoxerSelection, BoxerStyle};
use std::ffi::{CStr, CString};
use std::os::raw::c_int;
use string_box::StringBox;
use value_box::{ReturnBoxerResult, ValueBox, ValueBoxPointer};

const DEFAULT_TITLE: &CStr = c"untitled";

/// Builder for a native modal message box.
///
/// ```no_run
/// use Boxer::{BoxerButtons, BoxerSelection, Toast};
///
/// let answer = Toast::question()
///     .with_title("Confirm")
///     .with_message("Proceed?")
///     .with_buttons(BoxerButtons::YesNo)
///     .show();
///
/// if answer == BoxerSelection::Yes {
///     // ...
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    style: BoxerStyle,
    title: CString,
    message: CString,
    buttons: BoxerButtons,
}

impl Toast {
    pub fn new(style: BoxerStyle) -> Self {
        Self {
            style,
            title: DEFAULT_TITLE.to_owned(),
            message: CString::default(),
            buttons: BoxerButtons::OK,
        }
    }

    pub fn info() -> Self {
        Self::new(BoxerStyle::Info)
    }

    pub fn warning() -> Self {
        Self::new(BoxerStyle::Warning)
    }

    pub fn error() -> Self {
        Self::new(BoxerStyle::Error)
    }

    pub fn question() -> Self {
        Self::new(BoxerStyle::Question)
    }

    /// Sets the title. Text after an interior null byte is dropped.
    pub fn with_title(mut self, title: impl AsRef<str>) -> Self {
        self.title = to_c_string(title.as_ref());
        self
    }

    /// Sets the message. Text after an interior null byte is dropped.
    pub fn with_message(mut self, message: impl AsRef<str>) -> Self {
        self.message = to_c_string(message.as_ref());
        self
    }

    pub fn with_title_cstr(mut self, title: &CStr) -> Self {
        self.title = title.to_owned();
        self
    }

    pub fn with_message_cstr(mut self, message: &CStr) -> Self {
        self.message = message.to_owned();
        self
    }

    pub fn with_buttons(mut self, buttons: BoxerButtons) -> Self {
        self.buttons = buttons;
        self
    }

    pub fn style(&self) -> BoxerStyle {
        self.style
    }

    pub fn buttons(&self) -> BoxerButtons {
        self.buttons
    }

    pub fn title(&self) -> &CStr {
        &self.title
    }

    pub fn message(&self) -> &CStr {
        &self.message
    }

    pub fn request(&self) -> DialogRequest<'_> {
        DialogRequest::new(
            self.message.as_c_str(),
            self.title.as_c_str(),
            self.style,
            self.buttons,
        )
    }

    /// Shows the dialog with the native toolkit, blocking until the user answers.
    pub fn show(&self) -> BoxerSelection {
        show_native(&self.request())
    }

    pub fn show_with(&self, toolkit: impl DialogToolkit) -> BoxerSelection {
        show_dialog(toolkit, &self.request())
    }
}

fn to_c_string(text: &str) -> CString {
    let bytes = text.as_bytes();
    let end = bytes.iter().position(|byte| *byte == 0).unwrap_or(bytes.len());
    if end < bytes.len() {
        debug!("Truncating dialog text at an interior null byte");
    }
    // the slice holds no null bytes
    CString::new(&bytes[..end]).unwrap_or_default()
}

#[no_mangle]
pub extern "C" fn boxer_toast_new(style: c_int) -> *mut ValueBox<Toast> {
    ValueBox::new(Toast::new(BoxerStyle::from_raw(style))).into_raw()
}

#[no_mangle]
pub extern "C" fn boxer_toast_with_title(
    toast: *mut ValueBox<Toast>,
    title: *mut ValueBox<StringBox>,
) {
    title
        .with_ref(|title| toast.replace_value(|toast| toast.with_title(title.to_string())))
        .log();
}

#[no_mangle]
pub extern "C" fn boxer_toast_with_message(
    toast: *mut ValueBox<Toast>,
    message: *mut ValueBox<StringBox>,
) {
    message
        .with_ref(|message| toast.replace_value(|toast| toast.with_message(message.to_string())))
        .log();
}

#[no_mangle]
pub extern "C" fn boxer_toast_with_buttons(toast: *mut ValueBox<Toast>, buttons: c_int) {
    toast
        .replace_value(|toast| toast.with_buttons(BoxerButtons::from_raw(buttons)))
        .log();
}

/// Blocks until the user answers, must not be called from a thread that has to stay responsive.
#[no_mangle]
pub extern "C" fn boxer_toast_show(toast: *mut ValueBox<Toast>) -> BoxerSelection {
    toast
        .with_ref_ok(|toast| toast.show())
        .or_log(BoxerSelection::Error)
}

#[no_mangle]
pub extern "C" fn boxer_toast_release(toast: *mut ValueBox<Toast>) {
    toast.release();
}
