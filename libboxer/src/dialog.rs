use crate::error::Result;
use crate::platform;
use crate::{BoxerButtons, BoxerSelection, BoxerStyle};
use std::borrow::Cow;
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Everything a toolkit needs to present one modal message box.
#[derive(Debug, Clone)]
pub struct DialogRequest<'a> {
    pub message: Cow<'a, CStr>,
    pub title: Cow<'a, CStr>,
    pub style: BoxerStyle,
    pub buttons: BoxerButtons,
}

impl<'a> DialogRequest<'a> {
    pub fn new(
        message: impl Into<Cow<'a, CStr>>,
        title: impl Into<Cow<'a, CStr>>,
        style: BoxerStyle,
        buttons: BoxerButtons,
    ) -> Self {
        Self {
            message: message.into(),
            title: title.into(),
            style,
            buttons,
        }
    }

    /// Builds a request from raw C arguments. Null strings are read as empty.
    ///
    /// # Safety
    /// Non-null `message` and `title` must point to null-terminated strings
    /// that stay valid for `'a`.
    pub unsafe fn from_raw(
        message: *const c_char,
        title: *const c_char,
        style: c_int,
        buttons: c_int,
    ) -> Self {
        Self::new(
            borrow_c_str(message),
            borrow_c_str(title),
            BoxerStyle::from_raw(style),
            BoxerButtons::from_raw(buttons),
        )
    }
}

unsafe fn borrow_c_str<'a>(string: *const c_char) -> &'a CStr {
    if string.is_null() {
        c""
    } else {
        CStr::from_ptr(string)
    }
}

/// A native toolkit able to run a blocking modal message box.
pub trait DialogToolkit {
    /// Brings the toolkit up if it is not already. Must be idempotent.
    fn initialize(&mut self) -> Result<()>;

    /// Creates the dialog, blocks until the user answers and destroys every
    /// window it created before returning.
    fn present(&mut self, request: &DialogRequest<'_>) -> Result<BoxerSelection>;
}

impl<T: DialogToolkit + ?Sized> DialogToolkit for &mut T {
    fn initialize(&mut self) -> Result<()> {
        (**self).initialize()
    }

    fn present(&mut self, request: &DialogRequest<'_>) -> Result<BoxerSelection> {
        (**self).present(request)
    }
}

/// Runs a single dialog on the given toolkit. Any failure is reported as
/// [`BoxerSelection::Error`]; no window is created when initialization fails.
pub fn show_dialog(
    mut toolkit: impl DialogToolkit,
    request: &DialogRequest<'_>,
) -> BoxerSelection {
    if let Err(error) = toolkit.initialize() {
        warn!("Could not show {:?} dialog: {}", request.style, error);
        return BoxerSelection::Error;
    }

    match toolkit.present(request) {
        Ok(selection) => {
            debug!(
                "Dialog {:?} with {:?} buttons answered with {:?}",
                request.title, request.buttons, selection
            );
            selection
        }
        Err(error) => {
            warn!("Could not show {:?} dialog: {}", request.style, error);
            BoxerSelection::Error
        }
    }
}

/// Shows the request with this platform's native toolkit.
pub fn show_native(request: &DialogRequest<'_>) -> BoxerSelection {
    let result = catch_unwind(AssertUnwindSafe(|| {
        platform::with_native_toolkit(|toolkit| show_dialog(toolkit, request))
    }));

    result.unwrap_or_else(|_| {
        error!("Native dialog panicked, reporting an error selection");
        BoxerSelection::Error
    })
}

/// Blocking call that shows a modal message box and waits for the user's answer.
#[no_mangle]
pub unsafe extern "C" fn boxer_show(
    message: *const c_char,
    title: *const c_char,
    style: c_int,
    buttons: c_int,
) -> BoxerSelection {
    let request = DialogRequest::from_raw(message, title, style, buttons);
    show_native(&request)
}
