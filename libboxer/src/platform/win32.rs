#![cfg_attr(not(windows_platform), allow(dead_code))]

#[cfg(windows_platform)]
use crate::error::DialogError;
use crate::error::Result;
use crate::{BoxerButtons, BoxerSelection, BoxerStyle};
use std::ffi::CStr;

pub const MB_OK: u32 = 0x0000_0000;
pub const MB_OKCANCEL: u32 = 0x0000_0001;
pub const MB_YESNO: u32 = 0x0000_0004;
pub const MB_ICONERROR: u32 = 0x0000_0010;
pub const MB_ICONQUESTION: u32 = 0x0000_0020;
pub const MB_ICONWARNING: u32 = 0x0000_0030;
pub const MB_ICONINFORMATION: u32 = 0x0000_0040;
pub const MB_TASKMODAL: u32 = 0x0000_2000;

pub const IDOK: i32 = 1;
pub const IDCANCEL: i32 = 2;
pub const IDYES: i32 = 6;
pub const IDNO: i32 = 7;

pub fn icon(style: BoxerStyle) -> u32 {
    match style {
        BoxerStyle::Info => MB_ICONINFORMATION,
        BoxerStyle::Warning => MB_ICONWARNING,
        BoxerStyle::Error => MB_ICONERROR,
        BoxerStyle::Question => MB_ICONQUESTION,
    }
}

pub fn buttons(buttons: BoxerButtons) -> u32 {
    match buttons {
        BoxerButtons::OK => MB_OK,
        BoxerButtons::OKCancel => MB_OKCANCEL,
        BoxerButtons::YesNo => MB_YESNO,
        // MessageBox has no quit button, the OK button stands in for it
        BoxerButtons::Quit => MB_OK,
    }
}

pub fn flags(style: BoxerStyle, buttons_set: BoxerButtons) -> u32 {
    MB_TASKMODAL | icon(style) | buttons(buttons_set)
}

pub fn selection(response: i32, buttons: BoxerButtons) -> BoxerSelection {
    match response {
        IDOK if buttons == BoxerButtons::Quit => BoxerSelection::Quit,
        IDOK => BoxerSelection::OK,
        IDCANCEL => BoxerSelection::Cancel,
        IDYES => BoxerSelection::Yes,
        IDNO => BoxerSelection::No,
        _ => BoxerSelection::None,
    }
}

/// Converts UTF-8 input into a null-terminated UTF-16 string for the `W` APIs.
/// Malformed sequences become U+FFFD.
#[cfg(windows_platform)]
pub fn to_wide(argument: &'static str, text: &CStr) -> Result<Vec<u16>> {
    use windows::Win32::Globalization::{
        MultiByteToWideChar, CP_UTF8, MULTI_BYTE_TO_WIDE_CHAR_FLAGS,
    };

    let bytes = text.to_bytes_with_nul();
    let flags = MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0);

    // SAFETY: `bytes` is a valid slice and the first call only measures.
    let length = unsafe { MultiByteToWideChar(CP_UTF8, flags, bytes, None) };
    if length <= 0 {
        return Err(DialogError::text_encoding(
            argument,
            windows::core::Error::from_win32(),
        ));
    }

    let mut wide = vec![0u16; length as usize];
    // SAFETY: `wide` has room for the `length` units measured above.
    let written = unsafe { MultiByteToWideChar(CP_UTF8, flags, bytes, Some(&mut wide)) };
    if written <= 0 {
        return Err(DialogError::text_encoding(
            argument,
            windows::core::Error::from_win32(),
        ));
    }
    wide.truncate(written as usize);
    Ok(wide)
}

/// Converts UTF-8 input into a null-terminated UTF-16 string for the `W` APIs.
/// Malformed sequences become U+FFFD.
#[cfg(not(windows_platform))]
pub fn to_wide(_argument: &'static str, text: &CStr) -> Result<Vec<u16>> {
    Ok(text
        .to_string_lossy()
        .encode_utf16()
        .chain(std::iter::once(0))
        .collect())
}

#[cfg(windows_platform)]
pub use toolkit::{with_toolkit, Win32Toolkit};

#[cfg(windows_platform)]
mod toolkit {
    use super::*;
    use crate::dialog::{DialogRequest, DialogToolkit};
    use parking_lot::Mutex;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::HWND;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MESSAGEBOX_STYLE};

    static WIN32: Mutex<Win32Toolkit> = Mutex::new(Win32Toolkit);

    /// Runs `f` with exclusive access to the Win32 dialog toolkit.
    pub fn with_toolkit<R>(f: impl FnOnce(&mut dyn DialogToolkit) -> R) -> R {
        let mut toolkit = WIN32.lock();
        f(&mut *toolkit)
    }

    /// user32 is always available, there is nothing to initialize.
    pub struct Win32Toolkit;

    impl DialogToolkit for Win32Toolkit {
        fn initialize(&mut self) -> Result<()> {
            Ok(())
        }

        fn present(&mut self, request: &DialogRequest<'_>) -> Result<BoxerSelection> {
            let message = to_wide("message", &request.message)?;
            let title = to_wide("title", &request.title)?;

            // SAFETY: both strings are null-terminated and outlive the call.
            let response = unsafe {
                MessageBoxW(
                    HWND::default(),
                    PCWSTR(message.as_ptr()),
                    PCWSTR(title.as_ptr()),
                    MESSAGEBOX_STYLE(flags(request.style, request.buttons)),
                )
            };

            Ok(selection(response.0, request.buttons))
        }
    }
}
