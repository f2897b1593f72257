pub mod gtk;
pub mod win32;

use crate::dialog::DialogToolkit;

#[cfg(free_unix)]
pub(crate) fn with_native_toolkit<R>(f: impl FnOnce(&mut dyn DialogToolkit) -> R) -> R {
    gtk::with_toolkit(f)
}

#[cfg(windows_platform)]
pub(crate) fn with_native_toolkit<R>(f: impl FnOnce(&mut dyn DialogToolkit) -> R) -> R {
    win32::with_toolkit(f)
}

#[cfg(not(any(free_unix, windows_platform)))]
pub(crate) fn with_native_toolkit<R>(f: impl FnOnce(&mut dyn DialogToolkit) -> R) -> R {
    f(&mut UnsupportedToolkit)
}

/// Stands in on platforms without a native dialog backend; every dialog fails to initialize.
#[derive(Debug, Default)]
pub struct UnsupportedToolkit;

impl DialogToolkit for UnsupportedToolkit {
    fn initialize(&mut self) -> crate::error::Result<()> {
        Err(crate::error::DialogError::toolkit_init(anyhow::anyhow!(
            "no native dialog toolkit for {}",
            std::env::consts::OS
        )))
    }

    fn present(
        &mut self,
        _request: &crate::dialog::DialogRequest<'_>,
    ) -> crate::error::Result<crate::BoxerSelection> {
        Ok(crate::BoxerSelection::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::{show_dialog, DialogRequest};
    use crate::{BoxerButtons, BoxerSelection, BoxerStyle};

    #[test]
    fn unsupported_platform_reports_error() {
        let request = DialogRequest::new(c"Hi", c"Hi", BoxerStyle::Info, BoxerButtons::OK);
        assert_eq!(
            show_dialog(UnsupportedToolkit, &request),
            BoxerSelection::Error
        );
    }
}
