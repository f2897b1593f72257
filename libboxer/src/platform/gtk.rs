//! GTK 3 message dialogs.
//!
//! The mapping functions are plain data and compile everywhere; the toolkit
//! itself resolves GTK at runtime so the library has no link-time dependency
//! on it.
#![cfg_attr(not(free_unix), allow(dead_code))]

use crate::{BoxerButtons, BoxerSelection, BoxerStyle};
use std::os::raw::c_int;

pub type GtkMessageType = c_int;
pub type GtkButtonsType = c_int;
pub type GtkResponseType = c_int;

pub const GTK_MESSAGE_INFO: GtkMessageType = 0;
pub const GTK_MESSAGE_WARNING: GtkMessageType = 1;
pub const GTK_MESSAGE_QUESTION: GtkMessageType = 2;
pub const GTK_MESSAGE_ERROR: GtkMessageType = 3;

pub const GTK_BUTTONS_OK: GtkButtonsType = 1;
pub const GTK_BUTTONS_CLOSE: GtkButtonsType = 2;
pub const GTK_BUTTONS_YES_NO: GtkButtonsType = 4;
pub const GTK_BUTTONS_OK_CANCEL: GtkButtonsType = 5;

pub const GTK_RESPONSE_NONE: GtkResponseType = -1;
pub const GTK_RESPONSE_DELETE_EVENT: GtkResponseType = -4;
pub const GTK_RESPONSE_OK: GtkResponseType = -5;
pub const GTK_RESPONSE_CANCEL: GtkResponseType = -6;
pub const GTK_RESPONSE_CLOSE: GtkResponseType = -7;
pub const GTK_RESPONSE_YES: GtkResponseType = -8;
pub const GTK_RESPONSE_NO: GtkResponseType = -9;

pub fn message_type(style: BoxerStyle) -> GtkMessageType {
    match style {
        BoxerStyle::Info => GTK_MESSAGE_INFO,
        BoxerStyle::Warning => GTK_MESSAGE_WARNING,
        BoxerStyle::Error => GTK_MESSAGE_ERROR,
        BoxerStyle::Question => GTK_MESSAGE_QUESTION,
    }
}

pub fn buttons_type(buttons: BoxerButtons) -> GtkButtonsType {
    match buttons {
        BoxerButtons::OK => GTK_BUTTONS_OK,
        BoxerButtons::OKCancel => GTK_BUTTONS_OK_CANCEL,
        BoxerButtons::YesNo => GTK_BUTTONS_YES_NO,
        BoxerButtons::Quit => GTK_BUTTONS_CLOSE,
    }
}

/// GTK has a dedicated close button, so no button context is needed.
pub fn selection(response: GtkResponseType) -> BoxerSelection {
    match response {
        GTK_RESPONSE_OK => BoxerSelection::OK,
        GTK_RESPONSE_CANCEL => BoxerSelection::Cancel,
        GTK_RESPONSE_YES => BoxerSelection::Yes,
        GTK_RESPONSE_NO => BoxerSelection::No,
        GTK_RESPONSE_CLOSE => BoxerSelection::Quit,
        _ => BoxerSelection::None,
    }
}

#[cfg(free_unix)]
pub use toolkit::{with_toolkit, GtkToolkit};

#[cfg(free_unix)]
mod toolkit {
    use super::*;
    use crate::dialog::{DialogRequest, DialogToolkit};
    use crate::error::{DialogError, Result};
    use crate::library::{self, symbol};
    use anyhow::anyhow;
    use libloading::Library;
    use parking_lot::Mutex;
    use std::ffi::CStr;
    use std::os::raw::{c_char, c_void};
    use std::ptr;

    const GTK_LIBRARY_VARIABLE: &str = "BOXER_GTK_LIBRARY";
    const GTK_LIBRARY_NAMES: [&str; 2] = ["libgtk-3.so.0", "libgtk-3.so"];

    const GTK_WINDOW_TOPLEVEL: c_int = 0;
    const GTK_DIALOG_MODAL: c_int = 1;

    type GBoolean = c_int;
    pub(super) type GtkWidget = c_void;

    type GtkInitCheck = unsafe extern "C" fn(*mut c_int, *mut *mut *mut c_char) -> GBoolean;
    type GtkWindowNew = unsafe extern "C" fn(c_int) -> *mut GtkWidget;
    type GtkMessageDialogNew = unsafe extern "C" fn(
        *mut GtkWidget,
        c_int,
        GtkMessageType,
        GtkButtonsType,
        *const c_char,
        ...
    ) -> *mut GtkWidget;
    type GtkWindowSetTitle = unsafe extern "C" fn(*mut GtkWidget, *const c_char);
    type GtkDialogRun = unsafe extern "C" fn(*mut GtkWidget) -> GtkResponseType;
    type GtkWidgetDestroy = unsafe extern "C" fn(*mut GtkWidget);
    type GMainContextIteration = unsafe extern "C" fn(*mut c_void, GBoolean) -> GBoolean;

    static GTK: Mutex<GtkToolkit> = Mutex::new(GtkToolkit::new());

    /// Runs `f` with exclusive access to the process-wide GTK toolkit.
    pub fn with_toolkit<R>(f: impl FnOnce(&mut dyn DialogToolkit) -> R) -> R {
        let mut toolkit = GTK.lock();
        f(&mut *toolkit)
    }

    /// The GTK entry points a message dialog goes through.
    pub(super) trait GtkCalls: Send {
        unsafe fn init_check(&self) -> bool;
        unsafe fn window_new(&self) -> *mut GtkWidget;
        unsafe fn message_dialog_new(
            &self,
            parent: *mut GtkWidget,
            message_type: GtkMessageType,
            buttons_type: GtkButtonsType,
            message: &CStr,
        ) -> *mut GtkWidget;
        unsafe fn window_set_title(&self, window: *mut GtkWidget, title: &CStr);
        unsafe fn dialog_run(&self, dialog: *mut GtkWidget) -> GtkResponseType;
        unsafe fn widget_destroy(&self, widget: *mut GtkWidget);
        /// Dispatches one pending event, returns false once there is nothing left.
        unsafe fn main_context_iteration(&self) -> bool;
    }

    struct GtkApi {
        init_check: GtkInitCheck,
        window_new: GtkWindowNew,
        message_dialog_new: GtkMessageDialogNew,
        window_set_title: GtkWindowSetTitle,
        dialog_run: GtkDialogRun,
        widget_destroy: GtkWidgetDestroy,
        main_context_iteration: GMainContextIteration,
        _library: Library,
    }

    impl GtkApi {
        fn load() -> anyhow::Result<Self> {
            let library = open_library()?;
            unsafe {
                Ok(Self {
                    init_check: symbol(&library, "gtk_init_check")?,
                    window_new: symbol(&library, "gtk_window_new")?,
                    message_dialog_new: symbol(&library, "gtk_message_dialog_new")?,
                    window_set_title: symbol(&library, "gtk_window_set_title")?,
                    dialog_run: symbol(&library, "gtk_dialog_run")?,
                    widget_destroy: symbol(&library, "gtk_widget_destroy")?,
                    main_context_iteration: symbol(&library, "g_main_context_iteration")?,
                    _library: library,
                })
            }
        }
    }

    impl GtkCalls for GtkApi {
        unsafe fn init_check(&self) -> bool {
            (self.init_check)(ptr::null_mut(), ptr::null_mut()) != 0
        }

        unsafe fn window_new(&self) -> *mut GtkWidget {
            (self.window_new)(GTK_WINDOW_TOPLEVEL)
        }

        unsafe fn message_dialog_new(
            &self,
            parent: *mut GtkWidget,
            message_type: GtkMessageType,
            buttons_type: GtkButtonsType,
            message: &CStr,
        ) -> *mut GtkWidget {
            (self.message_dialog_new)(
                parent,
                GTK_DIALOG_MODAL,
                message_type,
                buttons_type,
                c"%s".as_ptr(),
                message.as_ptr(),
            )
        }

        unsafe fn window_set_title(&self, window: *mut GtkWidget, title: &CStr) {
            (self.window_set_title)(window, title.as_ptr())
        }

        unsafe fn dialog_run(&self, dialog: *mut GtkWidget) -> GtkResponseType {
            (self.dialog_run)(dialog)
        }

        unsafe fn widget_destroy(&self, widget: *mut GtkWidget) {
            (self.widget_destroy)(widget)
        }

        unsafe fn main_context_iteration(&self) -> bool {
            (self.main_context_iteration)(ptr::null_mut(), 0) != 0
        }
    }

    fn open_library() -> anyhow::Result<Library> {
        let configured = std::env::var(GTK_LIBRARY_VARIABLE).ok();
        let candidates = configured
            .iter()
            .map(String::as_str)
            .chain(GTK_LIBRARY_NAMES);
        library::open_first("GTK 3", candidates)
    }

    /// The GTK context is process-wide: it is loaded and initialized once and
    /// then reused by every dialog.
    pub struct GtkToolkit {
        api: Option<Box<dyn GtkCalls>>,
        initialized: bool,
    }

    impl GtkToolkit {
        pub const fn new() -> Self {
            Self {
                api: None,
                initialized: false,
            }
        }

        #[cfg(test)]
        pub(super) fn with_calls(calls: impl GtkCalls + 'static) -> Self {
            Self {
                api: Some(Box::new(calls)),
                initialized: false,
            }
        }

        fn api(&self) -> Result<&dyn GtkCalls> {
            self.api
                .as_deref()
                .ok_or_else(|| DialogError::toolkit_init(anyhow!("GTK is not loaded")))
        }
    }

    impl DialogToolkit for GtkToolkit {
        fn initialize(&mut self) -> Result<()> {
            if self.initialized {
                return Ok(());
            }

            if self.api.is_none() {
                self.api = Some(Box::new(GtkApi::load()?));
            }

            if !unsafe { self.api()?.init_check() } {
                return Err(DialogError::toolkit_init(anyhow!(
                    "gtk_init_check failed, is a display available?"
                )));
            }

            info!("Initialized GTK");
            self.initialized = true;
            Ok(())
        }

        fn present(&mut self, request: &DialogRequest<'_>) -> Result<BoxerSelection> {
            let api = self.api()?;

            let response = unsafe {
                // gtk_dialog_run wants a transient parent
                let parent = api.window_new();
                let dialog = api.message_dialog_new(
                    parent,
                    message_type(request.style),
                    buttons_type(request.buttons),
                    &request.message,
                );
                api.window_set_title(dialog, &request.title);

                let response = api.dialog_run(dialog);

                api.widget_destroy(dialog);
                api.widget_destroy(parent);
                while api.main_context_iteration() {}

                response
            };

            Ok(selection(response))
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::dialog::show_dialog;
        use std::sync::Arc;

        const PARENT: usize = 0x10;
        const DIALOG: usize = 0x20;

        /// Records every GTK call and answers with a scripted response.
        struct RecordingGtk {
            calls: Arc<Mutex<Vec<String>>>,
            init_succeeds: bool,
            response: GtkResponseType,
            pending_events: Mutex<usize>,
        }

        impl RecordingGtk {
            fn new(response: GtkResponseType) -> (Self, Arc<Mutex<Vec<String>>>) {
                let calls = Arc::new(Mutex::new(Vec::new()));
                let gtk = Self {
                    calls: calls.clone(),
                    init_succeeds: true,
                    response,
                    pending_events: Mutex::new(0),
                };
                (gtk, calls)
            }

            fn record(&self, call: impl Into<String>) {
                self.calls.lock().push(call.into());
            }
        }

        impl GtkCalls for RecordingGtk {
            unsafe fn init_check(&self) -> bool {
                self.record("init_check");
                self.init_succeeds
            }

            unsafe fn window_new(&self) -> *mut GtkWidget {
                self.record("window_new");
                PARENT as *mut GtkWidget
            }

            unsafe fn message_dialog_new(
                &self,
                parent: *mut GtkWidget,
                message_type: GtkMessageType,
                buttons_type: GtkButtonsType,
                message: &CStr,
            ) -> *mut GtkWidget {
                self.record(format!(
                    "message_dialog_new {:#x} {} {} {}",
                    parent as usize,
                    message_type,
                    buttons_type,
                    message.to_string_lossy()
                ));
                *self.pending_events.lock() = 2;
                DIALOG as *mut GtkWidget
            }

            unsafe fn window_set_title(&self, window: *mut GtkWidget, title: &CStr) {
                self.record(format!(
                    "window_set_title {:#x} {}",
                    window as usize,
                    title.to_string_lossy()
                ));
            }

            unsafe fn dialog_run(&self, dialog: *mut GtkWidget) -> GtkResponseType {
                self.record(format!("dialog_run {:#x}", dialog as usize));
                self.response
            }

            unsafe fn widget_destroy(&self, widget: *mut GtkWidget) {
                self.record(format!("widget_destroy {:#x}", widget as usize));
            }

            unsafe fn main_context_iteration(&self) -> bool {
                self.record("main_context_iteration");
                let mut pending = self.pending_events.lock();
                if *pending == 0 {
                    return false;
                }
                *pending -= 1;
                true
            }
        }

        fn count(calls: &[String], name: &str) -> usize {
            calls.iter().filter(|call| call.starts_with(name)).count()
        }

        #[test]
        fn gtk_is_initialized_once_for_many_dialogs() {
            let (gtk, calls) = RecordingGtk::new(GTK_RESPONSE_OK);
            let mut toolkit = GtkToolkit::with_calls(gtk);
            let request =
                DialogRequest::new(c"Saved", c"Editor", BoxerStyle::Info, BoxerButtons::OK);

            assert_eq!(show_dialog(&mut toolkit, &request), BoxerSelection::OK);
            assert_eq!(show_dialog(&mut toolkit, &request), BoxerSelection::OK);

            let calls = calls.lock();
            assert_eq!(count(&calls, "init_check"), 1);
            assert_eq!(count(&calls, "window_new"), 2);
            assert_eq!(count(&calls, "widget_destroy"), 4);
        }

        #[test]
        fn failed_init_creates_no_window_and_is_retried() {
            let (mut gtk, calls) = RecordingGtk::new(GTK_RESPONSE_OK);
            gtk.init_succeeds = false;
            let mut toolkit = GtkToolkit::with_calls(gtk);
            let request =
                DialogRequest::new(c"Hello", c"Title", BoxerStyle::Info, BoxerButtons::OK);

            assert_eq!(show_dialog(&mut toolkit, &request), BoxerSelection::Error);
            assert_eq!(show_dialog(&mut toolkit, &request), BoxerSelection::Error);

            assert_eq!(*calls.lock(), vec!["init_check", "init_check"]);
        }

        #[test]
        fn dialog_is_torn_down_before_returning() {
            let (gtk, calls) = RecordingGtk::new(GTK_RESPONSE_NO);
            let mut toolkit = GtkToolkit::with_calls(gtk);
            let request = DialogRequest::new(
                c"Proceed?",
                c"Confirm",
                BoxerStyle::Question,
                BoxerButtons::YesNo,
            );

            assert_eq!(show_dialog(&mut toolkit, &request), BoxerSelection::No);
            assert_eq!(
                *calls.lock(),
                vec![
                    "init_check".to_string(),
                    "window_new".to_string(),
                    format!(
                        "message_dialog_new 0x10 {} {} Proceed?",
                        GTK_MESSAGE_QUESTION, GTK_BUTTONS_YES_NO
                    ),
                    "window_set_title 0x20 Confirm".to_string(),
                    "dialog_run 0x20".to_string(),
                    "widget_destroy 0x20".to_string(),
                    "widget_destroy 0x10".to_string(),
                    "main_context_iteration".to_string(),
                    "main_context_iteration".to_string(),
                    "main_context_iteration".to_string(),
                ]
            );
        }

        #[test]
        fn close_button_on_quit_dialog_is_quit() {
            let (gtk, _calls) = RecordingGtk::new(GTK_RESPONSE_CLOSE);
            let mut toolkit = GtkToolkit::with_calls(gtk);
            let request = DialogRequest::new(c"Done", c"Info", BoxerStyle::Info, BoxerButtons::Quit);

            assert_eq!(show_dialog(&mut toolkit, &request), BoxerSelection::Quit);
        }
    }
}
