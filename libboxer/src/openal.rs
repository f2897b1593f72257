//! Where the OpenAL headers live on each platform.
//!
//! Apple ships OpenAL as a framework (`<OpenAL/al.h>`), everyone else uses the
//! `<AL/al.h>` layout of openal-soft. `include/openal_wrapper.h` makes the same
//! choice with the preprocessor; this module offers it to build scripts that
//! feed a binding generator.

const WRAPPER_GUARD: &str = "OPENAL_WRAPPER_H";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenAlLayout {
    /// `OpenAL.framework` on Apple platforms.
    Framework,
    /// `AL/` include directory.
    Generic,
}

impl OpenAlLayout {
    /// Picks the layout for a `CARGO_CFG_TARGET_OS` value.
    pub fn for_target_os(target_os: &str) -> Self {
        match target_os {
            "macos" | "ios" | "tvos" | "watchos" | "visionos" => Self::Framework,
            _ => Self::Generic,
        }
    }

    pub fn current() -> Self {
        Self::for_target_os(std::env::consts::OS)
    }

    pub fn include_directory(&self) -> &'static str {
        match self {
            Self::Framework => "OpenAL",
            Self::Generic => "AL",
        }
    }

    pub fn headers(&self) -> [&'static str; 2] {
        match self {
            Self::Framework => ["OpenAL/al.h", "OpenAL/alc.h"],
            Self::Generic => ["AL/al.h", "AL/alc.h"],
        }
    }

    /// Renders a wrapper header including this layout's headers.
    pub fn wrapper_header(&self) -> String {
        let [al, alc] = self.headers();
        format!(
            "#ifndef {guard}\n#define {guard}\n\n#include <{al}>\n#include <{alc}>\n\n#endif /* {guard} */\n",
            guard = WRAPPER_GUARD,
        )
    }
}

/// The preprocessor-selecting wrapper shipped with the library.
pub const OPENAL_WRAPPER_HEADER: &str = include_str!("../include/openal_wrapper.h");
