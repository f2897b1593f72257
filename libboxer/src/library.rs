use anyhow::{anyhow, Context};
use libloading::Library;

/// Opens the first shared library among `candidates` that loads.
pub fn open_first<'a>(
    what: &str,
    candidates: impl IntoIterator<Item = &'a str>,
) -> anyhow::Result<Library> {
    let mut last_error = None;
    for candidate in candidates {
        match unsafe { Library::new(candidate) } {
            Ok(library) => {
                debug!("Loaded {} from {}", what, candidate);
                return Ok(library);
            }
            Err(error) => {
                debug!("Could not load {} from {}: {}", what, candidate, error);
                last_error = Some(error);
            }
        }
    }

    Err(match last_error {
        Some(error) => anyhow::Error::new(error).context(format!("{} is not available", what)),
        None => anyhow!("{} is not available", what),
    })
}

/// Copies the exported function `name` out of `library`.
///
/// # Safety
/// `T` must be the exact function pointer type of the exported symbol, and the
/// returned pointer must not be called after `library` is dropped.
pub unsafe fn symbol<T: Copy>(library: &Library, name: &str) -> anyhow::Result<T> {
    let symbol = library
        .get::<T>(name.as_bytes())
        .with_context(|| format!("missing symbol {}", name))?;
    Ok(*symbol)
}
