//! Copies text to the system clipboard.
//!
//! This module can be disabled by building this crate without default features.

use crate::error::*;
use arboard::Clipboard;
#[cfg(target_os = "linux")]
use arboard::SetExtLinux;

/// Whether `write_to_clipboard` blocks until another application takes the
/// clipboard over.
///
/// On X11 and Wayland the clipboard contents belong to the process that set
/// them, so we have to stay alive and serve them until someone else owns the
/// selection.
#[inline]
pub fn holds_selection() -> bool {
    cfg!(target_os = "linux")
}

/// Replaces the clipboard contents with `text`.
///
/// On Linux this returns once another application copies something, see
/// `holds_selection`.
pub fn write_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new()
        .map_err(|e| Error::from(ErrorKind::Clipboard(e.to_string())))?;

    if holds_selection() {
        info!("Serving the clipboard until something else is copied (Ctrl-C to stop)");
    }

    set_text(&mut clipboard, text)
        .map_err(|e| Error::from(ErrorKind::Clipboard(e.to_string())))?;

    debug!("Copied {} bytes to the clipboard", text.len());
    Ok(())
}

#[cfg(target_os = "linux")]
fn set_text(clipboard: &mut Clipboard, text: &str) -> ::std::result::Result<(), arboard::Error> {
    clipboard.set().wait().text(text)
}

#[cfg(not(target_os = "linux"))]
fn set_text(clipboard: &mut Clipboard, text: &str) -> ::std::result::Result<(), arboard::Error> {
    clipboard.set_text(text)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    #[cfg(target_os = "linux")]
    fn linux_waits_for_the_selection_to_be_taken() {
        assert!(holds_selection());
    }

    #[test]
    #[cfg(not(target_os = "linux"))]
    fn other_platforms_return_right_away() {
        assert!(!holds_selection());
    }
}
