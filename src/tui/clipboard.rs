//! System clipboard access for the copy action.

use log::info;

/// Puts `text` on the system clipboard.
///
/// On Linux the clipboard owner has to stay alive until a clipboard manager
/// (or another program) takes the data, so the write runs on its own thread
/// and this returns once it is handed off.
pub fn copy_text(text: String) -> Result<(), arboard::Error> {
    let mut clipboard = arboard::Clipboard::new()?;

    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        std::thread::spawn(move || match clipboard.set().wait().text(text) {
            Ok(()) => info!("Clipboard ownership released"),
            Err(e) => log::warn!("Clipboard copy failed: {}", e),
        });
        Ok(())
    }

    #[cfg(not(target_os = "linux"))]
    {
        clipboard.set_text(text)?;
        info!("Copied to clipboard");
        Ok(())
    }
}
