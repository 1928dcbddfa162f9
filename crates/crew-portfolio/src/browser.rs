//! Browser hand-off for the interactive login step
//!
//! The login stage ends at a manual synchronization point: the extracted URL
//! is opened in the system's default browser and the pipeline blocks until
//! the user confirms the login completed. There is no timeout on the wait.

use std::io::{self, BufRead, Write};
use tracing::warn;

/// Open the login URL in the system's default browser
///
/// A failure to launch the browser is not fatal: the URL has already been
/// printed, so the user can open it manually.
pub fn open_login_url(url: &str) {
    if let Err(e) = webbrowser::open(url) {
        warn!("Could not open browser: {e}");
        println!("Could not open a browser automatically; open the URL above manually.");
    }
}

/// Block until the user confirms the login completed
///
/// Reads one line from stdin; EOF counts as confirmation so piped runs do
/// not hang forever.
pub fn wait_for_confirmation() -> io::Result<()> {
    print!("Press Enter after completing login...");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
