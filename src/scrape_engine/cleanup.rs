//! Browser and resource cleanup after a batch completes.

use anyhow::Result;
use chromiumoxide::Browser;
use log::{debug, warn};
use std::path::PathBuf;

/// Close the browser, wait for the process to exit, and remove the
/// user-data temp directory.
///
/// Waiting for exit prevents the browser process from outliving the batch
/// and holding the profile directory open while it is being removed.
pub async fn cleanup_browser_and_data(
    mut browser: Browser,
    user_data_dir: PathBuf,
) -> Result<()> {
    debug!("closing browser");
    if let Err(e) = browser.close().await {
        warn!("failed to close browser: {e}");
    }

    debug!("waiting for browser process to exit");
    if let Err(e) = browser.wait().await {
        warn!("failed to wait for browser exit: {e}");
    }

    debug!("removing user data directory {}", user_data_dir.display());
    if let Err(e) = std::fs::remove_dir_all(&user_data_dir) {
        warn!(
            "failed to remove user data directory {}: {e}",
            user_data_dir.display()
        );
    }

    Ok(())
}
