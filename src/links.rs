use std::io;

/// Hand `url` to the platform's default viewer. The URL is not validated;
/// a malformed one surfaces as whatever error the platform reports.
pub fn open_in_browser(url: &str) -> io::Result<()> {
    tracing::info!(%url, "opening link");
    open::that(url).inspect_err(|e| tracing::warn!(%url, "failed to open link: {e}"))
}
