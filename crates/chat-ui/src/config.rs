//! Widget configuration

/// Defaults for dynamically mounted widgets
pub struct WidgetConfig;

impl WidgetConfig {
    /// Delay between placeholder lookups while waiting for the render to commit
    pub const POLL_INTERVAL_MS: u32 = 100;

    /// Give up waiting for the placeholder after this long
    pub const MOUNT_TIMEOUT_MS: u32 = 5_000;

    /// Prefix for generated placeholder element ids
    pub const CONTAINER_ID_PREFIX: &'static str = "random-component-container";

    /// Upper bound on html + css + javascript, in bytes
    pub const MAX_FRAGMENT_BYTES: usize = 256 * 1024;

    /// `sandbox` attribute applied to isolated widget frames
    pub const SANDBOX_FLAGS: &'static str = "allow-scripts allow-forms";

    /// Submit button labels
    pub const PROCESSING_LABEL: &'static str = "Processing...";
    pub const SUBMITTED_LABEL: &'static str = "Submitted";
    pub const RETRY_LABEL: &'static str = "Retry";
}

/// Markdown rendering configuration
pub struct MarkdownConfig;

impl MarkdownConfig {
    /// Placeholder glyph appended by streaming producers
    pub const CURSOR_GLYPH: &'static str = "▍";

    /// How long the code block copy button shows its confirmation
    pub const COPY_RESET_MS: u32 = 2_000;

    /// Attribute marking where a rendered code block is mounted
    pub const CODE_BLOCK_SLOT: &'static str = "data-code-block";
}
