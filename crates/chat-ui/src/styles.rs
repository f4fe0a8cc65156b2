//! Centralized style constants for consistent theming across the chat UI components

// Message rows
pub const MESSAGE_ROW: &str = "group relative flex items-start md:-ml-12";
pub const MESSAGE_BODY: &str = "ml-4 flex-1 space-y-2 overflow-hidden";
pub const USER_BODY_PADDING: &str = "pl-2";
pub const BOT_BODY_PADDING: &str = "px-1";
pub const CARD_BODY: &str = "ml-4 flex-1 pl-2";
pub const SPINNER_BODY: &str = "ml-4 h-[24px] flex flex-row items-center flex-1 space-y-2 overflow-hidden px-1";

// Avatars
pub const AVATAR_BASE: &str =
    "flex shrink-0 select-none items-center justify-center rounded-md border shadow-sm";
pub const USER_AVATAR: &str = "size-[25px] bg-white dark:bg-gray-900";
pub const BOT_AVATAR: &str = "size-[24px] bg-gray-900 text-white dark:bg-gray-100 dark:text-gray-900";

// Markdown
pub const MARKDOWN_PROSE: &str =
    "prose break-words dark:prose-invert prose-p:leading-relaxed prose-pre:p-0";
pub const MARKDOWN_PARAGRAPH: &str = "mb-2 last:mb-0";
pub const CURSOR_PLACEHOLDER: &str = "mt-1 animate-pulse cursor-default";

// Code
pub const CODE_BLOCK: &str = "relative w-full font-sans rounded-lg overflow-hidden bg-zinc-950";
pub const CODE_BLOCK_HEADER: &str =
    "flex w-full items-center justify-between bg-zinc-800 px-6 py-2 pr-4 text-zinc-100";
pub const CODE_BLOCK_BODY: &str =
    "m-0 w-full overflow-x-auto bg-transparent px-6 py-5 font-mono text-sm text-zinc-100";
pub const INLINE_CODE: &str = "bg-gray-100 dark:bg-gray-700 px-1 py-0.5 rounded text-sm font-mono";
pub const GHOST_BUTTON: &str = "text-xs px-2 py-1 rounded-md hover:bg-zinc-700 transition-colors";

// Widgets
pub const WIDGET_CONTAINER: &str = "w-full";
pub const WIDGET_FRAME: &str = "w-full min-h-[200px] border-0 rounded-lg bg-transparent";

// Status color pairs (background + text)
pub const ERROR_BG: &str = "bg-red-50 dark:bg-red-900";
pub const ERROR_TEXT: &str = "text-red-700 dark:text-red-300";
pub const WARNING_BG: &str = "bg-orange-50 dark:bg-orange-900";
pub const WARNING_TEXT: &str = "text-orange-800 dark:text-orange-200";
pub const NOTICE_PADDING: &str = "px-3 py-2 rounded mt-2 text-sm";

// Common layout patterns
pub const FLEX_COL_GAP_4: &str = "flex flex-col gap-4";
pub const STANDARD_PADDING: &str = "p-4";
