pub mod banner;
mod pages;
pub mod progress;
pub mod render;
pub mod tui;

/// Prints the welcome banner and applies the clinical theme for all subsequent inquire prompts.
/// Call once at startup, after tracing init.
pub fn init_ui() {
    banner::print_welcome();
    tui::apply_theme();
}
