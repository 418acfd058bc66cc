//! Spinners for the slow steps (sign-in, payment gateway, AI calls).

use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Await `fut` while a spinner with `message` runs; the spinner is cleared afterwards.
pub async fn with_spinner<F, T>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = spinner(message);
    let out = fut.await;
    pb.finish_and_clear();
    out
}
