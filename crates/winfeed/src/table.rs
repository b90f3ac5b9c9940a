use winfeed_core::WindowInfo;

const TITLE_WIDTH: usize = 40;
const APP_WIDTH: usize = 20;

pub fn print_windows_table(windows: &[WindowInfo]) {
    println!(
        "┌────────────┬──────────────────────────────────────────┬──────────────────────┬─────────────┬───────┐"
    );
    println!(
        "│ {:<10} │ {:<40} │ {:<20} │ {:<11} │ {:<5} │",
        "ID", "Title", "App", "Size", "State"
    );
    println!(
        "├────────────┼──────────────────────────────────────────┼──────────────────────┼─────────────┼───────┤"
    );

    for window in windows {
        let size = format!("{}x{}", window.width(), window.height());
        let state = if window.is_minimized() { "min" } else { "" };
        println!(
            "│ {:<10} │ {} │ {} │ {:<11} │ {:<5} │",
            window.id(),
            truncate(window.title(), TITLE_WIDTH),
            truncate(window.app_name(), APP_WIDTH),
            size,
            state
        );
    }

    println!(
        "└────────────┴──────────────────────────────────────────┴──────────────────────┴─────────────┴───────┘"
    );
}

/// Pad or cut `s` to exactly `max_len` characters.
fn truncate(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
