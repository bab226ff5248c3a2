use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use rollcall_core::scanner::ProgressSink;

/// One bar across the whole scan, length = total address count.
pub fn scan_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::with_template(
        "{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} probed {msg}",
    )
    .unwrap()
    .progress_chars("=>-");

    pb.set_style(style);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Adapts the bar into the scanner's per-probe callback.
pub fn sink(pb: &ProgressBar) -> ProgressSink {
    let pb = pb.clone();
    let live = Arc::new(AtomicUsize::new(0));

    Arc::new(move |_addr, alive| {
        if alive {
            let seen = live.fetch_add(1, Ordering::Relaxed) + 1;
            pb.set_message(format!("({} live)", seen.to_string().green().bold()));
        }
        pb.inc(1);
    })
}
