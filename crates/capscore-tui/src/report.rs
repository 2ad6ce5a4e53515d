//! Headless report: the ranked dashboard as plain text or JSON on stdout.

use capscore_core::format::{format_dec, format_int, Separators};
use capscore_core::{Dashboard, Metrics, RankedEntry};
use std::fmt::Write;

/// Plain-text report in rank order. With `detail`, each source is followed by
/// its per-post table.
pub fn render_text(dash: &Dashboard, seps: &Separators, detail: bool) -> String {
    let mut out = format!(
        "capscore ranking · loaded {}\n",
        dash.loaded_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
    for (pos, entry) in dash.ranked().iter().enumerate() {
        out.push('\n');
        write_entry(&mut out, pos, entry, seps);
        if detail {
            write_posts(&mut out, &entry.metrics, seps);
        }
    }
    out
}

/// The dashboard serialized as pretty JSON, posts included.
pub fn render_json(dash: &Dashboard) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(dash)?)
}

/// Message printed when no configured source produced data.
pub fn render_empty(expected: &[String]) -> String {
    format!(
        "No data found.\n\
         Check that the sheet tabs are named: {}.\n\
         Make sure the spreadsheet is shared with \"Anyone with the link\".\n",
        expected.join(", ")
    )
}

fn write_entry(out: &mut String, pos: usize, entry: &RankedEntry, seps: &Separators) {
    let m = &entry.metrics;
    let trophy = if entry.is_winner { " 🏆" } else { "" };
    // Writing to a String cannot fail.
    let _ = writeln!(out, "#{} {}{}", pos + 1, entry.name, trophy);
    let _ = writeln!(out, "  {:<18}{}", "Recognized likes", format_int(m.total_recognized(), seps));
    let _ = writeln!(out, "  {:<18}{}", "Total likes", format_int(m.total_likes() as f64, seps));
    let _ = writeln!(out, "  {:<18}{}", "Average", format_int(m.average(), seps));
    let _ = writeln!(out, "  {:<18}{}", "Max allowed", format_int(m.max_allowed(), seps));
    let _ = writeln!(
        out,
        "  {:<18}{} ({} capped)",
        "Posts",
        m.posts().len(),
        m.capped_count()
    );
}

fn write_posts(out: &mut String, m: &Metrics, seps: &Separators) {
    if m.posts().is_empty() {
        return;
    }
    let _ = writeln!(
        out,
        "    {:<12}{:>8}{:>12}{:>8}  {}",
        "Date", "Likes", "Recognized", "Lost", "Link"
    );
    for post in m.posts() {
        let lost = if post.lost() > 0.0 {
            format!("-{}", format_dec(post.lost(), seps))
        } else {
            String::new()
        };
        let _ = writeln!(
            out,
            "    {:<12}{:>8}{:>12}{:>8}  {}",
            post.date(),
            format_int(post.likes() as f64, seps),
            format_dec(post.recognized(), seps),
            lost,
            post.url()
        );
    }
}
