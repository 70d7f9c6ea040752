//! `"<H>h<MM>"` rendering of movie durations
//!
//! Hours are total hours (a 25-hour film renders `25h00`). The text form
//! only carries whole minutes, so seconds are dropped when formatting.

const SECS_PER_MINUTE: u32 = 60;
const SECS_PER_HOUR: u32 = 3600;

/// Render a duration as `"<H>h<MM>"`
pub fn format_duration(duration_in_sec: u32) -> String {
    let minutes = duration_in_sec / SECS_PER_MINUTE;
    format!("{}h{:02}", minutes / 60, minutes % 60)
}

/// Parse a `"<H>h<MM>"` duration back into seconds
///
/// Returns `None` for anything that is not two non-negative integers
/// separated by a literal `h`.
pub fn parse_duration(text: &str) -> Option<u32> {
    let (hours, minutes) = text.trim().split_once('h')?;
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    hours
        .checked_mul(SECS_PER_HOUR)?
        .checked_add(minutes.checked_mul(SECS_PER_MINUTE)?)
}
