//! Normalized status model shared by all three players

mod status;
mod track_info;
mod transport_state;

pub use status::PlayerStatus;
pub use track_info::TrackInfo;
pub use transport_state::TransportState;

/// Format a non-negative second count as `M:SS`
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
