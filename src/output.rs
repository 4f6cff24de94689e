use std::fs;
use std::path::Path;

use crate::collector::VideoSummary;
use crate::error::Result;

/// Print the report to stdout
pub fn print_summary(videos: &[VideoSummary], min_views: u64) {
    print!("{}", format_summary(videos, min_views));
}

/// Render the console report: total count, then one block per video
pub fn format_summary(videos: &[VideoSummary], min_views: u64) -> String {
    let mut out = format!("Total video count: {}\n\n", videos.len());
    out.push_str(&format!("Videos with > {} views:\n\n", format_threshold(min_views)));

    for video in videos {
        out.push_str(&format!("{} ({} views)\n{}\n\n", video.title, video.views, video.url));
    }

    out
}

fn format_threshold(views: u64) -> String {
    if views >= 1_000_000 && views % 1_000_000 == 0 {
        format!("{}M", views / 1_000_000)
    } else if views >= 1_000 && views % 1_000 == 0 {
        format!("{}k", views / 1_000)
    } else {
        views.to_string()
    }
}

/// Write the results as a pretty-printed JSON array, replacing any previous file
pub fn write_results(path: &Path, videos: &[VideoSummary]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(videos)?)?;
    Ok(())
}

/// Read a results file written by [`write_results`]
pub fn read_results(path: &Path) -> Result<Vec<VideoSummary>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
