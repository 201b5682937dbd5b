use crate::{
    BackendHealth, LanguageTab, Notification, SummaryResult, ThumbnailPhase, Variant,
};

/// Read-only snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub input: String,
    pub can_submit: bool,
    pub loading_summary: bool,
    pub loading_thumbnail: bool,
    pub upscaling: bool,
    pub summary: Option<SummaryView>,
    pub active_tab: LanguageTab,
    pub active_variant: Variant,
    pub thumbnail_phase: ThumbnailPhase,
    /// Image to display, open or save.
    pub image_url: Option<String>,
    pub resolution_badge: Option<String>,
    pub can_upscale: bool,
    pub can_download: bool,
    pub dialog_open: bool,
    pub menu_open: bool,
    pub notification: Option<Notification>,
    pub backend_health: BackendHealth,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryView {
    pub video_id: String,
    pub title: String,
    pub channel: String,
    pub duration: String,
    pub views: String,
    pub watch_url: String,
    /// Summary text for the active language tab.
    pub text: String,
}

impl SummaryView {
    pub(crate) fn new(summary: &SummaryResult, tab: LanguageTab) -> Self {
        let info = &summary.video_info;
        Self {
            video_id: info.id.clone(),
            title: info.title.clone(),
            channel: info.channel.clone(),
            duration: format_duration(info.duration_seconds),
            views: format_view_count(info.view_count),
            watch_url: watch_url(&info.id),
            text: summary.summary_for(tab).to_string(),
        }
    }
}

/// `m:ss`, minutes unbounded.
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Groups digits by thousands: `1234567` -> `1,234,567`.
pub fn format_view_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={video_id}")
}

#[cfg(test)]
mod tests {
    use super::{format_duration, format_view_count, watch_url};

    #[test]
    fn duration_pads_seconds() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(3725), "62:05");
    }

    #[test]
    fn view_count_groups_thousands() {
        assert_eq!(format_view_count(0), "0");
        assert_eq!(format_view_count(999), "999");
        assert_eq!(format_view_count(1000), "1,000");
        assert_eq!(format_view_count(1_234_567), "1,234,567");
    }

    #[test]
    fn watch_link_uses_video_id() {
        assert_eq!(watch_url("abc123"), "https://www.youtube.com/watch?v=abc123");
    }
}
