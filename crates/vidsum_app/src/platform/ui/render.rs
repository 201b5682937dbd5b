use std::fmt::Write;

use vidsum_core::{
    AppViewModel, BackendHealth, LanguageTab, Severity, SummaryView, ThumbnailPhase, Variant,
};

const RULE: &str = "------------------------------------------------------------";

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();

    if view.backend_health == BackendHealth::Unreachable {
        out.push_str("! Backend is not reachable; requests will likely fail.\n");
    }

    if let Some(notification) = &view.notification {
        let tag = match notification.severity {
            Severity::Info => "info",
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        let _ = writeln!(out, "[{}] {}", tag, notification.message);
    }

    out.push_str(RULE);
    out.push('\n');
    let _ = writeln!(out, "URL: {}", display_input(&view.input));

    if view.loading_summary {
        out.push_str("Summarizing...\n");
    }

    match &view.summary {
        Some(summary) => render_summary(&mut out, summary, view.active_tab),
        None if !view.loading_summary => out.push_str("Paste a YouTube link to get started.\n"),
        None => {}
    }

    render_thumbnail(&mut out, view);
    out.push_str(RULE);
    out.push('\n');
    out.push_str(&action_hints(view));
    out
}

fn display_input(input: &str) -> &str {
    if input.trim().is_empty() {
        "<empty>"
    } else {
        input
    }
}

fn render_summary(out: &mut String, summary: &SummaryView, tab: LanguageTab) {
    let _ = writeln!(out, "{}", summary.title);
    let _ = writeln!(
        out,
        "{} | {} | {} views",
        summary.channel, summary.duration, summary.views
    );
    let _ = writeln!(out, "Watch: {}", summary.watch_url);
    let (active, other) = match tab {
        LanguageTab::English => ("English", "Hindi"),
        LanguageTab::Hindi => ("Hindi", "English"),
    };
    let _ = writeln!(out, "\n[{active}] / {other}");
    let _ = writeln!(out, "{}\n", summary.text);
}

fn render_thumbnail(out: &mut String, view: &AppViewModel) {
    let status = match view.thumbnail_phase {
        ThumbnailPhase::NoAsset => None,
        ThumbnailPhase::Fetching => Some("fetching high-resolution thumbnail..."),
        ThumbnailPhase::Fetched { .. } => None,
        ThumbnailPhase::Upscaling { .. } => Some("upscaling..."),
    };

    if let Some(url) = &view.image_url {
        let variant = match view.active_variant {
            Variant::Original => "original",
            Variant::Upscaled => "upscaled",
        };
        match &view.resolution_badge {
            Some(badge) => {
                let _ = writeln!(out, "Thumbnail ({variant}, {badge}): {url}");
            }
            None => {
                let _ = writeln!(out, "Thumbnail ({variant}): {url}");
            }
        }
    }
    if let Some(status) = status {
        let _ = writeln!(out, "Thumbnail: {status}");
    }
    if view.dialog_open {
        out.push_str("Viewer open: 'toggle' switches images, 'close' closes.\n");
    }
    if view.menu_open {
        out.push_str("Upscale to: pick 2x | pick 4k | pick 8k | menu close\n");
    }
}

fn action_hints(view: &AppViewModel) -> String {
    let mut actions = Vec::new();
    if view.can_submit {
        actions.push("submit");
    }
    if view.can_upscale {
        actions.push("upscale");
        actions.push("menu");
    }
    if view.can_download {
        actions.push("download");
    }
    if view.summary.is_some() && !view.dialog_open {
        actions.push("view");
    }
    if view.notification.is_some() {
        actions.push("dismiss");
    }
    actions.push("help");
    actions.push("quit");
    format!("Actions: {}\n", actions.join(", "))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vidsum_core::{
        AppViewModel, BackendHealth, LanguageTab, Notification, SummaryView, ThumbnailPhase,
        Variant,
    };

    use super::render;

    fn summary_view(text: &str) -> SummaryView {
        SummaryView {
            video_id: "abc123".to_string(),
            title: "Rust in 100 Seconds".to_string(),
            channel: "Fireship".to_string(),
            duration: "2:05".to_string(),
            views: "1,234,567".to_string(),
            watch_url: "https://www.youtube.com/watch?v=abc123".to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn empty_view_prompts_for_a_link() {
        let text = render(&AppViewModel::default());
        assert!(text.contains("URL: <empty>"));
        assert!(text.contains("Paste a YouTube link"));
        assert!(text.ends_with("Actions: help, quit\n"));
    }

    #[test]
    fn summary_shows_metadata_and_active_tab() {
        let view = AppViewModel {
            input: "https://youtu.be/abc123".to_string(),
            can_submit: true,
            summary: Some(summary_view("नमस्ते")),
            active_tab: LanguageTab::Hindi,
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("Fireship | 2:05 | 1,234,567 views"));
        assert!(text.contains("Watch: https://www.youtube.com/watch?v=abc123"));
        assert!(text.contains("[Hindi] / English"));
        assert!(text.contains("नमस्ते"));
        assert!(text.contains("Actions: submit, view, help, quit"));
    }

    #[test]
    fn upscaled_image_carries_badge() {
        let view = AppViewModel {
            summary: Some(summary_view("text")),
            image_url: Some("http://localhost:5000/static/u.jpg".to_string()),
            active_variant: Variant::Upscaled,
            resolution_badge: Some("4K".to_string()),
            thumbnail_phase: ThumbnailPhase::Fetched { upscaled: true },
            dialog_open: true,
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("Thumbnail (upscaled, 4K): http://localhost:5000/static/u.jpg"));
        assert!(text.contains("Viewer open"));
    }

    #[test]
    fn notification_and_health_banner_come_first() {
        let view = AppViewModel {
            notification: Some(Notification::error("Please enter a valid YouTube URL")),
            backend_health: BackendHealth::Unreachable,
            ..AppViewModel::default()
        };
        let text = render(&view);
        let lines: Vec<&str> = text.lines().take(2).collect();
        assert_eq!(
            lines,
            vec![
                "! Backend is not reachable; requests will likely fail.",
                "[error] Please enter a valid YouTube URL",
            ]
        );
    }

    #[test]
    fn busy_states_are_reported() {
        let view = AppViewModel {
            loading_summary: true,
            thumbnail_phase: ThumbnailPhase::Fetching,
            ..AppViewModel::default()
        };
        let text = render(&view);
        assert!(text.contains("Summarizing..."));
        assert!(text.contains("Thumbnail: fetching high-resolution thumbnail..."));
        assert!(!text.contains("Paste a YouTube link"));
    }
}
