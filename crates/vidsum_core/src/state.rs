use crate::sequencer::RequestSequencer;
use crate::thumbnail::ThumbnailPipeline;
use crate::view_model::{AppViewModel, SummaryView};
use crate::{
    BackendHealth, LanguageTab, Notification, RequestToken, SummaryResult, ThumbnailAsset,
    UpscaleSpec, Variant, VideoRequest,
};

/// Everything the orchestrator knows. Only [`crate::update`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    input: String,
    sequencer: RequestSequencer,
    request: Option<VideoRequest>,
    loading_summary: bool,
    summary: Option<SummaryResult>,
    thumbnail: ThumbnailPipeline,
    active_tab: LanguageTab,
    active_variant: Variant,
    dialog_open: bool,
    menu_open: bool,
    notification: Option<Notification>,
    backend_health: BackendHealth,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            input: self.input.clone(),
            can_submit: !self.input.is_empty(),
            loading_summary: self.loading_summary,
            loading_thumbnail: self.thumbnail.is_fetching(),
            upscaling: self.thumbnail.is_upscaling(),
            summary: self
                .summary
                .as_ref()
                .map(|summary| SummaryView::new(summary, self.active_tab)),
            active_tab: self.active_tab,
            active_variant: self.active_variant,
            thumbnail_phase: self.thumbnail.phase(),
            image_url: self.current_image_url().map(ToOwned::to_owned),
            resolution_badge: self.resolution_badge().map(ToOwned::to_owned),
            can_upscale: self.can_upscale(),
            can_download: self.summary.is_some()
                && !self.thumbnail.is_fetching()
                && self.current_image_url().is_some(),
            dialog_open: self.dialog_open,
            menu_open: self.menu_open,
            notification: self.notification.clone(),
            backend_health: self.backend_health,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn current_token(&self) -> Option<RequestToken> {
        self.sequencer.current()
    }

    pub fn is_stale(&self, token: RequestToken) -> bool {
        self.sequencer.is_stale(token)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn summary(&self) -> Option<&SummaryResult> {
        self.summary.as_ref()
    }

    pub fn active_variant(&self) -> Variant {
        self.active_variant
    }

    pub fn original_thumbnail(&self) -> Option<&ThumbnailAsset> {
        self.thumbnail.original()
    }

    pub fn upscaled_thumbnail(&self) -> Option<&ThumbnailAsset> {
        self.thumbnail.upscaled()
    }

    /// Upscaled image when it is active, else the fetched original, else the
    /// thumbnail embedded in the summary.
    pub fn current_image_url(&self) -> Option<&str> {
        if self.active_variant == Variant::Upscaled {
            if let Some(upscaled) = self.thumbnail.upscaled() {
                return Some(&upscaled.url);
            }
        }
        if let Some(original) = self.thumbnail.original() {
            return Some(&original.url);
        }
        self.summary
            .as_ref()
            .map(|summary| summary.video_info.thumbnail_url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Resolution label of the upscaled asset, only while it is on screen.
    pub fn resolution_badge(&self) -> Option<&str> {
        match self.active_variant {
            Variant::Upscaled => self
                .thumbnail
                .upscaled()
                .and_then(|asset| asset.resolution_label.as_deref()),
            Variant::Original => None,
        }
    }

    pub(crate) fn current_request(&self) -> Option<&VideoRequest> {
        self.request.as_ref()
    }

    pub(crate) fn is_loading_thumbnail(&self) -> bool {
        self.thumbnail.is_fetching()
    }

    pub(crate) fn can_upscale(&self) -> bool {
        self.summary.is_some() && self.thumbnail.can_upscale()
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    /// Starts a new submission and forgets everything tied to the previous one.
    pub(crate) fn begin_submission(&mut self, request: VideoRequest) -> RequestToken {
        let token = self.sequencer.begin_submission();
        self.request = Some(request);
        self.loading_summary = true;
        self.summary = None;
        self.thumbnail = ThumbnailPipeline::default();
        self.active_variant = Variant::Original;
        self.dialog_open = false;
        self.menu_open = false;
        self.notification = None;
        self.mark_dirty();
        token
    }

    pub(crate) fn finish_summary(&mut self, summary: Option<SummaryResult>) {
        self.loading_summary = false;
        self.summary = summary;
        self.mark_dirty();
    }

    pub(crate) fn begin_thumbnail_fetch(&mut self) {
        self.thumbnail.begin_fetch();
        self.mark_dirty();
    }

    pub(crate) fn finish_thumbnail_fetch(&mut self, url: Option<String>) {
        self.thumbnail.finish_fetch(url);
        self.mark_dirty();
    }

    pub(crate) fn begin_upscale(&mut self, spec: UpscaleSpec) -> bool {
        if !self.can_upscale() {
            return false;
        }
        let started = self.thumbnail.begin_upscale(spec);
        if started {
            self.mark_dirty();
        }
        started
    }

    /// Completes the pending upscale; a stored upscaled asset becomes the active variant.
    pub(crate) fn finish_upscale(&mut self, url: Option<String>) -> Option<UpscaleSpec> {
        let succeeded = url.is_some();
        let spec = self.thumbnail.finish_upscale(url)?;
        if succeeded {
            self.active_variant = Variant::Upscaled;
        }
        self.mark_dirty();
        Some(spec)
    }

    pub(crate) fn toggle_variant(&mut self) {
        if self.thumbnail.upscaled().is_none() {
            return;
        }
        self.active_variant = match self.active_variant {
            Variant::Original => Variant::Upscaled,
            Variant::Upscaled => Variant::Original,
        };
        self.mark_dirty();
    }

    pub(crate) fn open_dialog(&mut self) {
        if self.summary.is_some() && !self.dialog_open {
            self.dialog_open = true;
            self.mark_dirty();
        }
    }

    pub(crate) fn close_dialog(&mut self) {
        if self.dialog_open || self.active_variant != Variant::Original {
            self.dialog_open = false;
            self.active_variant = Variant::Original;
            self.mark_dirty();
        }
    }

    pub(crate) fn open_menu(&mut self) {
        if self.can_upscale() && !self.menu_open {
            self.menu_open = true;
            self.mark_dirty();
        }
    }

    pub(crate) fn close_menu(&mut self) {
        if self.menu_open {
            self.menu_open = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn select_tab(&mut self, tab: LanguageTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.mark_dirty();
        }
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notification.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_backend_health(&mut self, health: BackendHealth) {
        if self.backend_health != health {
            self.backend_health = health;
            self.mark_dirty();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
