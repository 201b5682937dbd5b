use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Original,
    Upscaled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailAsset {
    pub variant: Variant,
    pub url: String,
    pub resolution_label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResolution {
    FourK,
    EightK,
}

impl TargetResolution {
    pub fn label(self) -> &'static str {
        match self {
            TargetResolution::FourK => "4K",
            TargetResolution::EightK => "8K",
        }
    }
}

impl fmt::Display for TargetResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How to upscale: by an integer factor or to a named resolution, never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpscaleSpec {
    ScaleFactor(u32),
    Target(TargetResolution),
}

impl UpscaleSpec {
    /// What the default upscale button requests.
    pub const STANDARD: UpscaleSpec = UpscaleSpec::ScaleFactor(2);

    pub fn scale_factor(self) -> Option<u32> {
        match self {
            UpscaleSpec::ScaleFactor(factor) => Some(factor),
            UpscaleSpec::Target(_) => None,
        }
    }

    pub fn target_resolution(self) -> Option<TargetResolution> {
        match self {
            UpscaleSpec::ScaleFactor(_) => None,
            UpscaleSpec::Target(target) => Some(target),
        }
    }

    /// `"4K"`/`"8K"` for named targets, `"<factor>x"` otherwise.
    pub fn label(self) -> String {
        match self {
            UpscaleSpec::ScaleFactor(factor) => format!("{factor}x"),
            UpscaleSpec::Target(target) => target.label().to_string(),
        }
    }
}

/// Entries of the upscale menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpscaleOption {
    Standard,
    FourK,
    EightK,
}

impl UpscaleOption {
    pub fn spec(self) -> UpscaleSpec {
        match self {
            UpscaleOption::Standard => UpscaleSpec::STANDARD,
            UpscaleOption::FourK => UpscaleSpec::Target(TargetResolution::FourK),
            UpscaleOption::EightK => UpscaleSpec::Target(TargetResolution::EightK),
        }
    }
}

/// Lifecycle of the thumbnail for the current submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThumbnailPhase {
    #[default]
    NoAsset,
    Fetching,
    Fetched { upscaled: bool },
    Upscaling { upscaled: bool },
}

/// Per-submission thumbnail state: one fetch, then any number of sequential upscales.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct ThumbnailPipeline {
    fetching: bool,
    original: Option<ThumbnailAsset>,
    upscaled: Option<ThumbnailAsset>,
    pending_upscale: Option<UpscaleSpec>,
}

impl ThumbnailPipeline {
    pub(crate) fn phase(&self) -> ThumbnailPhase {
        let upscaled = self.upscaled.is_some();
        if self.fetching {
            ThumbnailPhase::Fetching
        } else if self.original.is_none() {
            ThumbnailPhase::NoAsset
        } else if self.pending_upscale.is_some() {
            ThumbnailPhase::Upscaling { upscaled }
        } else {
            ThumbnailPhase::Fetched { upscaled }
        }
    }

    pub(crate) fn is_fetching(&self) -> bool {
        self.fetching
    }

    pub(crate) fn is_upscaling(&self) -> bool {
        self.pending_upscale.is_some()
    }

    pub(crate) fn original(&self) -> Option<&ThumbnailAsset> {
        self.original.as_ref()
    }

    pub(crate) fn upscaled(&self) -> Option<&ThumbnailAsset> {
        self.upscaled.as_ref()
    }

    pub(crate) fn can_upscale(&self) -> bool {
        self.original.is_some() && self.pending_upscale.is_none()
    }

    pub(crate) fn begin_fetch(&mut self) {
        *self = Self {
            fetching: true,
            ..Self::default()
        };
    }

    pub(crate) fn finish_fetch(&mut self, url: Option<String>) {
        self.fetching = false;
        self.original = url.map(|url| ThumbnailAsset {
            variant: Variant::Original,
            url,
            resolution_label: None,
        });
    }

    /// Returns `false` when upscaling is currently disabled.
    pub(crate) fn begin_upscale(&mut self, spec: UpscaleSpec) -> bool {
        if !self.can_upscale() {
            return false;
        }
        self.pending_upscale = Some(spec);
        true
    }

    /// Completes the pending upscale. Returns the spec it was started with, if any.
    pub(crate) fn finish_upscale(&mut self, url: Option<String>) -> Option<UpscaleSpec> {
        let spec = self.pending_upscale.take()?;
        if let Some(url) = url {
            self.upscaled = Some(ThumbnailAsset {
                variant: Variant::Upscaled,
                url,
                resolution_label: Some(spec.label()),
            });
        }
        Some(spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_never_double_suffix() {
        assert_eq!(UpscaleSpec::ScaleFactor(2).label(), "2x");
        assert_eq!(UpscaleSpec::ScaleFactor(3).label(), "3x");
        assert_eq!(UpscaleOption::FourK.spec().label(), "4K");
        assert_eq!(UpscaleOption::EightK.spec().label(), "8K");
    }

    #[test]
    fn spec_fields_are_exclusive() {
        let factor = UpscaleSpec::ScaleFactor(2);
        assert_eq!(factor.scale_factor(), Some(2));
        assert_eq!(factor.target_resolution(), None);

        let target = UpscaleOption::EightK.spec();
        assert_eq!(target.scale_factor(), None);
        assert_eq!(target.target_resolution(), Some(TargetResolution::EightK));
    }

    #[test]
    fn lifecycle_walks_through_phases() {
        let mut pipeline = ThumbnailPipeline::default();
        assert_eq!(pipeline.phase(), ThumbnailPhase::NoAsset);
        assert!(!pipeline.begin_upscale(UpscaleSpec::STANDARD));

        pipeline.begin_fetch();
        assert_eq!(pipeline.phase(), ThumbnailPhase::Fetching);
        pipeline.finish_fetch(Some("http://host/a.jpg".into()));
        assert_eq!(pipeline.phase(), ThumbnailPhase::Fetched { upscaled: false });

        assert!(pipeline.begin_upscale(UpscaleSpec::STANDARD));
        assert!(!pipeline.begin_upscale(UpscaleOption::FourK.spec()));
        assert_eq!(pipeline.phase(), ThumbnailPhase::Upscaling { upscaled: false });

        assert_eq!(pipeline.finish_upscale(None), Some(UpscaleSpec::STANDARD));
        assert_eq!(pipeline.phase(), ThumbnailPhase::Fetched { upscaled: false });

        assert!(pipeline.begin_upscale(UpscaleOption::FourK.spec()));
        pipeline.finish_upscale(Some("http://host/a_4k.jpg".into()));
        assert_eq!(pipeline.phase(), ThumbnailPhase::Fetched { upscaled: true });
        assert_eq!(
            pipeline.upscaled().and_then(|a| a.resolution_label.as_deref()),
            Some("4K")
        );
    }

    #[test]
    fn failed_fetch_leaves_no_asset() {
        let mut pipeline = ThumbnailPipeline::default();
        pipeline.begin_fetch();
        pipeline.finish_fetch(None);
        assert_eq!(pipeline.phase(), ThumbnailPhase::NoAsset);
        assert!(!pipeline.can_upscale());
    }
}
