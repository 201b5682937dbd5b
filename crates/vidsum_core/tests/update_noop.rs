use vidsum_core::{update, AppState, Msg};

#[test]
fn presentation_messages_are_noops_before_any_submission() {
    let state = AppState::new();
    for msg in [
        Msg::UpscaleClicked,
        Msg::UpscaleMenuOpened,
        Msg::VariantToggled,
        Msg::DialogOpened,
        Msg::DownloadClicked { requested_at_ms: 1 },
        Msg::NotificationDismissed,
    ] {
        let (next, effects) = update(state.clone(), msg);
        assert_eq!(state, next);
        assert!(effects.is_empty());
    }
}
