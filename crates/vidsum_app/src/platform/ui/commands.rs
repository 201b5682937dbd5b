use vidsum_core::{LanguageTab, Msg, UpscaleOption};

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Vec<Msg>),
    Help,
    Quit,
    Unknown(String),
}

/// Parses an input line. `now_ms` stamps download requests.
pub fn parse_command(line: &str, now_ms: i64) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msgs = match (word.to_ascii_lowercase().as_str(), rest) {
        ("", _) => Vec::new(),
        ("help" | "?", _) => return Command::Help,
        ("quit" | "exit" | "q", _) => return Command::Quit,
        ("submit", "") => vec![Msg::SubmitClicked],
        ("submit", url) => submit(url),
        ("upscale", "") => vec![Msg::UpscaleClicked],
        ("menu", "") => vec![Msg::UpscaleMenuOpened],
        ("menu", "close") => vec![Msg::UpscaleMenuClosed],
        ("pick", option) => match parse_option(option) {
            Some(option) => vec![Msg::UpscaleOptionChosen(option)],
            None => return Command::Unknown(line.to_string()),
        },
        ("toggle", "") => vec![Msg::VariantToggled],
        ("view" | "open", "") => vec![Msg::DialogOpened],
        ("close", "") => vec![Msg::DialogClosed],
        ("tab", tab) => match parse_tab(tab) {
            Some(tab) => vec![Msg::LanguageTabSelected(tab)],
            None => return Command::Unknown(line.to_string()),
        },
        ("download" | "save", "") => vec![Msg::DownloadClicked {
            requested_at_ms: now_ms,
        }],
        ("dismiss", "") => vec![Msg::NotificationDismissed],
        // Pasting a link is the same as submitting it; the validator decides.
        _ if rest.is_empty() && word.contains("://") => submit(word),
        _ => return Command::Unknown(line.to_string()),
    };
    Command::Dispatch(msgs)
}

fn submit(url: &str) -> Vec<Msg> {
    vec![Msg::InputChanged(url.to_string()), Msg::SubmitClicked]
}

fn parse_option(text: &str) -> Option<UpscaleOption> {
    match text.to_ascii_lowercase().as_str() {
        "2x" | "standard" => Some(UpscaleOption::Standard),
        "4k" => Some(UpscaleOption::FourK),
        "8k" => Some(UpscaleOption::EightK),
        _ => None,
    }
}

fn parse_tab(text: &str) -> Option<LanguageTab> {
    match text.to_ascii_lowercase().as_str() {
        "en" | "english" => Some(LanguageTab::English),
        "hi" | "hindi" => Some(LanguageTab::Hindi),
        _ => None,
    }
}
