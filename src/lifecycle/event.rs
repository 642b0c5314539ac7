/// Everything the embedded browser reports back to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum BrowserEvent {
    LoadStart,
    LoadProgress(f64),
    LoadEnd,
    LoadError(String),
    HttpError { status_code: u16, url: Option<String> },
    ContentProcessCrash,
    Message(String),
}
