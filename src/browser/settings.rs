pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 10) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.120 Mobile Safari/537.36";

/// Options handed to the native surface along with every navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub user_agent: String,
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub cache_enabled: bool,
    // window.open stays inside the surface when this is off
    pub multiple_windows: bool,
    pub media_requires_user_action: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            user_agent: MOBILE_USER_AGENT.to_owned(),
            javascript_enabled: true,
            dom_storage_enabled: true,
            cache_enabled: true,
            multiple_windows: false,
            media_requires_user_action: false,
        }
    }
}
