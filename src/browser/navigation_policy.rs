use url::Url;

/// Decides which URLs the embedded browser may follow. An empty allow-list lets
/// everything through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationPolicy {
    allowed_hosts: Vec<String>,
}

impl NavigationPolicy {
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn with_allowed_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_hosts: hosts
                .into_iter()
                .map(|h| h.into().trim().to_ascii_lowercase())
                .filter(|h| !h.is_empty())
                .collect(),
        }
    }

    pub fn is_allow_all(&self) -> bool {
        self.allowed_hosts.is_empty()
    }

    pub fn should_start_load(&self, target: &str) -> bool {
        if self.is_allow_all() {
            return true;
        }

        let Ok(url) = Url::parse(target) else {
            tracing::warn!("Blocking unparseable navigation target: {}", target);
            return false;
        };
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();

        let allowed = self.allowed_hosts.iter().any(|allowed| {
            host == *allowed || host.strip_suffix(allowed.as_str()).is_some_and(|p| p.ends_with('.'))
        });
        if !allowed {
            tracing::info!("Navigation to {} blocked by policy.", host);
        }
        allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_policy_allows_everything() {
        let policy = NavigationPolicy::allow_all();
        assert!(policy.should_start_load("https://skin-alyze.vercel.app/"));
        assert!(policy.should_start_load("https://accounts.google.com/o/oauth2"));
        assert!(policy.should_start_load("not a url"));
    }

    #[test]
    fn allow_list_matches_hosts_and_subdomains() {
        let policy = NavigationPolicy::with_allowed_hosts(["Vercel.app"]);
        assert!(policy.should_start_load("https://vercel.app/"));
        assert!(policy.should_start_load("https://skin-alyze.vercel.app/scan"));
        assert!(!policy.should_start_load("https://evilvercel.app/"));
        assert!(!policy.should_start_load("https://example.com/"));
        assert!(!policy.should_start_load("mailto:someone@example.com"));
        assert!(!policy.should_start_load("::garbage::"));
    }

    #[test]
    fn blank_entries_are_discarded() {
        let policy = NavigationPolicy::with_allowed_hosts(["", "  ", "vercel.app"]);
        assert!(!policy.is_allow_all());
        assert!(!policy.should_start_load("https://example.com./"));
        assert!(!policy.should_start_load("https://example.com/"));
        assert!(policy.should_start_load("https://skin-alyze.vercel.app/"));

        assert!(NavigationPolicy::with_allowed_hosts([""]).is_allow_all());
    }
}
