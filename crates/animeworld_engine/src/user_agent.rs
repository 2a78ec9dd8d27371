use std::sync::atomic::{AtomicUsize, Ordering};

/// Supplies the client identity presented on each outbound call.
pub trait UserAgentSource: Send + Sync {
    fn next_user_agent(&self) -> String;
}

const BUILTIN_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
];

/// Round-robin over a fixed list of browser identities.
#[derive(Debug)]
pub struct RotatingUserAgents {
    agents: Vec<String>,
    cursor: AtomicUsize,
}

impl RotatingUserAgents {
    /// An empty list falls back to the built-in identities.
    pub fn new(agents: Vec<String>) -> Self {
        let agents: Vec<String> = agents
            .into_iter()
            .map(|agent| agent.trim().to_string())
            .filter(|agent| !agent.is_empty())
            .collect();
        if agents.is_empty() {
            return Self::builtin();
        }
        Self {
            agents,
            cursor: AtomicUsize::new(0),
        }
    }

    pub fn builtin() -> Self {
        Self {
            agents: BUILTIN_AGENTS.iter().map(|s| s.to_string()).collect(),
            cursor: AtomicUsize::new(0),
        }
    }
}

impl Default for RotatingUserAgents {
    fn default() -> Self {
        Self::builtin()
    }
}

impl UserAgentSource for RotatingUserAgents {
    fn next_user_agent(&self) -> String {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed) % self.agents.len();
        self.agents[index].clone()
    }
}

/// Always presents the same identity.
#[derive(Debug, Clone)]
pub struct FixedUserAgent(pub String);

impl UserAgentSource for FixedUserAgent {
    fn next_user_agent(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_wraps_around() {
        let agents = RotatingUserAgents::new(vec!["a".into(), " ".into(), "b".into()]);
        assert_eq!(agents.agents.len(), 2);
        let seen: Vec<String> = (0..5).map(|_| agents.next_user_agent()).collect();
        assert_eq!(seen, ["a", "b", "a", "b", "a"]);
    }

    #[test]
    fn empty_list_uses_builtin_agents() {
        let agents = RotatingUserAgents::new(Vec::new());
        assert_eq!(agents.agents.len(), BUILTIN_AGENTS.len());
        assert!(agents.next_user_agent().starts_with("Mozilla/5.0"));
    }
}
