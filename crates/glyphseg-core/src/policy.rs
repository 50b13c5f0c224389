#![forbid(unsafe_code)]

//! Cluster decoding policy.
//!
//! A [`ClusterPolicy`] gathers the knobs that change how clusters are
//! measured and terminated. Resolution is deterministic given the
//! environment: [`ClusterPolicy::from_env`] reads the process environment,
//! and [`ClusterPolicy::from_env_with`] takes any lookup closure so tests
//! never touch global state.

/// Environment variable enabling wide East Asian Ambiguous characters (`1/0/true/false`).
const ENV_CJK_WIDTH: &str = "GLYPHSEG_CJK_WIDTH";
/// Environment variable selecting the join scope (`cluster` or `next`).
const ENV_JOIN_SCOPE: &str = "GLYPHSEG_JOIN_SCOPE";
/// Environment variable selecting dangling-joiner handling (`accept` or `reject`).
const ENV_DANGLING_JOIN: &str = "GLYPHSEG_DANGLING_JOIN";

/// How long the join state lasts once a zero-width joiner is seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinScope {
    /// Active until the cluster ends; every later codepoint is joined.
    #[default]
    Cluster,
    /// Active for the codepoint that follows the joiner only. Boundary
    /// detection against the cluster's first codepoint resumes afterwards.
    NextCodepoint,
}

impl JoinScope {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "cluster" | "all" => Some(Self::Cluster),
            "next" | "next-codepoint" | "codepoint" => Some(Self::NextCodepoint),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cluster => "cluster",
            Self::NextCodepoint => "next",
        }
    }
}

/// What to do when text ends right after a zero-width joiner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DanglingJoin {
    /// Return the cluster as-is, joiner included.
    #[default]
    Accept,
    /// Fail with [`ClusterError::IncompleteCluster`](crate::ClusterError::IncompleteCluster).
    Reject,
}

impl DanglingJoin {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "accept" | "allow" | "lenient" => Some(Self::Accept),
            "reject" | "error" | "strict" => Some(Self::Reject),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Reject => "reject",
        }
    }
}

/// Cluster decoding policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterPolicy {
    /// Whether East Asian Ambiguous characters occupy two columns.
    pub cjk_width: bool,
    /// Lifetime of the join state.
    pub join_scope: JoinScope,
    /// Handling of text that ends on a zero-width joiner.
    pub dangling_join: DanglingJoin,
}

impl ClusterPolicy {
    /// Resolve the policy from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Resolve the policy using a custom environment lookup (for tests).
    ///
    /// Unset or unparseable variables keep their defaults.
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();
        if let Some(value) = get_env(ENV_CJK_WIDTH).and_then(|v| parse_bool(&v)) {
            policy.cjk_width = value;
        }
        if let Some(scope) = get_env(ENV_JOIN_SCOPE).and_then(|v| JoinScope::parse(&v)) {
            policy.join_scope = scope;
        }
        if let Some(dangling) = get_env(ENV_DANGLING_JOIN).and_then(|v| DanglingJoin::parse(&v)) {
            policy.dangling_join = dangling;
        }
        policy
    }

    #[must_use]
    pub const fn with_cjk_width(mut self, cjk_width: bool) -> Self {
        self.cjk_width = cjk_width;
        self
    }

    #[must_use]
    pub const fn with_join_scope(mut self, join_scope: JoinScope) -> Self {
        self.join_scope = join_scope;
        self
    }

    #[must_use]
    pub const fn with_dangling_join(mut self, dangling_join: DanglingJoin) -> Self {
        self.dangling_join = dangling_join;
        self
    }

    /// Serialize policy to JSON (for diagnostics/evidence logs).
    #[must_use]
    pub fn to_json(&self) -> String {
        format!(
            r#"{{"cjk_width":{},"join_scope":"{}","dangling_join":"{}"}}"#,
            self.cjk_width,
            self.join_scope.as_str(),
            self.dangling_join.as_str()
        )
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
