use anyhow::Result;

/// Markup that a [`TrustPolicy`] has approved for insertion.
///
/// Hosts only accept this type, so rewriter output cannot reach a document
/// without passing a policy first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedMarkup(String);

impl TrustedMarkup {
    /// Wraps `html` without any checks. Meant for [`TrustPolicy`]
    /// implementations only.
    pub fn assume_trusted(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Gate between rewriter output and the host document.
///
/// Mirrors a browser trusted-types policy: a named factory that turns a
/// plain string into markup the host will accept, or refuses it.
pub trait TrustPolicy {
    fn name(&self) -> &str;

    fn create_html(&self, html: String) -> Result<TrustedMarkup>;
}

/// Accepts rewriter output unchanged.
///
/// The rewriter only emits label elements with fixed attributes around text
/// that was already in the block, so passing it through adds nothing the
/// block did not contain.
#[derive(Debug, Clone)]
pub struct PassThroughPolicy {
    name: String,
}

impl PassThroughPolicy {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for PassThroughPolicy {
    fn default() -> Self {
        Self::new("hashchip")
    }
}

impl TrustPolicy for PassThroughPolicy {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_html(&self, html: String) -> Result<TrustedMarkup> {
        Ok(TrustedMarkup::assume_trusted(html))
    }
}
