use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for overlay element ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identifier of a canvas element (text overlay, scene device).
/// Internally a `Spur` index: 4 bytes, `Copy`, O(1) `Eq` and `Hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string as an ElementId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}

/// Identifier of a guide line.
///
/// User guides get ids from a [`GuideIdSource`]; derived guides use
/// descriptive ids such as `smart-center-x` or `snap-y`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuideId(String);

impl GuideId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GuideId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Source of fresh ids for user-placed guides.
pub trait GuideIdSource {
    fn next_id(&mut self) -> GuideId;
}

/// Monotonic `guide-N` ids. Deterministic, so tests can assert on them.
#[derive(Debug, Clone, Default)]
pub struct SequentialGuideIds {
    next: u64,
}

impl SequentialGuideIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after any `guide-N` ids already in use,
    /// e.g. guides restored from a saved mockup.
    pub fn after<'a>(existing: impl IntoIterator<Item = &'a GuideId>) -> Self {
        let next = existing
            .into_iter()
            .filter_map(|id| id.as_str().strip_prefix("guide-"))
            .filter_map(|n| n.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { next }
    }
}

impl GuideIdSource for SequentialGuideIds {
    fn next_id(&mut self) -> GuideId {
        self.next += 1;
        GuideId(format!("guide-{}", self.next))
    }
}
