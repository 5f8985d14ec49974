//! Explanation chunks: the unit a report is built from.

use std::fmt;

use crate::data::model::DataRecord;

// ---------------------------------------------------------------------------
// ChunkContext
// ---------------------------------------------------------------------------

/// How a chunk relates to the conclusion it explains. Any integer is accepted;
/// the associated constants are the named levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ChunkContext(pub i32);

impl ChunkContext {
    pub const VERY_POSITIVE: Self = Self(-20);
    pub const POSITIVE: Self = Self(-10);
    pub const INFO: Self = Self(0);
    pub const WARNING: Self = Self(10);
    pub const ERROR: Self = Self(20);
    pub const FATAL: Self = Self(30);

    pub fn name(self) -> Option<&'static str> {
        match self.0 {
            -20 => Some("VERY_POSITIVE"),
            -10 => Some("POSITIVE"),
            0 => Some("INFO"),
            10 => Some("WARNING"),
            20 => Some("ERROR"),
            30 => Some("FATAL"),
            _ => None,
        }
    }

    /// Parse either a level name (case-insensitive) or a plain integer.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<i32>() {
            return Some(Self(n));
        }
        match s.to_ascii_uppercase().replace('-', "_").as_str() {
            "VERY_POSITIVE" => Some(Self::VERY_POSITIVE),
            "POSITIVE" => Some(Self::POSITIVE),
            "INFO" => Some(Self::INFO),
            "WARNING" => Some(Self::WARNING),
            "ERROR" => Some(Self::ERROR),
            "FATAL" => Some(Self::FATAL),
            _ => None,
        }
    }
}

impl fmt::Display for ChunkContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "{}", self.0),
        }
    }
}

// ---------------------------------------------------------------------------
// ExplanationChunk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ChunkContent {
    Text(String),
    Data(DataRecord),
}

/// A piece of an explanation together with its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplanationChunk {
    pub context: ChunkContext,
    pub group: Option<String>,
    pub rule: Option<String>,
    pub tags: Vec<String>,
    pub content: ChunkContent,
}

impl ExplanationChunk {
    /// A chunk with default metadata.
    pub fn new(content: ChunkContent) -> Self {
        Self {
            context: ChunkContext::default(),
            group: None,
            rule: None,
            tags: Vec::new(),
            content,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ChunkContent::Text(text.into()))
    }

    pub fn data(record: DataRecord) -> Self {
        Self::new(ChunkContent::Data(record))
    }

    pub fn with_context(mut self, context: ChunkContext) -> Self {
        self.context = context;
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// The data record, if this is a data chunk.
    pub fn as_data(&self) -> Option<&DataRecord> {
        match &self.content {
            ChunkContent::Data(record) => Some(record),
            ChunkContent::Text(_) => None,
        }
    }
}
