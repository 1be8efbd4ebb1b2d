use crate::error::Result;
use crate::tags::attr;
use hlsforged_attrs::{AttrError, AttributeList, OptionalAttr};

/// Payload of a session data entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionDataContent {
    /// Inline `VALUE`.
    Value(String),
    /// `URI` of a JSON resource.
    Uri(String),
}

/// One `#EXT-X-SESSION-DATA` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionDataEntry {
    /// `DATA-ID`, usually reverse-DNS.
    pub id: String,
    pub language: Option<String>,
    pub content: SessionDataContent,
}

impl SessionDataEntry {
    /// Parse the attribute list of an `#EXT-X-SESSION-DATA` tag.
    ///
    /// When both `VALUE` and `URI` are present, `VALUE` wins.
    pub fn parse(body: &str) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?)
    }

    pub(crate) fn from_attributes(attrs: &AttributeList) -> Result<Self> {
        let id = attrs.string(attr::DATA_ID)?.to_string();
        let language = attrs.string(attr::LANGUAGE).optional()?.map(str::to_string);

        let content = if let Some(value) = attrs.string(attr::VALUE).optional()? {
            SessionDataContent::Value(value.to_string())
        } else if let Some(uri) = attrs.string(attr::URI).optional()? {
            SessionDataContent::Uri(uri.to_string())
        } else {
            return Err(AttrError::missing(attr::VALUE).into());
        };

        Ok(Self {
            id,
            language,
            content,
        })
    }

    /// Attribute list for an `#EXT-X-SESSION-DATA` tag.
    pub fn to_attributes(&self) -> AttributeList {
        let mut attrs = AttributeList::new().with(attr::DATA_ID, self.id.as_str());
        match &self.content {
            SessionDataContent::Value(value) => attrs.insert(attr::VALUE, value.as_str()),
            SessionDataContent::Uri(uri) => attrs.insert(attr::URI, uri.as_str()),
        };
        attrs.insert_opt(attr::LANGUAGE, self.language.as_deref());
        attrs
    }

    fn matches(&self, id: &str, language: Option<&str>) -> bool {
        self.id == id && self.language.as_deref() == language
    }
}

/// Session data entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionData {
    pub entries: Vec<SessionDataEntry>,
}

impl SessionData {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry for `id` and `language`.
    pub fn entry(&self, id: &str, language: Option<&str>) -> Option<&SessionDataEntry> {
        self.entries.iter().find(|e| e.matches(id, language))
    }

    /// Inline value for `id` and `language`, if the entry has one.
    pub fn value(&self, id: &str, language: Option<&str>) -> Option<&str> {
        match &self.entry(id, language)?.content {
            SessionDataContent::Value(value) => Some(value),
            SessionDataContent::Uri(_) => None,
        }
    }

    /// URI for `id` and `language`, if the entry has one.
    pub fn uri(&self, id: &str, language: Option<&str>) -> Option<&str> {
        match &self.entry(id, language)?.content {
            SessionDataContent::Uri(uri) => Some(uri),
            SessionDataContent::Value(_) => None,
        }
    }

    /// Set an inline value, replacing any existing entry for `id` and `language`.
    pub fn set_value(&mut self, id: &str, language: Option<&str>, value: impl Into<String>) {
        self.set(id, language, SessionDataContent::Value(value.into()));
    }

    /// Set a URI, replacing any existing entry for `id` and `language`.
    pub fn set_uri(&mut self, id: &str, language: Option<&str>, uri: impl Into<String>) {
        self.set(id, language, SessionDataContent::Uri(uri.into()));
    }

    fn set(&mut self, id: &str, language: Option<&str>, content: SessionDataContent) {
        match self.entries.iter_mut().find(|e| e.matches(id, language)) {
            Some(entry) => entry.content = content,
            None => self.entries.push(SessionDataEntry {
                id: id.to_string(),
                language: language.map(str::to_string),
                content,
            }),
        }
    }

    /// Append an entry without checking for an existing one.
    pub fn push(&mut self, entry: SessionDataEntry) {
        self.entries.push(entry);
    }

    /// Iterate over the entries in order.
    pub fn iter(&self) -> std::slice::Iter<'_, SessionDataEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a SessionData {
    type Item = &'a SessionDataEntry;
    type IntoIter = std::slice::Iter<'a, SessionDataEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
