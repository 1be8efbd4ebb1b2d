use crate::error::{Error, Result};
use crate::tags::attr;
use hlsforged_attrs::{AttrError, AttributeList, AttributeValue, OptionalAttr};
use std::fmt;
use std::str::FromStr;

/// Segment encryption method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncryptionMethod {
    /// Segments are not encrypted.
    None,
    /// Whole-segment AES-128 CBC.
    Aes128,
    /// Sample-level encryption.
    SampleAes,
}

impl EncryptionMethod {
    /// Tag spelling of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            EncryptionMethod::None => "NONE",
            EncryptionMethod::Aes128 => "AES-128",
            EncryptionMethod::SampleAes => "SAMPLE-AES",
        }
    }
}

impl FromStr for EncryptionMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "NONE" => Ok(EncryptionMethod::None),
            "AES-128" => Ok(EncryptionMethod::Aes128),
            "SAMPLE-AES" => Ok(EncryptionMethod::SampleAes),
            other => Err(Error::BadEncryptionMethod(other.to_string())),
        }
    }
}

impl fmt::Display for EncryptionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decryption parameters from `#EXT-X-KEY` or `#EXT-X-SESSION-KEY`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    pub method: EncryptionMethod,
    /// Where to fetch the key. Required unless the method is `None`.
    pub uri: Option<String>,
    /// 128-bit initialization vector.
    pub iv: Option<[u8; 16]>,
    /// Key representation; absent means `identity`.
    pub key_format: Option<String>,
    pub key_format_versions: Vec<u32>,
}

impl Key {
    /// A `METHOD=NONE` key, which clears any earlier key.
    pub fn none() -> Self {
        Self::new(EncryptionMethod::None, None)
    }

    /// Create a key with no IV or format information.
    pub fn new(method: EncryptionMethod, uri: Option<String>) -> Self {
        Self {
            method,
            uri,
            iv: None,
            key_format: None,
            key_format_versions: Vec::new(),
        }
    }

    /// Parse a key attribute list against the playlist's declared version.
    pub fn parse(body: &str, version: u32) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?, version)
    }

    pub(crate) fn from_attributes(attrs: &AttributeList, version: u32) -> Result<Self> {
        let method: EncryptionMethod = attrs.enumerated(attr::METHOD)?.parse()?;

        let uri = match attrs.string(attr::URI).optional()? {
            Some(uri) => Some(uri.to_string()),
            None if method == EncryptionMethod::None => None,
            None => return Err(AttrError::missing(attr::URI).into()),
        };

        let iv = attrs.bytes(attr::IV).optional()?.map(pad_iv).transpose()?;

        let key_format = attrs.string(attr::KEYFORMAT).optional()?.map(str::to_string);
        let versions = attrs.string(attr::KEYFORMATVERSIONS).optional()?;

        let key = Self {
            method,
            uri,
            iv,
            key_format,
            key_format_versions: versions.map(parse_versions).transpose()?.unwrap_or_default(),
        };

        let required = key.required_version();
        if version < required {
            return Err(Error::CompatibilityVersion {
                required,
                declared: version,
            });
        }

        Ok(key)
    }

    /// Lowest protocol version that can carry this key.
    pub fn required_version(&self) -> u32 {
        if self.key_format.is_some() || !self.key_format_versions.is_empty() {
            5
        } else {
            1
        }
    }

    /// Attribute list for a key tag.
    pub fn to_attributes(&self) -> Result<AttributeList> {
        let mut attrs =
            AttributeList::new().with(attr::METHOD, AttributeValue::enumerated(self.method.as_str()));

        match &self.uri {
            Some(uri) => {
                attrs.insert(attr::URI, uri.as_str());
            }
            None if self.method != EncryptionMethod::None => {
                return Err(AttrError::missing(attr::URI).into());
            }
            None => {}
        }

        attrs.insert_opt(attr::IV, self.iv.map(|iv| iv.to_vec()));
        attrs.insert_opt(attr::KEYFORMAT, self.key_format.as_deref());

        if !self.key_format_versions.is_empty() {
            let versions: Vec<String> = self
                .key_format_versions
                .iter()
                .map(u32::to_string)
                .collect();
            attrs.insert(attr::KEYFORMATVERSIONS, versions.join("/"));
        }

        Ok(attrs)
    }
}

/// Left-pad a decoded IV to 16 bytes.
fn pad_iv(bytes: &[u8]) -> Result<[u8; 16]> {
    if bytes.len() > 16 {
        return Err(Error::InvalidAttributeValue(attr::IV));
    }
    let mut iv = [0u8; 16];
    iv[16 - bytes.len()..].copy_from_slice(bytes);
    Ok(iv)
}

fn parse_versions(text: &str) -> Result<Vec<u32>> {
    text.split('/')
        .map(|v| {
            v.parse::<u32>()
                .map_err(|_| Error::InvalidAttributeValue(attr::KEYFORMATVERSIONS))
        })
        .collect()
}
