use super::validate_date;
use crate::error::{Error, Result};
use crate::tags::attr;
use hlsforged_attrs::{AttrError, AttributeList, AttributeValue, OptionalAttr, ValueKind};
use std::collections::BTreeMap;

/// Value of a client-defined `X-` attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClientAttribute {
    String(String),
    Bytes(Vec<u8>),
    Float(f64),
}

impl ClientAttribute {
    fn to_value(&self) -> AttributeValue {
        match self {
            ClientAttribute::String(s) => AttributeValue::String(s.clone()),
            ClientAttribute::Bytes(b) => AttributeValue::Bytes(b.clone()),
            ClientAttribute::Float(f) => AttributeValue::Float(*f),
        }
    }
}

/// A range of time with associated properties, from `#EXT-X-DATERANGE`.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DateRange {
    pub id: String,
    pub class: Option<String>,
    /// ISO-8601 start date.
    pub start_date: String,
    /// ISO-8601 end date.
    pub end_date: Option<String>,
    /// Duration in seconds.
    pub duration: Option<f64>,
    /// Expected duration in seconds.
    pub planned_duration: Option<f64>,
    /// `X-`-prefixed attributes, keyed by full name.
    pub client_attributes: BTreeMap<String, ClientAttribute>,
    pub scte35_cmd: Option<Vec<u8>>,
    pub scte35_out: Option<Vec<u8>>,
    pub scte35_in: Option<Vec<u8>>,
    /// The range ends where the next range of the same class starts.
    pub end_on_next: bool,
}

impl DateRange {
    /// Create a date range with the two required fields.
    pub fn new(id: impl Into<String>, start_date: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start_date: start_date.into(),
            ..Self::default()
        }
    }

    /// Parse the attribute list of an `#EXT-X-DATERANGE` tag.
    pub fn parse(body: &str) -> Result<Self> {
        Self::from_attributes(&AttributeList::parse(body)?)
    }

    pub(crate) fn from_attributes(attrs: &AttributeList) -> Result<Self> {
        let end_on_next = match attrs.enumerated(attr::END_ON_NEXT).optional()? {
            None => false,
            Some("YES") => true,
            Some(_) => return Err(Error::InvalidAttributeValue(attr::END_ON_NEXT)),
        };

        let mut client_attributes = BTreeMap::new();
        for (name, value) in attrs {
            if !name.starts_with("X-") {
                continue;
            }
            let value = match value {
                AttributeValue::String(s) => ClientAttribute::String(s.clone()),
                AttributeValue::Bytes(b) => ClientAttribute::Bytes(b.clone()),
                AttributeValue::Float(f) => ClientAttribute::Float(*f),
                AttributeValue::Integer(n) => ClientAttribute::Float(*n as f64),
                other => {
                    return Err(AttrError::TypeMismatch {
                        name: name.clone(),
                        expected: ValueKind::QuotedString,
                        actual: other.kind(),
                    }
                    .into())
                }
            };
            client_attributes.insert(name.clone(), value);
        }

        let range = Self {
            id: attrs.string(attr::ID)?.to_string(),
            class: attrs.string(attr::CLASS).optional()?.map(str::to_string),
            start_date: attrs.string(attr::START_DATE)?.to_string(),
            end_date: attrs.string(attr::END_DATE).optional()?.map(str::to_string),
            duration: attrs.float(attr::DURATION).optional()?,
            planned_duration: attrs.float(attr::PLANNED_DURATION).optional()?,
            client_attributes,
            scte35_cmd: attrs.bytes(attr::SCTE35_CMD).optional()?.map(<[u8]>::to_vec),
            scte35_out: attrs.bytes(attr::SCTE35_OUT).optional()?.map(<[u8]>::to_vec),
            scte35_in: attrs.bytes(attr::SCTE35_IN).optional()?.map(<[u8]>::to_vec),
            end_on_next,
        };

        range.validate()?;
        Ok(range)
    }

    /// Check the date formats and the `END-ON-NEXT` constraints.
    pub fn validate(&self) -> Result<()> {
        validate_date(&self.start_date)?;
        if let Some(end_date) = &self.end_date {
            validate_date(end_date)?;
        }

        if self.end_on_next {
            if self.class.is_none() {
                return Err(AttrError::missing(attr::CLASS).into());
            }
            if self.duration.is_some() {
                return Err(Error::InvalidAttributeValue(attr::DURATION));
            }
            if self.end_date.is_some() {
                return Err(Error::InvalidAttributeValue(attr::END_DATE));
            }
        }

        Ok(())
    }

    /// Attribute list for an `#EXT-X-DATERANGE` tag.
    pub fn to_attributes(&self) -> Result<AttributeList> {
        self.validate()?;

        let mut attrs = AttributeList::new().with(attr::ID, self.id.as_str());
        attrs.insert_opt(attr::CLASS, self.class.as_deref());
        attrs.insert(attr::START_DATE, self.start_date.as_str());
        attrs.insert_opt(attr::END_DATE, self.end_date.as_deref());
        attrs.insert_opt(attr::DURATION, self.duration.map(AttributeValue::Float));
        attrs.insert_opt(
            attr::PLANNED_DURATION,
            self.planned_duration.map(AttributeValue::Float),
        );

        for (name, value) in &self.client_attributes {
            if !name.starts_with("X-") {
                return Err(AttrError::IllegalName(name.clone()).into());
            }
            attrs.insert(name.as_str(), value.to_value());
        }

        attrs.insert_opt(attr::SCTE35_CMD, self.scte35_cmd.clone());
        attrs.insert_opt(attr::SCTE35_OUT, self.scte35_out.clone());
        attrs.insert_opt(attr::SCTE35_IN, self.scte35_in.clone());

        if self.end_on_next {
            attrs.insert(attr::END_ON_NEXT, AttributeValue::enumerated("YES"));
        }

        Ok(attrs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_splice_out() {
        let range = DateRange::parse(
            "ID=\"splice-6FFFFFF0\",START-DATE=\"2014-03-05T11:15:00Z\",PLANNED-DURATION=59.993,SCTE35-OUT=0xFC002F0000000000FF000014056FFFFFF000E011622DCAFF000052636200000000000A0008029896F50000008700000000",
        )
        .unwrap();

        assert_eq!(range.id, "splice-6FFFFFF0");
        assert_eq!(range.start_date, "2014-03-05T11:15:00Z");
        assert_eq!(range.planned_duration, Some(59.993));
        let out = range.scte35_out.unwrap();
        assert_eq!(out[0], 0xfc);
        assert_eq!(out.len(), 49);
    }

    #[test]
    fn test_client_attributes() {
        let range = DateRange::parse(
            "ID=\"ad\",START-DATE=\"2014-03-05T11:15:00Z\",X-COM-EXAMPLE-AD-ID=\"XYZ123\",X-SCORE=7,X-RATIO=0.5,X-BLOB=0xAB",
        )
        .unwrap();

        assert_eq!(
            range.client_attributes.get("X-COM-EXAMPLE-AD-ID"),
            Some(&ClientAttribute::String("XYZ123".into()))
        );
        assert_eq!(range.client_attributes.get("X-SCORE"), Some(&ClientAttribute::Float(7.0)));
        assert_eq!(range.client_attributes.get("X-RATIO"), Some(&ClientAttribute::Float(0.5)));
        assert_eq!(
            range.client_attributes.get("X-BLOB"),
            Some(&ClientAttribute::Bytes(vec![0xab]))
        );
    }

    #[test]
    fn test_enumerated_client_attribute_is_rejected() {
        assert_matches!(
            DateRange::parse("ID=\"a\",START-DATE=\"2014-03-05\",X-MODE=FAST"),
            Err(Error::Attr(AttrError::TypeMismatch { .. }))
        );
    }

    #[test]
    fn test_end_on_next_rules() {
        let ok = DateRange::parse("ID=\"a\",CLASS=\"c\",START-DATE=\"2014-03-05\",END-ON-NEXT=YES").unwrap();
        assert!(ok.end_on_next);

        assert_matches!(
            DateRange::parse("ID=\"a\",CLASS=\"c\",START-DATE=\"2014-03-05\",END-ON-NEXT=NO"),
            Err(Error::InvalidAttributeValue("END-ON-NEXT"))
        );
        assert_matches!(
            DateRange::parse("ID=\"a\",START-DATE=\"2014-03-05\",END-ON-NEXT=YES"),
            Err(Error::Attr(AttrError::MissingRequiredAttribute(name))) if name == "CLASS"
        );
        assert_matches!(
            DateRange::parse("ID=\"a\",CLASS=\"c\",START-DATE=\"2014-03-05\",DURATION=1.0,END-ON-NEXT=YES"),
            Err(Error::InvalidAttributeValue("DURATION"))
        );
        assert_matches!(
            DateRange::parse("ID=\"a\",CLASS=\"c\",START-DATE=\"2014-03-05\",END-DATE=\"2014-03-06\",END-ON-NEXT=YES"),
            Err(Error::InvalidAttributeValue("END-DATE"))
        );
    }

    #[test]
    fn test_invalid_dates() {
        assert_matches!(
            DateRange::parse("ID=\"a\",START-DATE=\"soon\""),
            Err(Error::BadSyntax(_))
        );
        assert_matches!(
            DateRange::parse("ID=\"a\",START-DATE=\"2014-03-05\",END-DATE=\"later\""),
            Err(Error::BadSyntax(_))
        );
    }

    #[test]
    fn test_encode() {
        let mut range = DateRange::new("ad-1", "2014-03-05T11:15:00Z");
        range.duration = Some(30.0);
        range
            .client_attributes
            .insert("X-AD".into(), ClientAttribute::String("x".into()));
        range.scte35_in = Some(vec![0xfc, 0x00]);

        assert_eq!(
            range.to_attributes().unwrap().encode().unwrap(),
            "ID=\"ad-1\",START-DATE=\"2014-03-05T11:15:00Z\",DURATION=30.0,X-AD=\"x\",SCTE35-IN=0xFC00"
        );
    }

    #[test]
    fn test_encode_rejects_unprefixed_client_attribute() {
        let mut range = DateRange::new("a", "2014-03-05");
        range
            .client_attributes
            .insert("AD".into(), ClientAttribute::Float(1.0));
        assert_matches!(
            range.to_attributes(),
            Err(Error::Attr(AttrError::IllegalName(_)))
        );
    }
}
