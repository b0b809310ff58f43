//! Structured-field list parsing.
//!
//! The negotiation core only depends on [`StructuredListParser`]; the default
//! [`SfvListParser`] delegates the RFC 8941 grammar to the `sfv` crate and
//! converts its items into [`ListMember`]s.

use crate::core::error::{AcceptEventsError, Result};
use crate::core::types::{ParamValue, Parameters};

/// Primary value of a structured-field list member.
#[derive(Clone, Debug, PartialEq)]
pub enum PrimaryValue {
    /// A quoted string, e.g. `"sse"`.
    StringLiteral(String),
    /// A bare token, e.g. `sse`.
    Token(String),
    /// Anything that cannot name a protocol; holds a short description of
    /// what was found.
    Other(&'static str),
}

/// One member of a parsed list.
#[derive(Clone, Debug, PartialEq)]
pub struct ListMember {
    pub value: PrimaryValue,
    pub params: Parameters,
}

impl ListMember {
    #[must_use]
    pub fn new(value: PrimaryValue) -> Self {
        Self {
            value,
            params: Parameters::new(),
        }
    }

    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// Decodes a header value into list members.
///
/// Implementations must be pure: the same input always yields the same
/// output, and parsing never has side effects beyond allocation.
pub trait StructuredListParser: Send + Sync {
    /// Parses `raw` as a structured-field list.
    ///
    /// # Errors
    ///
    /// Returns [`AcceptEventsError::HeaderParse`] when `raw` is not a valid
    /// list.
    fn parse_list(&self, raw: &str) -> Result<Vec<ListMember>>;
}

impl<F> StructuredListParser for F
where
    F: Fn(&str) -> Result<Vec<ListMember>> + Send + Sync,
{
    fn parse_list(&self, raw: &str) -> Result<Vec<ListMember>> {
        self(raw)
    }
}

/// [`StructuredListParser`] backed by the `sfv` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct SfvListParser;

impl StructuredListParser for SfvListParser {
    fn parse_list(&self, raw: &str) -> Result<Vec<ListMember>> {
        use sfv::{List, Parser};

        let list: List = Parser::new(raw)
            .parse()
            .map_err(|e| AcceptEventsError::HeaderParse(format!("Invalid structured header: {:?}", e)))?;

        Ok(list.into_iter().map(member_from_entry).collect())
    }
}

fn member_from_entry(entry: sfv::ListEntry) -> ListMember {
    use sfv::{BareItem, ListEntry};

    let item = match entry {
        ListEntry::Item(item) => item,
        ListEntry::InnerList(_) => return ListMember::new(PrimaryValue::Other("inner list")),
    };

    let value = match item.bare_item {
        BareItem::String(s) => PrimaryValue::StringLiteral(s.into()),
        BareItem::Token(t) => PrimaryValue::Token(t.into()),
        other => PrimaryValue::Other(bare_item_kind(&other)),
    };

    let params = item
        .params
        .into_iter()
        .map(|(key, bare)| (String::from(key), param_value(bare)))
        .collect();

    ListMember { value, params }
}

fn param_value(bare: sfv::BareItem) -> ParamValue {
    use sfv::BareItem;

    match bare {
        BareItem::String(s) => ParamValue::String(s.into()),
        BareItem::Token(t) => ParamValue::Token(t.into()),
        BareItem::Integer(i) => ParamValue::Integer(i.into()),
        BareItem::Decimal(d) => {
            ParamValue::Decimal(i64::from(d.as_integer_scaled_1000()) as f64 / 1000.0)
        }
        BareItem::Boolean(b) => ParamValue::Boolean(b),
        BareItem::ByteSequence(bytes) => ParamValue::ByteSequence(bytes),
        BareItem::Date(date) => ParamValue::Date(date.unix_seconds().into()),
        BareItem::DisplayString(s) => ParamValue::DisplayString(s),
    }
}

fn bare_item_kind(bare: &sfv::BareItem) -> &'static str {
    use sfv::BareItem;

    match bare {
        BareItem::Integer(_) => "integer",
        BareItem::Decimal(_) => "decimal",
        BareItem::Boolean(_) => "boolean",
        BareItem::ByteSequence(_) => "byte sequence",
        BareItem::Date(_) => "date",
        BareItem::DisplayString(_) => "display string",
        BareItem::String(_) | BareItem::Token(_) => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Result<Vec<ListMember>> {
        SfvListParser.parse_list(raw)
    }

    #[test]
    fn test_parse_tokens() {
        let members = parse("sse, long-poll").unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].value, PrimaryValue::Token("sse".into()));
        assert_eq!(members[1].value, PrimaryValue::Token("long-poll".into()));
    }

    #[test]
    fn test_parse_string_literal() {
        let members = parse("\"web push\"").unwrap();
        assert_eq!(members[0].value, PrimaryValue::StringLiteral("web push".into()));
    }

    #[test]
    fn test_parse_params_in_order() {
        let members = parse("sse;q=0.5;version=2;live;hint=\"x\";mode=fast").unwrap();
        let params: Vec<_> = members[0].params.iter().collect();
        assert_eq!(params.len(), 5);
        assert_eq!(params[0], (&"q".to_string(), &ParamValue::Decimal(0.5)));
        assert_eq!(params[1], (&"version".to_string(), &ParamValue::Integer(2)));
        assert_eq!(params[2], (&"live".to_string(), &ParamValue::Boolean(true)));
        assert_eq!(params[3], (&"hint".to_string(), &ParamValue::String("x".into())));
        assert_eq!(params[4], (&"mode".to_string(), &ParamValue::Token("fast".into())));
    }

    #[test]
    fn test_parse_integer_item_is_other() {
        let members = parse("42").unwrap();
        assert_eq!(members[0].value, PrimaryValue::Other("integer"));
    }

    #[test]
    fn test_parse_inner_list_is_other() {
        let members = parse("(sse poll), sse").unwrap();
        assert_eq!(members[0].value, PrimaryValue::Other("inner list"));
        assert_eq!(members[1].value, PrimaryValue::Token("sse".into()));
    }

    #[test]
    fn test_parse_decimal_q() {
        let members = parse("sse;q=0.25, poll;q=1.0, push;q=0").unwrap();
        assert_eq!(members[0].params["q"], ParamValue::Decimal(0.25));
        assert_eq!(members[1].params["q"], ParamValue::Decimal(1.0));
        assert_eq!(members[2].params["q"], ParamValue::Integer(0));
    }

    #[test]
    fn test_parse_keeps_binary_and_date_params() {
        let members = parse("sse;sig=:aGk=:;since=@1659578233;label=%\"caf%c3%a9\"").unwrap();
        assert_eq!(members[0].value, PrimaryValue::Token("sse".into()));
        assert_eq!(members[0].params["sig"], ParamValue::ByteSequence(b"hi".to_vec()));
        assert_eq!(members[0].params["since"], ParamValue::Date(1_659_578_233));
        assert_eq!(members[0].params["label"], ParamValue::DisplayString("caf\u{e9}".into()));
    }

    #[test]
    fn test_parse_invalid_list() {
        let err = parse("a b c").unwrap_err();
        assert!(matches!(err, AcceptEventsError::HeaderParse(_)));
    }

    #[test]
    fn test_parse_invalid_trailing_comma() {
        assert!(parse("sse,").is_err());
    }

    #[test]
    fn test_parse_whitespace_around_members() {
        let members = parse("  sse  ,  poll  ").unwrap();
        assert_eq!(members.len(), 2);
    }

    #[test]
    fn test_closure_parser() {
        let parser = |_: &str| -> Result<Vec<ListMember>> {
            Ok(vec![ListMember::new(PrimaryValue::Token("fixed".into()))])
        };
        let members = parser.parse_list("anything").unwrap();
        assert_eq!(members[0].value, PrimaryValue::Token("fixed".into()));
    }
}
