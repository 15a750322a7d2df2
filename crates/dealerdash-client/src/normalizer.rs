//! Flattens SOAP replies into key/value data.
//!
//! Elements are matched by local name, so `soap:Body`, `diffgr:diffgram` and
//! default namespace declarations all read the same. Every element under the
//! first `Body` that carries non-blank text contributes `name -> text`; on a
//! repeated name the last one wins. Nesting is not preserved. In mixed
//! content only the text before the first child element counts, so
//! `<A>foo<B>x</B>bar</A>` reads as `A = foo`, `B = x`.

use dealerdash_core::{DashError, DashResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Flat response data, keyed by element local name.
pub type ResponseData = BTreeMap<String, String>;

const STRUCTURAL: [&str; 2] = ["Body", "Envelope"];

/// A SOAP fault returned in place of a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoapFault {
    pub code: String,
    pub message: String,
}

impl SoapFault {
    /// Picks a fault out of already flattened data.
    #[must_use]
    pub fn from_data(data: &ResponseData) -> Option<Self> {
        let message = data.get("faultstring")?.clone();
        let code = data
            .get("faultcode")
            .cloned()
            .unwrap_or_else(|| "soap:Server".to_string());
        Some(Self { code, message })
    }
}

impl From<SoapFault> for DashError {
    fn from(fault: SoapFault) -> Self {
        Self::UpstreamFault {
            code: fault.code,
            message: fault.message,
        }
    }
}

/// Extracts a SOAP fault from a raw reply, if it is well-formed and has one.
#[must_use]
pub fn fault(raw: &str) -> Option<SoapFault> {
    parse(raw).ok().as_ref().and_then(SoapFault::from_data)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyState {
    Before,
    /// Inside the body; holds the stack depth of the `Body` element itself.
    Inside(usize),
    After,
}

struct Frame {
    name: String,
    text: String,
    // Set once a child element opens; later text is tail text.
    has_child: bool,
}

/// Parses a raw reply. A document without a `Body` yields empty data;
/// anything that is not a single well-formed XML document is an error.
pub fn parse(raw: &str) -> DashResult<ResponseData> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut data = ResponseData::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut body = BodyState::Before;
    let mut seen_root = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            DashError::normalization(format!(
                "invalid XML at position {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(start) => {
                open_element(&mut seen_root, &mut stack)?;
                let name = local_name(&start)?;
                if body == BodyState::Before && name == "Body" {
                    body = BodyState::Inside(stack.len());
                }
                stack.push(Frame {
                    name,
                    text: String::new(),
                    has_child: false,
                });
            }
            Event::Empty(_) => {
                open_element(&mut seen_root, &mut stack)?;
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| DashError::normalization("unexpected closing tag"))?;
                match body {
                    BodyState::Inside(depth) if stack.len() == depth => body = BodyState::After,
                    BodyState::Inside(depth) if stack.len() > depth => {
                        let text = frame.text.trim();
                        if !text.is_empty() && !STRUCTURAL.contains(&frame.name.as_str()) {
                            data.insert(frame.name, text.to_string());
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| DashError::normalization(format!("invalid text: {}", e)))?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(cdata) => {
                let text = std::str::from_utf8(&cdata)
                    .map_err(|e| DashError::normalization(format!("invalid CDATA: {}", e)))?;
                append_text(&mut stack, text)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(DashError::normalization(format!(
            "document ended with {} unclosed element(s)",
            stack.len()
        )));
    }
    if !seen_root {
        return Err(DashError::normalization("no root element"));
    }

    Ok(data)
}

fn open_element(seen_root: &mut bool, stack: &mut [Frame]) -> DashResult<()> {
    match stack.last_mut() {
        Some(parent) => parent.has_child = true,
        None if *seen_root => return Err(DashError::normalization("multiple root elements")),
        None => *seen_root = true,
    }
    Ok(())
}

fn append_text(stack: &mut [Frame], text: &str) -> DashResult<()> {
    match stack.last_mut() {
        Some(frame) => {
            if !frame.has_child {
                frame.text.push_str(text);
            }
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(DashError::normalization("text outside the root element")),
    }
}

fn local_name(start: &BytesStart<'_>) -> DashResult<String> {
    let local = start.local_name();
    std::str::from_utf8(local.as_ref())
        .map(str::to_string)
        .map_err(|e| DashError::normalization(format!("invalid element name: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEALS_REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <PullDealsResponse xmlns="http://tempuri.org/">
      <PullDealsResult>
        <diffgr:diffgram xmlns:diffgr="urn:schemas-microsoft-com:xml-diffgram-v1">
          <Deal>
            <DealNumber>1001</DealNumber>
            <Amount>  28500.00  </Amount>
          </Deal>
          <Deal>
            <DealNumber>1002</DealNumber>
          </Deal>
        </diffgr:diffgram>
      </PullDealsResult>
    </PullDealsResponse>
  </soap:Body>
</soap:Envelope>"#;

    #[test]
    fn test_flattens_by_local_name() {
        let data = parse(DEALS_REPLY).unwrap();

        assert_eq!(data.get("DealNumber").map(String::as_str), Some("1002"));
        assert_eq!(data.get("Amount").map(String::as_str), Some("28500.00"));
        assert!(!data.contains_key("Deal"));
        assert!(!data.contains_key("Body"));
        assert_eq!(data.len(), 2);
    }

    #[test]
    fn test_empty_body() {
        let raw = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body/></soap:Envelope>"#;
        assert!(parse(raw).unwrap().is_empty());

        let raw = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/"><soap:Body></soap:Body></soap:Envelope>"#;
        assert!(parse(raw).unwrap().is_empty());
    }

    #[test]
    fn test_missing_body_is_empty() {
        let data = parse("<Envelope><Header><Token>abc</Token></Header></Envelope>").unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_ignores_elements_after_body() {
        let raw = "<Envelope><Body><A>1</A></Body><Trailer><B>2</B></Trailer></Envelope>";
        let data = parse(raw).unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("A").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_entities_and_cdata() {
        let raw = "<Envelope><Body><Name>Smith &amp; Sons</Name><Note><![CDATA[<raw>]]></Note></Body></Envelope>";
        let data = parse(raw).unwrap();
        assert_eq!(data.get("Name").map(String::as_str), Some("Smith & Sons"));
        assert_eq!(data.get("Note").map(String::as_str), Some("<raw>"));
    }

    #[test]
    fn test_mixed_content_keeps_leading_text() {
        let data = parse("<Envelope><Body><A>foo<B>x</B>bar</A></Body></Envelope>").unwrap();
        assert_eq!(data.get("A").map(String::as_str), Some("foo"));
        assert_eq!(data.get("B").map(String::as_str), Some("x"));

        let data = parse("<Envelope><Body><A><B>x</B>tail</A></Body></Envelope>").unwrap();
        assert!(!data.contains_key("A"));
    }

    #[test]
    fn test_malformed_inputs() {
        let cases = [
            "",
            "not xml at all",
            "<Envelope><Body><A>1</B></Body></Envelope>",
            "<Envelope><Body><A>1</A>",
            "<Envelope/><Envelope/>",
            "stray<Envelope/>",
            "<Envelope/>stray",
        ];
        for raw in cases {
            assert!(
                matches!(parse(raw), Err(DashError::Normalization(_))),
                "expected normalization error for {:?}",
                raw
            );
        }
    }

    #[test]
    fn test_fault_extraction() {
        let raw = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Client</faultcode>
      <faultstring>Invalid credentials</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

        let fault = fault(raw).unwrap();
        assert_eq!(fault.code, "soap:Client");
        assert_eq!(fault.message, "Invalid credentials");

        assert!(super::fault(DEALS_REPLY).is_none());
        assert!(super::fault("<html>502 Bad Gateway</html").is_none());
    }
}
