//! SOAP 1.1 request envelope construction.
//!
//! Text content is always escaped by the XML writer. Method names and
//! parameter keys become element names, so they are checked up front and a
//! bad one is rejected instead of producing broken markup.

use crate::params::Parameters;
use dealerdash_config::DmsConfig;
use dealerdash_core::{DashError, DashResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

/// Namespace of the DealerBuilt CDX service.
pub const SERVICE_NS: &str = "http://tempuri.org/";
/// SOAP 1.1 envelope namespace.
pub const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";
const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";

/// Value of the `SOAPAction` header for a method, quotes included.
#[must_use]
pub fn soap_action(method: &str) -> String {
    format!("\"{}{}\"", SERVICE_NS, method)
}

/// Builds the request envelope for `method`.
///
/// Identity fields from `config` come first in the method element, followed
/// by every non-null parameter in insertion order.
pub fn build(method: &str, parameters: &Parameters, config: &DmsConfig) -> DashResult<String> {
    ensure_element_name("method", method)?;
    for (key, _) in parameters.iter() {
        ensure_element_name("parameter", key)?;
    }

    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;

    let mut envelope = BytesStart::new("soap:Envelope");
    envelope.push_attribute(("xmlns:xsi", XSI_NS));
    envelope.push_attribute(("xmlns:xsd", XSD_NS));
    envelope.push_attribute(("xmlns:soap", SOAP_ENV_NS));
    emit(&mut writer, Event::Start(envelope))?;

    emit(&mut writer, Event::Start(BytesStart::new("soap:Header")))?;
    let mut auth = BytesStart::new("AuthenticationSoapHeader");
    auth.push_attribute(("xmlns", SERVICE_NS));
    emit(&mut writer, Event::Start(auth))?;
    text_element(&mut writer, "UserName", &config.username)?;
    text_element(&mut writer, "Password", &config.password)?;
    emit(&mut writer, Event::End(BytesEnd::new("AuthenticationSoapHeader")))?;
    emit(&mut writer, Event::End(BytesEnd::new("soap:Header")))?;

    emit(&mut writer, Event::Start(BytesStart::new("soap:Body")))?;
    let mut call = BytesStart::new(method);
    call.push_attribute(("xmlns", SERVICE_NS));
    emit(&mut writer, Event::Start(call))?;
    text_element(&mut writer, "SourceID", &config.source_id)?;
    text_element(&mut writer, "CompanyID", &config.company_id)?;
    text_element(&mut writer, "StoreID", &config.store_id)?;
    text_element(&mut writer, "ServiceLocationID", &config.service_location_id)?;
    for (key, value) in parameters.iter() {
        if let Some(text) = value.wire_text() {
            text_element(&mut writer, key, &text)?;
        }
    }
    emit(&mut writer, Event::End(BytesEnd::new(method)))?;
    emit(&mut writer, Event::End(BytesEnd::new("soap:Body")))?;
    emit(&mut writer, Event::End(BytesEnd::new("soap:Envelope")))?;

    String::from_utf8(writer.into_inner().into_inner())
        .map_err(|e| DashError::internal(format!("Envelope is not UTF-8: {}", e)))
}

fn text_element<W: std::io::Write>(
    writer: &mut Writer<W>,
    name: &str,
    value: &str,
) -> DashResult<()> {
    emit(writer, Event::Start(BytesStart::new(name)))?;
    emit(writer, Event::Text(BytesText::new(value)))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: std::io::Write>(writer: &mut Writer<W>, event: Event<'_>) -> DashResult<()> {
    writer
        .write_event(event)
        .map_err(|e| DashError::internal(format!("Failed to write envelope: {}", e)))
}

/// Unprefixed XML element name: a letter or `_`, then letters, digits,
/// `_`, `-` or `.`.
fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn ensure_element_name(kind: &str, name: &str) -> DashResult<()> {
    if is_element_name(name) {
        Ok(())
    } else {
        Err(DashError::validation(format!(
            "Invalid {} name '{}': not a valid XML element name",
            kind, name
        )))
    }
}
