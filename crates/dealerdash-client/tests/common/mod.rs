//! Shared fixtures for DMS client integration tests.

use dealerdash_config::DmsConfig;
use wiremock::MockServer;

pub const ENDPOINT_PATH: &str = "/CDXWebService.asmx";

pub const DIVISIONS_REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <GetDivisionsResponse xmlns="http://tempuri.org/">
      <GetDivisionsResult>
        <Division>
          <DivisionID>7</DivisionID>
          <Name>Honda of Springfield</Name>
        </Division>
      </GetDivisionsResult>
    </GetDivisionsResponse>
  </soap:Body>
</soap:Envelope>"#;

pub const FAULT_REPLY: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Client</faultcode>
      <faultstring>Authentication failed for user demo_user</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

/// Development settings pointed at a mock SOAP server.
pub fn config_for(server: &MockServer) -> DmsConfig {
    DmsConfig {
        base_url: format!("{}{}", server.uri(), ENDPOINT_PATH),
        ..DmsConfig::default()
    }
}
