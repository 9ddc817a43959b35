//! Pretty printer and its per-user settings.

use adtkit_transport::{RawResponse, Transport};

use super::xml_bool;
use crate::client::core::AdtClient;
use crate::dispatcher::{RequestSpec, TEXT_PLAIN_UTF8};
use crate::error::{AdtError, Result};
use crate::types::PrettyPrintSettings;

/// Pretty printer endpoint.
pub const PRETTY_PRINTER_URI: &str = "/sap/bc/adt/abapsource/prettyprinter";

/// Settings endpoint.
pub const PRETTY_PRINTER_SETTINGS_URI: &str = "/sap/bc/adt/abapsource/prettyprinter/settings";

const SETTINGS_NAMESPACE: &str = "http://www.sap.com/adt/prettyprintersettings";

pub(crate) fn settings_body(settings: &PrettyPrintSettings) -> String {
    let mut attributes = Vec::with_capacity(6);
    let mut push = |name: &str, value: &str| {
        attributes.push(format!(r#"prettyprintersettings:{name}="{value}""#));
    };

    if let Some(condense) = settings.condense_method_calls {
        push("condenseMethodCalls", xml_bool(condense));
    }
    if let Some(auto_style) = settings.default_auto_style {
        push("defaultAutoStyle", auto_style.as_str());
    }
    if let Some(format_calls) = settings.format_method_calls {
        push("formatMethodCalls", xml_bool(format_calls));
    }
    push("indentation", xml_bool(settings.indentation));
    if let Some(keep) = settings.keep_identifier {
        push("keepIdentifier", xml_bool(keep));
    }
    push("style", settings.style.as_str());

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<prettyprintersettings:PrettyPrinterSettings xmlns:prettyprintersettings="{SETTINGS_NAMESPACE}" {}/>"#,
        attributes.join(" ")
    )
}

pub(crate) fn pretty_print_request(source: &str) -> RequestSpec {
    RequestSpec::post(PRETTY_PRINTER_URI)
        .body(source.to_owned())
        .content_type(TEXT_PLAIN_UTF8)
}

pub(crate) fn settings_request(settings: &PrettyPrintSettings) -> RequestSpec {
    RequestSpec::put(PRETTY_PRINTER_SETTINGS_URI).body(settings_body(settings))
}

impl<T: Transport> AdtClient<T> {
    /// Formats source with the server's pretty printer, using the settings
    /// stored for the current user.
    ///
    /// # Errors
    ///
    /// [`AdtError::PrettyPrintFailed`] for any status other than 200.
    pub async fn pretty_print(&mut self, source: &str) -> Result<String> {
        let RawResponse { status, body, .. } = self.send(pretty_print_request(source)).await?;
        if status != 200 {
            return Err(AdtError::PrettyPrintFailed { status, body });
        }
        Ok(body)
    }

    /// Stores pretty printer settings for the current user.
    ///
    /// # Errors
    ///
    /// [`AdtError::PrettyPrintFailed`] for any status other than 200.
    pub async fn set_pretty_print_settings(&mut self, settings: &PrettyPrintSettings) -> Result<()> {
        let RawResponse { status, body, .. } = self.send(settings_request(settings)).await?;
        if status != 200 {
            return Err(AdtError::PrettyPrintFailed { status, body });
        }
        Ok(())
    }
}
