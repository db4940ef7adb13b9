use crate::config::FormConfig;
use crate::encode;
use crate::page::{Field, Page};

pub(crate) const HANDOFF_STATUS: &str = "Opening your email client...";

/// Plain-text body lines: labeled values in page order, skipping empty
/// values and internal-only fields (honeypot, data URL). The drawn
/// signature is only noted as present or absent.
pub(crate) fn body_lines(page: &Page, config: &FormConfig, drawn: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut push_value = |label: &str, value: &str| {
        if !value.is_empty() {
            lines.push(format!("{label}: {value}"));
        }
    };

    push_value(Field::FullName.label(), &page.full_name.value);
    push_value(Field::Email.label(), &page.email.value);
    if config.phone_field {
        push_value(Field::Phone.label(), &page.phone.value);
    }
    push_value(Field::ItemDescription.label(), &page.item_description.value);
    push_value(Field::Quantity.label(), &page.quantity.value);
    push_value(Field::Instructions.label(), &page.instructions.value);
    push_value("Preferred Colors", &page.selected_colors().join(", "));
    if let Some(filename) = &page.upload.filename {
        push_value("Uploaded File", filename);
    }
    push_value(Field::TypedSignature.label(), &page.typed_signature.value);
    if config.signature_pad {
        let noted = if drawn { "provided" } else { "not provided" };
        push_value("Drawn Signature", noted);
    }
    push_value("Agreement Timestamp", &page.agreement_timestamp);
    push_value("Agreement Timestamp (ISO)", &page.agreement_timestamp_iso);
    lines
}

/// Assemble the full `mailto:` URI with URL-encoded subject and body.
pub(crate) fn compose(page: &Page, config: &FormConfig, drawn: bool) -> String {
    let separator = if config.crlf_body { "\r\n" } else { "\n" };
    let body = body_lines(page, config, drawn).join(separator);
    format!(
        "mailto:{}?subject={}&body={}",
        config.mailto_recipient,
        encode::uri_component(&config.mail_subject),
        encode::uri_component(&body)
    )
}
