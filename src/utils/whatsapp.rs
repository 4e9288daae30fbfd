//! WhatsApp click-to-chat links.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left untouched, identical to JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

const CHAT_BASE: &str = "https://wa.me";

/// Strips everything but ASCII digits from a phone number.
///
/// `+55 (11) 99999-9999` becomes `5511999999999`.
pub fn normalize_number(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Percent-encodes a URI component the way browsers do.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Buyer's opening message, pre-filled in the chat.
pub fn inquiry_message(title: &str, price_display: &str) -> String {
    format!("Olá! Vi seu anúncio \"{title}\" por {price_display}. Ainda está disponível?")
}

/// Builds `https://wa.me/{number}?text={message}`.
pub fn chat_link(number: &str, message: &str) -> String {
    format!(
        "{CHAT_BASE}/{}?text={}",
        normalize_number(number),
        encode_component(message)
    )
}
