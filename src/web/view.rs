//! View model for the public ad page.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::json;

use crate::domain::entities::Ad;
use crate::utils::image_url::absolute_image_url;
use crate::utils::money::{format_brl, format_decimal_br};
use crate::utils::text::{or_fallback, truncate_chars};
use crate::utils::whatsapp::{chat_link, inquiry_message};

pub const DESCRIPTION_FALLBACK: &str = "Sem descrição.";
pub const META_DESCRIPTION_FALLBACK: &str = "Oferta válida por tempo limitado.";
pub const META_DESCRIPTION_MAX_CHARS: usize = 180;

/// Everything the ad template displays, computed once per request.
#[derive(Debug, Clone, PartialEq)]
pub struct AdPage {
    pub slug: String,
    pub title: String,
    /// `R$ 1.234,50`
    pub price_display: String,
    pub description_display: String,
    pub meta_description: String,
    /// Absolute URL, placeholder when the ad has none.
    pub image_url: String,
    pub canonical_url: String,
    pub whatsapp_url: String,
    pub page_title: String,
    /// Serialized JSON-LD, safe to embed in a `<script>` element.
    pub json_ld: String,
}

impl AdPage {
    /// Builds the page for `ad`, served under `{base_url}{route_prefix}/{slug}`.
    pub fn build(ad: &Ad, base_url: &str, route_prefix: &str) -> Self {
        let base_url = base_url.trim_end_matches('/');
        let price_display = format_brl(ad.price);
        let canonical_url = format!("{}{}/{}", base_url, route_prefix, ad.slug);
        let image_url = absolute_image_url(ad.image_url.as_deref(), base_url);

        let description = ad.description.trim();
        let description_display = or_fallback(Some(description), DESCRIPTION_FALLBACK).to_string();
        let meta_description = if description.is_empty() {
            META_DESCRIPTION_FALLBACK.to_string()
        } else {
            truncate_chars(description, META_DESCRIPTION_MAX_CHARS).to_string()
        };

        let whatsapp_url = chat_link(&ad.whatsapp, &inquiry_message(&ad.title, &price_display));
        let page_title = format!("{} — {}", ad.title, price_display);

        let json_ld = product_json_ld(ad, &meta_description, &image_url, &canonical_url);

        Self {
            slug: ad.slug.clone(),
            title: ad.title.clone(),
            price_display,
            description_display,
            meta_description,
            image_url,
            canonical_url,
            whatsapp_url,
            page_title,
            json_ld,
        }
    }

    /// Price without currency symbol, as the page headline shows it.
    pub fn price_amount(&self) -> &str {
        self.price_display.trim_start_matches("R$ ")
    }
}

/// Schema.org `Product` with a single BRL `Offer`.
fn product_json_ld(ad: &Ad, description: &str, image_url: &str, canonical_url: &str) -> String {
    let value = json!({
        "@context": "https://schema.org",
        "@type": "Product",
        "name": ad.title,
        "description": description,
        "image": [image_url],
        "offers": {
            "@type": "Offer",
            "priceCurrency": "BRL",
            "price": price_number(ad.price),
            "availability": "https://schema.org/InStock",
            "url": canonical_url,
        },
    });

    escape_script_json(&value.to_string())
}

fn price_number(price: Decimal) -> serde_json::Value {
    price
        .round_dp(2)
        .to_f64()
        .map(serde_json::Value::from)
        .unwrap_or_else(|| serde_json::Value::String(format_decimal_br(price)))
}

/// Escapes characters that could close the surrounding `<script>` element.
///
/// The output is still valid JSON.
pub fn escape_script_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn ad() -> Ad {
        Ad {
            id: 1,
            slug: "bolo-de-chocolate-600123".to_string(),
            title: "Bolo de Chocolate".to_string(),
            description: String::new(),
            price: Decimal::new(3990, 2),
            whatsapp: "5511999999999".to_string(),
            image_url: None,
            published: true,
            expires_at: None,
            created_at: Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_build_defaults() {
        let page = AdPage::build(&ad(), "https://popx.app/", "");

        assert_eq!(page.price_display, "R$ 39,90");
        assert_eq!(page.price_amount(), "39,90");
        assert_eq!(page.description_display, DESCRIPTION_FALLBACK);
        assert_eq!(page.meta_description, META_DESCRIPTION_FALLBACK);
        assert_eq!(page.image_url, "https://popx.app/static/og-fallback.png");
        assert_eq!(page.canonical_url, "https://popx.app/bolo-de-chocolate-600123");
        assert_eq!(page.page_title, "Bolo de Chocolate — R$ 39,90");
    }

    #[test]
    fn test_whatsapp_link_embeds_title_and_price() {
        let page = AdPage::build(&ad(), "https://popx.app", "/a");

        assert_eq!(
            page.whatsapp_url,
            "https://wa.me/5511999999999?text=Ol%C3%A1!%20Vi%20seu%20an%C3%BAncio%20%22Bolo%20de%20Chocolate%22%20por%20R%24%2039%2C90.%20Ainda%20est%C3%A1%20dispon%C3%ADvel%3F"
        );
        assert_eq!(page.canonical_url, "https://popx.app/a/bolo-de-chocolate-600123");
    }

    #[test]
    fn test_meta_description_truncated() {
        let mut long = ad();
        long.description = "á".repeat(300);

        let page = AdPage::build(&long, "https://popx.app", "");

        assert_eq!(page.meta_description.chars().count(), META_DESCRIPTION_MAX_CHARS);
        assert_eq!(page.description_display.chars().count(), 300);
    }

    #[test]
    fn test_json_ld_offer() {
        let page = AdPage::build(&ad(), "https://popx.app", "");
        let value: serde_json::Value = serde_json::from_str(&page.json_ld).unwrap();

        assert_eq!(value["@type"], "Product");
        assert_eq!(value["offers"]["priceCurrency"], "BRL");
        assert_eq!(value["offers"]["price"], 39.9);
        assert_eq!(value["offers"]["url"], "https://popx.app/bolo-de-chocolate-600123");
    }

    #[test]
    fn test_json_ld_escapes_script_breakout() {
        let mut evil = ad();
        evil.title = "</script><script>alert(1)</script>".to_string();

        let page = AdPage::build(&evil, "https://popx.app", "");

        assert!(!page.json_ld.contains('<'));
        assert!(page.json_ld.contains("\\u003c/script\\u003e"));

        let value: serde_json::Value = serde_json::from_str(&page.json_ld).unwrap();
        assert_eq!(value["name"], "</script><script>alert(1)</script>");
    }
}
