//! Loosely-typed ad submission input.

use std::borrow::Cow;

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::{Validate, ValidationError};

use crate::domain::entities::SubmitAdRequest;
use crate::error::AppError;
use crate::utils::image_url::normalize_image_url;
use crate::utils::money::parse_price;
use crate::utils::whatsapp::normalize_number;

const MISSING_PARAMS: &str = "Missing required params";

/// Raw submission fields, as sent by query string or form.
///
/// Every field is optional at this stage; [`AdInput::into_request`] decides
/// what is required. Empty strings deserialize as `None`.
#[serde_as]
#[derive(Debug, Default, Clone, Deserialize, Validate)]
pub struct AdInput {
    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(
        required(message = "Missing required params"),
        length(max = 200, message = "Title is too long")
    )]
    pub title: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(required(message = "Missing required params"), custom(function = "validate_price"))]
    pub price: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(
        required(message = "Missing required params"),
        custom(function = "validate_whatsapp")
    )]
    pub whatsapp: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[validate(length(max = 5000, message = "Description is too long"))]
    pub desc: Option<String>,

    /// Explicit date-time, `"{N}h"`, or absent for the default.
    #[serde_as(as = "NoneAsEmptyString")]
    pub expires: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    pub image_url: Option<String>,
}

impl AdInput {
    /// Trims every field and turns blank ones into `None`.
    pub fn normalized(self) -> Self {
        fn clean(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            title: clean(self.title),
            price: clean(self.price),
            whatsapp: clean(self.whatsapp),
            desc: clean(self.desc),
            expires: clean(self.expires),
            image_url: clean(self.image_url),
        }
    }

    /// Validates the input and builds a [`SubmitAdRequest`].
    ///
    /// An unusable `image_url` is dropped rather than rejected, so the ad
    /// falls back to the placeholder image.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when title, price or WhatsApp number
    /// is missing or malformed.
    pub fn into_request(self) -> Result<SubmitAdRequest, AppError> {
        let input = self.normalized();
        input.validate()?;

        let (Some(title), Some(price), Some(whatsapp)) = (input.title, input.price, input.whatsapp)
        else {
            return Err(AppError::bad_request(MISSING_PARAMS, serde_json::Value::Null));
        };

        let price = parse_price(&price).map_err(|e| {
            AppError::bad_request(e.to_string(), serde_json::json!({ "fields": ["price"] }))
        })?;

        let image_url = input.image_url.and_then(|raw| match normalize_image_url(&raw) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(image_url = %raw, error = %e, "Ignoring image URL");
                None
            }
        });

        Ok(SubmitAdRequest {
            title,
            price,
            whatsapp: normalize_number(&whatsapp),
            description: input.desc.unwrap_or_default(),
            expires: input.expires,
            image_url,
        })
    }
}

fn validate_price(value: &str) -> Result<(), ValidationError> {
    parse_price(value)
        .map(|_| ())
        .map_err(|e| ValidationError::new("price").with_message(Cow::Owned(e.to_string())))
}

fn validate_whatsapp(value: &str) -> Result<(), ValidationError> {
    let digits = normalize_number(value).len();
    if (8..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::new("whatsapp")
            .with_message(Cow::Borrowed("WhatsApp number must have 8 to 15 digits")))
    }
}
