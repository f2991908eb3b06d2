//! Quote request submission.
//!
//! The cart's product ids and quantities are sent with the customer's
//! contact details. Prices are never sent; the server snapshots them.

use saho_client::{ApiClient, ApiRequest};
use saho_core::ProductId;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::cart::CartStore;
use crate::error::SubmissionError;
use crate::form::{contact_email, optional, required};
use crate::notice::Notice;

/// Contact fields of the quote form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteContact {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct QuotePayload<'a> {
    full_name: &'a str,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    items: Vec<QuoteLine<'a>>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct QuoteLine<'a> {
    product_id: &'a ProductId,
    quantity: u32,
}

fn build_payload<'a>(
    cart: &'a CartStore,
    contact: &'a QuoteContact,
) -> Result<QuotePayload<'a>, SubmissionError> {
    if cart.is_empty() {
        return Err(SubmissionError::EmptyCart);
    }
    let full_name = required("fullName", &contact.full_name)?;
    let email = contact_email(&contact.email)?;

    Ok(QuotePayload {
        full_name,
        email: email.into(),
        phone: optional(contact.phone.as_ref()),
        country: optional(contact.country.as_ref()),
        city: optional(contact.city.as_ref()),
        address: optional(contact.address.as_ref()),
        message: optional(contact.message.as_ref()),
        items: cart
            .items()
            .iter()
            .map(|line| QuoteLine {
                product_id: &line.product_id,
                quantity: line.quantity.get(),
            })
            .collect(),
    })
}

/// Send the cart as a quote request.
///
/// Nothing is sent when the cart is empty or the contact details are
/// invalid. The cart is cleared only after the server accepts the request.
///
/// # Errors
///
/// Returns `SubmissionError` for local validation failures or an API error;
/// the cart is left untouched in both cases.
#[instrument(skip_all, fields(items = cart.len()))]
pub async fn submit_quote(
    api: &ApiClient,
    cart: &mut CartStore,
    contact: &QuoteContact,
) -> Result<(), SubmissionError> {
    let request = {
        let payload = build_payload(cart, contact)?;
        ApiRequest::post("/quote-requests").json(&payload)?
    };

    api.send(&request).await?;
    info!("quote request accepted");

    if let Err(e) = cart.clear() {
        warn!(error = %e, "quote sent but the emptied cart could not be saved");
    }
    Ok(())
}

/// Confirmation shown after a quote request is accepted.
#[must_use]
pub fn success_notice() -> Notice {
    Notice::success(
        "Votre demande de devis a été envoyée avec succès!",
        "Nous vous contacterons sous 24-48h",
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn contact() -> QuoteContact {
        QuoteContact {
            full_name: " Awa Diop ".to_string(),
            email: "Awa@Saho.SN".to_string(),
            phone: Some("+221 77 000 00 00".to_string()),
            city: Some(String::new()),
            ..QuoteContact::default()
        }
    }

    #[test]
    fn test_payload_shape() {
        let mut cart = CartStore::in_memory();
        cart.add_item(ProductId::new("42"), Some("Noyer".to_string())).unwrap();
        cart.add_item(ProductId::new("42"), None).unwrap();
        cart.add_item(ProductId::new("7"), None).unwrap();

        let contact = contact();
        let payload = serde_json::to_value(build_payload(&cart, &contact).unwrap()).unwrap();
        assert_eq!(
            payload,
            serde_json::json!({
                "fullName": "Awa Diop",
                "email": "Awa@saho.sn",
                "phone": "+221 77 000 00 00",
                "items": [
                    {"productId": "42", "quantity": 2},
                    {"productId": "7", "quantity": 1}
                ]
            })
        );
    }

    #[test]
    fn test_empty_cart_is_refused() {
        let cart = CartStore::in_memory();
        assert!(matches!(
            build_payload(&cart, &contact()),
            Err(SubmissionError::EmptyCart)
        ));
    }

    #[test]
    fn test_invalid_contact_is_refused() {
        let mut cart = CartStore::in_memory();
        cart.add_item(ProductId::new("1"), None).unwrap();

        let mut bad = contact();
        bad.full_name = "  ".to_string();
        assert!(matches!(
            build_payload(&cart, &bad),
            Err(SubmissionError::MissingField("fullName"))
        ));

        let mut bad = contact();
        bad.email = "awa.saho.sn".to_string();
        assert!(matches!(
            build_payload(&cart, &bad),
            Err(SubmissionError::InvalidEmail(_))
        ));
    }
}
