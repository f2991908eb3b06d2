//! Custom product request submission.
//!
//! Sent as multipart: the form fields as JSON in a `data` part and an
//! optional reference picture in an `image` part.

use saho_client::{ApiClient, ApiRequest, Attachment};
use serde::Serialize;
use tracing::{info, instrument};

use crate::error::SubmissionError;
use crate::form::{contact_email, optional, required};
use crate::notice::Notice;

/// Fields of the "request a product" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRequestForm {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    /// What the customer is looking for.
    pub description: String,
    pub quantity: Option<u32>,
    pub desired_deadline: Option<String>,
    pub budget: Option<String>,
    pub reference_url: Option<String>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
struct ProductRequestPayload<'a> {
    full_name: &'a str,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<&'a str>,
    description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    desired_deadline: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    budget: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference_url: Option<&'a str>,
}

impl ProductRequestForm {
    fn payload(&self) -> Result<ProductRequestPayload<'_>, SubmissionError> {
        Ok(ProductRequestPayload {
            full_name: required("fullName", &self.full_name)?,
            email: contact_email(&self.email)?.into(),
            phone: optional(self.phone.as_ref()),
            company: optional(self.company.as_ref()),
            country: optional(self.country.as_ref()),
            city: optional(self.city.as_ref()),
            description: required("description", &self.description)?,
            quantity: self.quantity.filter(|q| *q > 0),
            desired_deadline: optional(self.desired_deadline.as_ref()),
            budget: optional(self.budget.as_ref()),
            reference_url: optional(self.reference_url.as_ref()),
        })
    }
}

/// Build the multipart request for a product request.
///
/// # Errors
///
/// Returns `SubmissionError` if a required field is missing or the email
/// is invalid.
pub fn build_request(
    form: &ProductRequestForm,
    image: Option<Attachment>,
) -> Result<ApiRequest, SubmissionError> {
    let payload = form.payload()?;
    Ok(ApiRequest::post("/product-requests")
        .multipart(&payload)?
        .file_opt("image", image))
}

/// Submit a product request.
///
/// # Errors
///
/// Returns `SubmissionError` for local validation failures (nothing is sent)
/// or for an API error.
#[instrument(skip_all, fields(has_image = image.is_some()))]
pub async fn submit_product_request(
    api: &ApiClient,
    form: &ProductRequestForm,
    image: Option<Attachment>,
) -> Result<(), SubmissionError> {
    let request = build_request(form, image)?;
    api.send(&request).await?;
    info!("product request accepted");
    Ok(())
}

/// Confirmation shown after a product request is accepted.
#[must_use]
pub fn success_notice() -> Notice {
    Notice::success(
        "Votre demande a été envoyée avec succès!",
        "Nous reviendrons vers vous rapidement",
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use saho_client::RequestBody;

    use super::*;

    fn form() -> ProductRequestForm {
        ProductRequestForm {
            full_name: "Moussa Ba".to_string(),
            email: "moussa@hotel-teranga.sn".to_string(),
            company: Some("Hôtel Teranga".to_string()),
            description: "Tables de terrasse en teck, 80 cm".to_string(),
            quantity: Some(12),
            budget: Some("  ".to_string()),
            ..ProductRequestForm::default()
        }
    }

    #[test]
    fn test_request_is_multipart_with_image() {
        let image = Attachment::new("ref.jpg", "image/jpeg", vec![0xff, 0xd8]);
        let request = build_request(&form(), Some(image)).unwrap();
        assert_eq!(request.path(), "/product-requests");

        let RequestBody::Multipart { data, files } = request.body() else {
            panic!("expected multipart body");
        };
        let data: serde_json::Value = serde_json::from_str(data).unwrap();
        assert_eq!(
            data,
            serde_json::json!({
                "fullName": "Moussa Ba",
                "email": "moussa@hotel-teranga.sn",
                "company": "Hôtel Teranga",
                "description": "Tables de terrasse en teck, 80 cm",
                "quantity": 12
            })
        );
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].0, "image");
    }

    #[test]
    fn test_request_without_image_is_still_multipart() {
        let request = build_request(&form(), None).unwrap();
        assert!(matches!(
            request.body(),
            RequestBody::Multipart { files, .. } if files.is_empty()
        ));
    }

    #[test]
    fn test_description_is_required() {
        let mut form = form();
        form.description = String::new();
        assert!(matches!(
            build_request(&form, None),
            Err(SubmissionError::MissingField("description"))
        ));
    }
}
