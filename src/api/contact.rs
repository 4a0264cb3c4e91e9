use crate::config::Config;
use crate::delivery::Mailer;
use crate::error::WorkflowError;
use crate::utils::validation::is_institution_email;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema)]
pub struct ContactReq {
    #[schema(example = "A")]
    pub name: String,
    #[schema(example = "a@srec.ac.in")]
    pub email: String,
    #[schema(example = "The letter download shows the wrong dates.")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ContactResponse {
    pub success: bool,
    #[schema(example = "Thank you! Your message has been sent successfully.")]
    pub message: String,
}

impl ContactReq {
    fn validate(&self, domain: &str) -> Result<(), WorkflowError> {
        if !is_institution_email(self.email.trim(), domain) {
            return Err(WorkflowError::Validation(format!(
                "Email must end with {domain}"
            )));
        }
        if self.name.trim().is_empty() || self.message.trim().is_empty() {
            return Err(WorkflowError::Validation("All fields are required.".into()));
        }
        Ok(())
    }

    fn subject(&self) -> String {
        format!("New Query from {} ({})", self.name.trim(), self.email.trim())
    }

    fn body(&self) -> String {
        format!(
            "New Message from SREC Leave System:\n\nName: {}\nEmail: {}\n\nMessage:\n{}",
            self.name.trim(),
            self.email.trim(),
            self.message.trim()
        )
    }
}

/// Contact form: forwards a query to the administrator by mail
#[utoipa::path(
    post,
    path = "/contact",
    request_body(
        content = ContactReq,
        description = "Contact form payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Delivery outcome; success is false when the mail could not be sent", body = ContactResponse),
        (status = 400, description = "Missing fields or email outside the institution domain"),
        (status = 429, description = "Too many requests")
    ),
    tag = "Contact"
)]
pub async fn send_message(
    payload: web::Json<ContactReq>,
    config: web::Data<Config>,
    mailer: web::Data<dyn Mailer>,
) -> Result<HttpResponse, WorkflowError> {
    let contact = payload.into_inner();
    contact.validate(&config.institution_email_domain)?;

    let response = match mailer
        .send_mail(&config.admin_email, &contact.subject(), &contact.body())
        .await
    {
        Ok(()) => {
            info!(from = %contact.email.trim(), "Contact message forwarded");
            ContactResponse {
                success: true,
                message: "Thank you! Your message has been sent successfully.".into(),
            }
        }
        Err(e) => {
            warn!(error = %e, from = %contact.email.trim(), "Contact message not delivered");
            ContactResponse {
                success: false,
                message: format!("Failed to send message. Error: {e}"),
            }
        }
    };

    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn req(name: &str, email: &str, message: &str) -> ContactReq {
        ContactReq {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn contact_requires_an_institution_email_and_every_field() {
        let domain = "@srec.ac.in";

        assert!(req("A", "a@srec.ac.in", "hello").validate(domain).is_ok());

        let err = req("A", "a@gmail.com", "hello").validate(domain).unwrap_err();
        assert_eq!(err.to_string(), "Email must end with @srec.ac.in");

        for bad in [req(" ", "a@srec.ac.in", "hello"), req("A", "a@srec.ac.in", "\n")] {
            let err = bad.validate(domain).unwrap_err();
            assert_eq!(err.to_string(), "All fields are required.");
        }
    }

    #[test]
    fn mail_names_the_sender_in_subject_and_body() {
        let contact = req("A", "a@srec.ac.in", "wrong dates on my letter");

        assert_eq!(contact.subject(), "New Query from A (a@srec.ac.in)");
        let body = contact.body();
        assert!(body.starts_with("New Message from SREC Leave System:"));
        assert!(body.contains("Name: A\nEmail: a@srec.ac.in"));
        assert!(body.ends_with("Message:\nwrong dates on my letter"));
    }
}
