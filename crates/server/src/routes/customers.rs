//! Customer route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    response::{Html, Redirect},
};
use serde::{Deserialize, Deserializer};
use tracing::instrument;

use crm_core::{Customer, NewCustomer};

use crate::error::{AppError, Result};
use crate::state::AppState;

const NEW_CUSTOMER_FORM: &str = concat!(
    r#"<form method="POST" action="/customers">"#,
    r#"<input name="name" placeholder="Name" />"#,
    r#"<input name="age" placeholder="Age" />"#,
    r#"<button type="submit">Create</button>"#,
    "</form>",
);

const FETCH_FAILED: &str = "An error occurred while fetching customers.";
const CREATE_FAILED: &str = "An error occurred while creating the customer";

/// Raw customer fields from a form or JSON body.
///
/// Fields are optional here; [`NewCustomer::parse`] decides what is missing.
/// `age` may arrive as a JSON number and is kept as its decimal text.
#[derive(Debug, Default, Deserialize)]
pub struct CustomerInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "text_or_number")]
    pub age: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|value| match value {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}

impl<S> FromRequest<S> for CustomerInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    /// Decode JSON bodies as JSON and everything else as a URL-encoded form.
    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));

        let decoded = if is_json {
            Json::<Self>::from_request(req, state)
                .await
                .map(|Json(input)| input)
                .map_err(|e| e.body_text())
        } else {
            Form::<Self>::from_request(req, state)
                .await
                .map(|Form(input)| input)
                .map_err(|e| e.body_text())
        };

        decoded.map_err(|reason| {
            tracing::warn!(%reason, "Unreadable customer body");
            AppError::UnreadableBody(reason)
        })
    }
}

/// Customers list page template.
#[derive(Template, WebTemplate)]
#[template(path = "customers/index.html")]
pub struct CustomersIndexTemplate {
    pub customers: Vec<Customer>,
}

/// Customers list page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<CustomersIndexTemplate> {
    let customers = state
        .store()
        .list()
        .await
        .map_err(AppError::store(FETCH_FAILED))?;

    tracing::debug!(count = customers.len(), "Fetched customers");

    Ok(CustomersIndexTemplate { customers })
}

/// New customer form.
pub async fn new_form() -> Html<&'static str> {
    Html(NEW_CUSTOMER_FORM)
}

/// Create a customer and redirect to the listing.
#[instrument(skip(state, input))]
pub async fn create(State(state): State<AppState>, input: CustomerInput) -> Result<Redirect> {
    tracing::debug!(?input, "Received customer data");

    let customer = NewCustomer::parse(input.name, input.age)?;
    let created = state
        .store()
        .create(customer)
        .await
        .map_err(AppError::store(CREATE_FAILED))?;

    tracing::info!(id = %created.id, name = %created.name, "New customer created");

    Ok(Redirect::to("/customers"))
}
