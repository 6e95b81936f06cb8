use super::ID;
use super::config::StripeTenantConfiguration;
use crate::domain::money::Amount;
use crate::domain::operation::{GatewayResponse, OperationResult, PaymentOperation};
use crate::domain::payment::{Card, PaymentData};
use crate::domain::ports::PaymentGateway;
use crate::error::{GatewayError, Result};
use crate::infrastructure::http::truncate_body;
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

const TOKENS_PATH: &str = "/v1/tokens";
const CHARGES_PATH: &str = "/v1/charges";
const CONNECTION_ERROR_TYPE: &str = "api_connection_error";

#[derive(Debug, Deserialize)]
struct StripeToken {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeCharge {
    id: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorEnvelope {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Result of one Stripe call: either the decoded object or a declined
/// operation to hand back to the shop as is.
enum Outcome<T> {
    Completed(T),
    Declined(PaymentOperation),
}

fn declined(kind: &str, code: Option<&str>, message: &str) -> PaymentOperation {
    let operation = PaymentOperation::new(ID, OperationResult::Failed)
        .with_memo("errorType", kind)
        .with_memo("errorMessage", message);
    match code {
        Some(code) => operation.with_memo("errorCode", code),
        None => operation,
    }
}

/// Stripe Charges API, with server-side card tokenization.
pub struct StripePaymentGateway {
    configuration: StripeTenantConfiguration,
    client: reqwest::Client,
}

impl StripePaymentGateway {
    pub fn new(configuration: StripeTenantConfiguration, client: reqwest::Client) -> Self {
        Self {
            configuration,
            client,
        }
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<Outcome<T>> {
        let sent = self
            .client
            .post(self.configuration.endpoint(path))
            .bearer_auth(&self.configuration.api_key)
            .form(form)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) if e.is_connect() || e.is_timeout() => {
                warn!(path, error = %e, "Could not reach Stripe");
                return Ok(Outcome::Declined(declined(
                    CONNECTION_ERROR_TYPE,
                    None,
                    &e.to_string(),
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let status = response.status();
        if status.is_success() {
            return Ok(Outcome::Completed(response.json::<T>().await?));
        }

        let body = response.text().await?;
        match serde_json::from_str::<StripeErrorEnvelope>(&body) {
            Ok(StripeErrorEnvelope { error })
                if error.kind != "api_error" && !status.is_server_error() =>
            {
                let message = error.message.unwrap_or_default();
                warn!(
                    path,
                    status = status.as_u16(),
                    error_type = %error.kind,
                    error_code = error.code.as_deref().unwrap_or_default(),
                    message = %message,
                    "Stripe refused the request"
                );
                Ok(Outcome::Declined(declined(
                    &error.kind,
                    error.code.as_deref(),
                    &message,
                )))
            }
            _ => Err(GatewayError::VendorError {
                gateway: ID,
                status: status.as_u16(),
                body: truncate_body(body),
            }),
        }
    }

    async fn create_token(&self, card: &Card) -> Result<Outcome<StripeToken>> {
        let form = [
            ("card[number]", card.number.clone()),
            ("card[exp_month]", card.exp_month.to_string()),
            ("card[exp_year]", card.exp_year.to_string()),
            ("card[cvc]", card.cvc.clone()),
        ];
        self.post_form(TOKENS_PATH, &form).await
    }
}

#[async_trait]
impl PaymentGateway for StripePaymentGateway {
    fn id(&self) -> &'static str {
        ID
    }

    async fn purchase(&self, amount: Amount, data: &PaymentData) -> Result<GatewayResponse> {
        let currency = data.require_currency()?;

        let source = match (&data.card_token, &data.card) {
            (Some(token), _) => token.clone(),
            (None, Some(card)) => match self.create_token(card).await? {
                Outcome::Completed(token) => token.id,
                Outcome::Declined(operation) => return Ok(GatewayResponse::new(false, operation)),
            },
            (None, None) => return Err(GatewayError::MissingPaymentData("card")),
        };

        let description = data.description.clone().or_else(|| {
            data.customer
                .as_ref()
                .map(|customer| format!("Charge for {}", customer.email))
        });

        let mut form = vec![
            ("amount", amount.to_minor_units(currency)?.to_string()),
            ("currency", currency.code().to_lowercase()),
            ("source", source),
        ];
        if let Some(description) = description {
            form.push(("description", description));
        }

        match self.post_form::<StripeCharge>(CHARGES_PATH, &form).await? {
            Outcome::Completed(charge) => {
                info!(charge = %charge.id, %amount, %currency, "Stripe charge created");
                let operation = PaymentOperation::new(ID, OperationResult::Captured)
                    .with_external_id(charge.id);
                let operation = match charge.status {
                    Some(status) => operation.with_memo("status", status),
                    None => operation,
                };
                Ok(GatewayResponse::new(true, operation))
            }
            Outcome::Declined(operation) => Ok(GatewayResponse::new(false, operation)),
        }
    }
}
