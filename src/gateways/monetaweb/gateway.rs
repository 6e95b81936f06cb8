use super::ID;
use super::config::MonetaWebTenantConfiguration;
use crate::domain::money::Amount;
use crate::domain::operation::{GatewayResponse, OperationResult, PaymentOperation};
use crate::domain::payment::{CallbackParams, PaymentData, acknowledgement_url};
use crate::domain::ports::PaymentGateway;
use crate::error::{GatewayError, Result};
use crate::infrastructure::http::truncate_body;
use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, info, warn};

const ERROR_MARKER: &str = "!ERROR!";
const APPROVED: &str = "Approved";
const CANCELLED_PATH: &str = "/checkout/cancelled";

/// MonetaWeb (Setefi) hosted payment: `purchase` registers the payment
/// with MonetaWeb and redirects the shopper to its payment page.
pub struct MonetaWebPaymentGateway {
    configuration: MonetaWebTenantConfiguration,
    client: reqwest::Client,
}

impl MonetaWebPaymentGateway {
    pub fn new(configuration: MonetaWebTenantConfiguration, client: reqwest::Client) -> Self {
        Self {
            configuration,
            client,
        }
    }
}

/// `<paymentId>:<scheme>:<rest>` becomes `<scheme>:<rest>?PaymentID=<paymentId>`.
fn redirect_url(body: &str) -> Option<String> {
    let mut parts = body.trim().splitn(3, ':');
    let payment_id = parts.next().filter(|id| !id.is_empty())?;
    let scheme = parts.next()?;
    let rest = parts.next()?;
    Some(format!("{scheme}:{rest}?PaymentID={payment_id}"))
}

#[async_trait]
impl PaymentGateway for MonetaWebPaymentGateway {
    fn id(&self) -> &'static str {
        ID
    }

    async fn purchase(&self, amount: Amount, data: &PaymentData) -> Result<GatewayResponse> {
        let base_uri = data.require_base_url()?;
        let order_id = data.require_order_id()?;
        let currency = data.require_currency()?;

        let response_url = acknowledgement_url(base_uri, order_id, ID);
        let form = [
            ("id", self.configuration.id.clone()),
            ("password", self.configuration.password.clone()),
            ("action", self.configuration.action.clone()),
            ("amt", amount.to_fixed_2()?),
            ("currencycode", currency.numeric_code().to_string()),
            ("langid", self.configuration.language_id.clone()),
            ("responseurl", response_url.clone()),
            ("errorurl", response_url),
            ("trackid", order_id.to_string()),
            ("udf1", String::new()),
            ("baseurl", base_uri.to_string()),
        ];

        let endpoint = self.configuration.payment_endpoint();
        debug!(
            endpoint,
            id = %self.configuration.id,
            action = %self.configuration.action,
            amt = %form[3].1,
            currencycode = %form[4].1,
            trackid = %order_id,
            "Initializing MonetaWeb payment"
        );

        let response = self.client.post(endpoint).form(&form).send().await?;

        let operation =
            PaymentOperation::new(ID, OperationResult::Initialized).with_memo("baseURI", base_uri);

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), %order_id, "MonetaWeb refused payment initialization");
            let operation = PaymentOperation {
                result: OperationResult::Failed,
                ..operation
            };
            return Ok(GatewayResponse::new(false, operation));
        }

        let body = response.text().await?;
        debug!(response = %body, "MonetaWeb response");

        if body.contains(ERROR_MARKER) {
            return Err(GatewayError::VendorError {
                gateway: ID,
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        let redirect = redirect_url(&body).ok_or_else(|| GatewayError::UnexpectedResponse {
            gateway: ID,
            message: format!("malformed payment init response: {}", truncate_body(body.clone())),
        })?;

        Ok(GatewayResponse::new(true, operation).with_redirect_url(redirect))
    }

    async fn acknowledge(&self, data: &CallbackParams) -> Result<GatewayResponse> {
        let result = data.require("result")?;
        let payment_id = data.require("paymentid")?;
        info!(payment_id, result, "Acknowledge MonetaWeb payment");

        if result.eq_ignore_ascii_case(APPROVED) {
            let operation = PaymentOperation::new(ID, OperationResult::Captured)
                .with_external_id(payment_id);
            Ok(GatewayResponse::new(true, operation)
                .with_response_text(self.configuration.base_url.clone()))
        } else {
            let operation = PaymentOperation::new(ID, OperationResult::Failed);
            Ok(GatewayResponse::new(false, operation).with_response_text(format!(
                "{}{}",
                self.configuration.base_url.trim_end_matches('/'),
                CANCELLED_PATH
            )))
        }
    }
}
