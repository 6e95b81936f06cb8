use super::ID;
use super::config::PayboxTenantConfiguration;
use super::signature::{SignatureError, compute_hmac, verify_signature};
use crate::domain::money::Amount;
use crate::domain::operation::{GatewayResponse, OperationResult, PaymentOperation};
use crate::domain::payment::{CallbackParams, PaymentData, acknowledgement_url};
use crate::domain::ports::PaymentGateway;
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Parameters Paybox echoes back on return and IPN URLs, with the Paybox
/// variable letter each one maps to. The order is the order Paybox signs
/// them in.
const RETURN_PARAMS: [(&str, &str); 4] = [
    ("status", "E"),
    ("authorization", "A"),
    ("transactionId", "S"),
    ("requestId", "T"),
];

const SIGNATURE_PARAM: &str = "signature";
const STATUS_SUCCESSFUL: &str = "00000";

/// Paybox System hosted payment page.
///
/// `purchase` never talks to Paybox: it returns a signed form that the
/// shopper's browser posts to the payment page. The outcome arrives later
/// as an IPN call signed by Paybox, handled by `acknowledge_order`.
pub struct PayboxPaymentGateway {
    configuration: PayboxTenantConfiguration,
    public_key_file: PathBuf,
    clock: fn() -> DateTime<Utc>,
}

impl PayboxPaymentGateway {
    pub fn new(configuration: PayboxTenantConfiguration, public_key_file: PathBuf) -> Self {
        Self {
            configuration,
            public_key_file,
            clock: Utc::now,
        }
    }

    /// Replaces the clock used for `PBX_TIME`.
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    fn return_variables() -> String {
        let mut variables: Vec<String> = RETURN_PARAMS
            .iter()
            .map(|(name, code)| format!("{name}:{code}"))
            .collect();
        variables.push(format!("{SIGNATURE_PARAM}:K"));
        variables.join(";")
    }

    fn is_authentic(&self, message: &str, signature: &str) -> bool {
        let pem = match std::fs::read_to_string(&self.public_key_file) {
            Ok(pem) => pem,
            Err(e) => {
                warn!(
                    path = %self.public_key_file.display(),
                    error = %e,
                    "Failed to read paybox public key"
                );
                return false;
            }
        };

        match verify_signature(&pem, message, signature) {
            Ok(()) => true,
            Err(SignatureError::Mismatch) => false,
            Err(e) => {
                warn!(error = %e, "Exception while verifying paybox signature");
                false
            }
        }
    }
}

fn signed_message(fields: &[(String, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

#[async_trait]
impl PaymentGateway for PayboxPaymentGateway {
    fn id(&self) -> &'static str {
        ID
    }

    async fn purchase(&self, amount: Amount, data: &PaymentData) -> Result<GatewayResponse> {
        let currency = data.require_currency()?;
        let order_id = data.require_order_id()?;
        let customer = data.require_customer()?;

        let return_url = data
            .return_url
            .as_ref()
            .or(self.configuration.return_url.as_ref())
            .ok_or(GatewayError::MissingPaymentData("return_url"))?;
        let cancel_url = data
            .cancel_url
            .as_ref()
            .or(self.configuration.cancel_url.as_ref())
            .ok_or(GatewayError::MissingPaymentData("cancel_url"))?;
        let ipn_url = match &data.ipn_url {
            Some(url) => url.clone(),
            None => acknowledgement_url(data.require_base_url()?, order_id, ID),
        };

        let time = (self.clock)().to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut fields: Vec<(String, String)> = [
            ("PBX_SITE", self.configuration.site.clone()),
            ("PBX_RANG", self.configuration.rang.clone()),
            ("PBX_IDENTIFIANT", self.configuration.id.clone()),
            ("PBX_TOTAL", amount.to_minor_units(currency)?.to_string()),
            ("PBX_DEVISE", currency.numeric_code().to_string()),
            ("PBX_CMD", order_id.to_string()),
            ("PBX_PORTEUR", customer.email.clone()),
            ("PBX_HASH", "SHA512".to_string()),
            ("PBX_TIME", time),
            ("PBX_RETOUR", Self::return_variables()),
            ("PBX_EFFECTUE", return_url.clone()),
            ("PBX_ANNULE", cancel_url.clone()),
            ("PBX_REPONDRE_A", ipn_url),
        ]
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect();

        let message = signed_message(&fields);
        debug!(params = %message, "Paybox form parameters");

        let hmac = compute_hmac(&self.configuration.secret, &message)?;
        fields.push(("PBX_HMAC".to_string(), hmac));

        let operation = PaymentOperation::new(ID, OperationResult::Initialized);
        Ok(GatewayResponse::new(true, operation).with_form(self.configuration.form_url(), fields))
    }

    async fn acknowledge(&self, _data: &CallbackParams) -> Result<GatewayResponse> {
        Err(GatewayError::Unsupported {
            gateway: ID,
            operation: "acknowledge without order id",
        })
    }

    async fn acknowledge_order(
        &self,
        order_id: Uuid,
        data: &CallbackParams,
    ) -> Result<GatewayResponse> {
        info!(%order_id, "Acknowledge paybox payment");

        let message = RETURN_PARAMS
            .iter()
            .map(|(name, _)| data.require(name).map(|value| format!("{name}={value}")))
            .collect::<Result<Vec<_>>>()?
            .join("&");
        let signature = data.require(SIGNATURE_PARAM)?;

        if !self.is_authentic(&message, signature) {
            error!(%order_id, "Paybox signature not verified");
            return Err(GatewayError::InvalidSignature(ID));
        }
        info!(%order_id, "Paybox signature verified");

        let status = data.require("status")?;
        let operation = PaymentOperation::new(ID, OperationResult::Captured)
            .with_external_id(data.require("transactionId")?)
            .with_memo("requestId", data.require("requestId")?)
            .with_memo("authorization", data.require("authorization")?)
            .with_memo("status", status);

        if status == STATUS_SUCCESSFUL {
            Ok(GatewayResponse::new(true, operation))
        } else {
            let operation = PaymentOperation {
                result: OperationResult::Failed,
                ..operation
            };
            Ok(GatewayResponse::new(false, operation))
        }
    }
}
