use super::ID;
use super::config::{MangoPayGlobalConfiguration, MangoPayTenantConfiguration};
use crate::domain::gateway_data::{GatewayCustomerData, GatewayTenantData};
use crate::domain::money::Amount;
use crate::domain::operation::{GatewayResponse, OperationResult, PaymentOperation};
use crate::domain::payment::{Customer, PaymentData, Tenant};
use crate::domain::ports::{GatewayDataStoreRef, PaymentGateway};
use crate::error::{GatewayError, Result};
use crate::infrastructure::http::error_body;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

const API_VERSION: &str = "v2.01";
const USER_ID_KEY: &str = "userId";
const DEFAULT_COUNTRY: &str = "FR";
/// Used for customers whose birthday the shop never collected.
const FALLBACK_BIRTHDAY: i64 = 444_614_400;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct NaturalUser<'a> {
    email: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    birthday: i64,
    nationality: &'a str,
    country_of_residence: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedUser {
    #[serde(rename = "Id")]
    id: String,
}

/// Birthdays are calendar dates, sent to MangoPay as the unix time of
/// their midnight in Central European Time.
fn cet_midnight(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Tz::CET
        .from_local_datetime(&midnight)
        .earliest()
        .map_or_else(|| midnight.and_utc().timestamp(), |dt| dt.timestamp())
}

/// MangoPay marketplace wallets.
///
/// A purchase makes sure both the paying customer and the tenant (the
/// beneficiary of the funds) exist as MangoPay natural users, creating and
/// remembering them on first use.
pub struct MangoPayPaymentGateway {
    global: MangoPayGlobalConfiguration,
    tenant_configuration: MangoPayTenantConfiguration,
    tenant: Tenant,
    data_store: GatewayDataStoreRef,
    client: reqwest::Client,
}

impl MangoPayPaymentGateway {
    pub fn new(
        global: MangoPayGlobalConfiguration,
        tenant_configuration: MangoPayTenantConfiguration,
        tenant: Tenant,
        data_store: GatewayDataStoreRef,
        client: reqwest::Client,
    ) -> Self {
        Self {
            global,
            tenant_configuration,
            tenant,
            data_store,
            client,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}{}", self.global.api_base(), API_VERSION, path)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::VendorError {
                gateway: ID,
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn access_token(&self) -> Result<String> {
        debug!("Requesting MangoPay access token");
        let response = self
            .client
            .post(self.url("/oauth/token"))
            .basic_auth(&self.global.client_id, Some(&self.global.client_password))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        let token: TokenResponse = Self::parse(response).await?;
        Ok(token.access_token)
    }

    async fn create_user(&self, user: &NaturalUser<'_>) -> Result<String> {
        let token = self.access_token().await?;
        let response = self
            .client
            .post(self.url(&format!("/{}/users/natural", self.global.client_id)))
            .bearer_auth(token)
            .json(user)
            .send()
            .await?;
        let created: CreatedUser = Self::parse(response).await?;
        Ok(created.id)
    }

    async fn customer_user_id(&self, customer: &Customer) -> Result<String> {
        let stored = self.data_store.customer_data(customer.id, ID).await?;
        if let Some(user_id) = stored.as_ref().and_then(|data| data.get(USER_ID_KEY)) {
            return Ok(user_id.to_string());
        }

        let user_id = self
            .create_user(&NaturalUser {
                email: &customer.email,
                first_name: &customer.first_name,
                last_name: &customer.last_name,
                birthday: customer.birthday.map_or(FALLBACK_BIRTHDAY, cet_midnight),
                nationality: customer.nationality.as_deref().unwrap_or(DEFAULT_COUNTRY),
                country_of_residence: customer
                    .country_of_residence
                    .as_deref()
                    .unwrap_or(DEFAULT_COUNTRY),
            })
            .await?;
        info!(customer = %customer.id, user_id = %user_id, "Created MangoPay user for customer");

        self.data_store
            .store_customer_data(
                GatewayCustomerData::new(customer.id, ID).with(USER_ID_KEY, user_id.as_str()),
            )
            .await?;
        Ok(user_id)
    }

    async fn tenant_user_id(&self) -> Result<String> {
        let stored = self.data_store.tenant_data(self.tenant.id, ID).await?;
        if let Some(user_id) = stored.as_ref().and_then(|data| data.get(USER_ID_KEY)) {
            return Ok(user_id.to_string());
        }

        let beneficiary = &self.tenant_configuration.beneficiary;
        let user_id = self
            .create_user(&NaturalUser {
                email: &beneficiary.email,
                first_name: &beneficiary.first_name,
                last_name: &beneficiary.last_name,
                birthday: cet_midnight(beneficiary.birthday),
                nationality: beneficiary.nationality.as_deref().unwrap_or(DEFAULT_COUNTRY),
                country_of_residence: beneficiary
                    .country_of_residence
                    .as_deref()
                    .unwrap_or(DEFAULT_COUNTRY),
            })
            .await?;
        info!(tenant = %self.tenant.slug, user_id = %user_id, "Created MangoPay user for tenant");

        self.data_store
            .store_tenant_data(
                GatewayTenantData::new(self.tenant.id, ID).with(USER_ID_KEY, user_id.as_str()),
            )
            .await?;
        Ok(user_id)
    }
}

#[async_trait]
impl PaymentGateway for MangoPayPaymentGateway {
    fn id(&self) -> &'static str {
        ID
    }

    async fn purchase(&self, _amount: Amount, data: &PaymentData) -> Result<GatewayResponse> {
        let customer = data.require_customer()?;

        let customer_user_id = self.customer_user_id(customer).await?;
        let tenant_user_id = self.tenant_user_id().await?;

        let operation = PaymentOperation::new(ID, OperationResult::Initialized)
            .with_memo("customerUserId", customer_user_id)
            .with_memo("tenantUserId", tenant_user_id);
        Ok(GatewayResponse::new(true, operation))
    }
}
