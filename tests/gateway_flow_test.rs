mod common;

use common::{DataDir, customer, read_fixture, tenant};
use rust_decimal_macros::dec;
use serde_json::json;
use shop_payment_gateways::application::registry::GatewayRegistry;
use shop_payment_gateways::domain::money::{Amount, Currency};
use shop_payment_gateways::domain::operation::OperationResult;
use shop_payment_gateways::domain::payment::{CallbackParams, PaymentData};
use shop_payment_gateways::domain::ports::{GatewayDataStore, PaymentGateway};
use shop_payment_gateways::error::GatewayError;
use shop_payment_gateways::infrastructure::in_memory::InMemoryGatewayDataStore;
use shop_payment_gateways::infrastructure::settings::FilesSettings;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn registry(data_dir: &DataDir) -> GatewayRegistry {
    GatewayRegistry::with_default_gateways(
        FilesSettings::new(data_dir.path()),
        Arc::new(InMemoryGatewayDataStore::new()),
    )
}

fn order_data(order_id: Uuid) -> PaymentData {
    PaymentData {
        base_url: Some("https://shop.example.com".to_string()),
        order_id: Some(order_id),
        currency: Some(Currency::Eur),
        customer: Some(customer("jane@example.com")),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_paybox_purchase_then_notification() {
    let data_dir = DataDir::new();
    data_dir.with_paybox("acme");
    let gateway = registry(&data_dir)
        .create_gateway("paybox", &tenant("acme"))
        .unwrap();

    let order_id = Uuid::new_v4();
    let response = gateway
        .purchase(Amount::new(dec!(49.90)).unwrap(), &order_data(order_id))
        .await
        .unwrap();

    assert!(response.successful);
    assert_eq!(response.operation.result, OperationResult::Initialized);
    assert_eq!(response.form_value("PBX_TOTAL"), Some("4990"));
    assert_eq!(response.form_value("PBX_CMD"), Some(order_id.to_string().as_str()));
    assert_eq!(
        response.form_value("PBX_EFFECTUE"),
        Some("https://shop.example.com/checkout/return")
    );
    let hmac = response.form_value("PBX_HMAC").unwrap();
    assert_eq!(hmac.len(), 128);
    assert!(hmac.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));

    // Paybox calls back on the IPN URL with the signed return parameters.
    let query = format!(
        "status=00000&authorization=XXXXXX&transactionId=123456&requestId=654321&signature={}",
        urlencode(&read_fixture("paybox/ipn_approved.sig"))
    );
    let ack = gateway
        .acknowledge_order(order_id, &CallbackParams::from_query(&query))
        .await
        .unwrap();
    assert!(ack.successful);
    assert_eq!(ack.operation.result, OperationResult::Captured);
    assert_eq!(ack.operation.external_id.as_deref(), Some("123456"));
}

fn urlencode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[tokio::test]
async fn test_stripe_purchase_through_registry() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/charges"))
        .and(body_string_contains("amount=2500"))
        .and(body_string_contains("currency=usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ch_flow"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let data_dir = DataDir::new();
    data_dir.write_tenant(
        "acme",
        "stripe",
        &format!("apiKey: sk_test_flow\napiBase: {}\n", mock_server.uri()),
    );

    let gateway = registry(&data_dir)
        .create_gateway("stripe", &tenant("acme"))
        .unwrap();
    let data = PaymentData {
        currency: Some(Currency::Usd),
        card_token: Some("tok_visa".to_string()),
        ..order_data(Uuid::new_v4())
    };
    let response = gateway
        .purchase(Amount::new(dec!(25)).unwrap(), &data)
        .await
        .unwrap();

    assert!(response.successful);
    assert_eq!(response.operation.external_id.as_deref(), Some("ch_flow"));
}

#[tokio::test]
async fn test_monetaweb_purchase_and_return() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/init"))
        .and(body_string_contains("amt=100.00"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("555:https://pay.example.com/hosted"),
        )
        .mount(&mock_server)
        .await;

    let data_dir = DataDir::new();
    data_dir.write_tenant(
        "acme",
        "monetaweb",
        &format!(
            "id: 99999999\npassword: secret\naction: 4\nbaseURL: https://shop.example.com\nendpoint: {}/init\n",
            mock_server.uri()
        ),
    );

    let gateway = registry(&data_dir)
        .create_gateway("monetaweb", &tenant("acme"))
        .unwrap();
    let order_id = Uuid::new_v4();
    let response = gateway
        .purchase(Amount::new(dec!(100)).unwrap(), &order_data(order_id))
        .await
        .unwrap();
    assert_eq!(
        response.redirect_url.as_deref(),
        Some("https://pay.example.com/hosted?PaymentID=555")
    );

    let ack = gateway
        .acknowledge_order(
            order_id,
            &CallbackParams::from_query("result=CANCELED&paymentid=555"),
        )
        .await
        .unwrap();
    assert!(!ack.successful);
    assert_eq!(
        ack.response_text.as_deref(),
        Some("https://shop.example.com/checkout/cancelled")
    );
}

#[tokio::test]
async fn test_mangopay_users_are_shared_across_gateway_instances() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2.01/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .expect(2)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.01/shop/users/natural"))
        .and(body_string_contains("jane@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": "11"})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2.01/shop/users/natural"))
        .and(body_string_contains("owner@acme.example"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"Id": "22"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let data_dir = DataDir::new();
    data_dir.write_global(
        "mangopay",
        &format!(
            "clientId: shop\nclientPassword: s3cr3t\nbaseUrl: {}\n",
            mock_server.uri()
        ),
    );
    data_dir.write_tenant(
        "acme",
        "mangopay",
        "beneficiary:\n  email: owner@acme.example\n  firstName: Ada\n  lastName: Owner\n  birthday: 1984-03-02\n",
    );

    let store = Arc::new(InMemoryGatewayDataStore::new());
    let registry =
        GatewayRegistry::with_default_gateways(FilesSettings::new(data_dir.path()), store.clone());

    let first = registry
        .create_gateway("mangopay", &tenant("acme"))
        .unwrap()
        .purchase(Amount::new(dec!(10)).unwrap(), &order_data(Uuid::new_v4()))
        .await
        .unwrap();
    let second = registry
        .create_gateway("mangopay", &tenant("acme"))
        .unwrap()
        .purchase(Amount::new(dec!(10)).unwrap(), &order_data(Uuid::new_v4()))
        .await
        .unwrap();

    assert_eq!(first.operation.memo["customerUserId"], "11");
    assert_eq!(first.operation.memo["tenantUserId"], "22");
    assert_eq!(first.operation.memo, second.operation.memo);

    let stored = store
        .tenant_data(tenant("acme").id, "mangopay")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.get("userId"), Some("22"));
}

#[tokio::test]
async fn test_unconfigured_tenant() {
    let data_dir = DataDir::new();
    let registry = registry(&data_dir);

    for id in registry.ids() {
        let result = registry.create_gateway(id, &tenant("nobody"));
        assert!(
            matches!(result, Err(GatewayError::ConfigurationNotFound(_))),
            "{id} should require configuration"
        );
    }
}
