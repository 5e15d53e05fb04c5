use crate::config::Config;
use crate::domain::models::booking::Booking;
use crate::domain::models::payment::{PaymentOutcome, PaymentSession, RefundOutcome};
use crate::domain::ports::PaymentGateway;
use crate::error::AppError;
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::error;
use uuid::Uuid;

type HmacSha256 = Hmac<Sha256>;

/// MoMo wallet gateway (v2 API). Every request carries an HMAC-SHA256
/// signature over the alphabetized key=value form of its fields.
pub struct MomoGateway {
    client: Client,
    endpoint: String,
    partner_code: String,
    access_key: String,
    secret_key: String,
    ipn_url: String,
}

impl MomoGateway {
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.momo_endpoint.clone(),
            partner_code: config.momo_partner_code.clone(),
            access_key: config.momo_access_key.clone(),
            secret_key: config.momo_secret_key.clone(),
            ipn_url: format!("{}/api/v1/bookings/momo/callback", config.public_base_url),
        }
    }

    fn sign(&self, raw: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes()).expect("hmac key");
        mac.update(raw.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    async fn post<Req: Serialize, Resp: for<'de> Deserialize<'de>>(&self, path: &str, payload: &Req) -> Result<Resp, AppError> {
        let url = format!("{}{}", self.endpoint, path);
        let res = self.client.post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("MoMo connection error: {}", e);
                error!("{}", msg);
                AppError::Gateway(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("MoMo request failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Gateway(msg));
        }

        res.json::<Resp>().await.map_err(|e| {
            let msg = format!("MoMo response decode error: {}", e);
            error!("{}", msg);
            AppError::Gateway(msg)
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionRequest {
    partner_code: String,
    request_id: String,
    amount: i64,
    order_id: String,
    order_info: String,
    redirect_url: String,
    ipn_url: String,
    request_type: String,
    extra_data: String,
    lang: String,
    signature: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSessionResponse {
    result_code: i64,
    message: Option<String>,
    pay_url: Option<String>,
    deeplink: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    partner_code: String,
    request_id: String,
    order_id: String,
    lang: String,
    signature: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    result_code: i64,
    trans_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefundRequest {
    partner_code: String,
    order_id: String,
    request_id: String,
    amount: i64,
    trans_id: i64,
    description: String,
    lang: String,
    signature: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefundResponse {
    result_code: i64,
    message: Option<String>,
}

#[async_trait]
impl PaymentGateway for MomoGateway {
    async fn create_session(&self, booking: &Booking, return_url: &str) -> Result<PaymentSession, AppError> {
        let request_id = Uuid::new_v4().to_string();
        let order_info = format!("Hotel booking {}", booking.code);
        let extra_data = general_purpose::STANDARD.encode(
            serde_json::json!({ "bookingId": booking.id }).to_string()
        );

        let raw = format!(
            "accessKey={}&amount={}&extraData={}&ipnUrl={}&orderId={}&orderInfo={}&partnerCode={}&redirectUrl={}&requestId={}&requestType=captureWallet",
            self.access_key, booking.total_price, extra_data, self.ipn_url,
            booking.id, order_info, self.partner_code, return_url, request_id
        );

        let payload = CreateSessionRequest {
            partner_code: self.partner_code.clone(),
            request_id: request_id.clone(),
            amount: booking.total_price,
            order_id: booking.id.clone(),
            order_info,
            redirect_url: return_url.to_string(),
            ipn_url: self.ipn_url.clone(),
            request_type: "captureWallet".to_string(),
            extra_data,
            lang: "vi".to_string(),
            signature: self.sign(&raw),
        };

        let resp: CreateSessionResponse = self.post("/v2/gateway/api/create", &payload).await?;

        if resp.result_code != 0 {
            let msg = resp.message.unwrap_or_else(|| "unknown".to_string());
            return Err(AppError::Gateway(format!("MoMo rejected session: {} ({})", msg, resp.result_code)));
        }

        let pay_url = resp.pay_url
            .ok_or_else(|| AppError::Gateway("MoMo returned no payUrl".to_string()))?;

        Ok(PaymentSession { pay_url, deeplink: resp.deeplink, request_id })
    }

    async fn query_payment(&self, booking_id: &str) -> Result<PaymentOutcome, AppError> {
        let request_id = Uuid::new_v4().to_string();
        let raw = format!(
            "accessKey={}&orderId={}&partnerCode={}&requestId={}",
            self.access_key, booking_id, self.partner_code, request_id
        );

        let payload = QueryRequest {
            partner_code: self.partner_code.clone(),
            request_id,
            order_id: booking_id.to_string(),
            lang: "vi".to_string(),
            signature: self.sign(&raw),
        };

        let resp: QueryResponse = self.post("/v2/gateway/api/query", &payload).await?;

        Ok(PaymentOutcome {
            order_id: booking_id.to_string(),
            result_code: resp.result_code,
            trans_id: resp.trans_id.map(|t| t.to_string()),
        })
    }

    async fn refund(&self, booking: &Booking, amount: i64) -> Result<RefundOutcome, AppError> {
        let trans_id: i64 = booking.trans_id.as_deref()
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| AppError::Conflict("No gateway transaction recorded for this booking".to_string()))?;

        let request_id = Uuid::new_v4().to_string();
        let order_id = Uuid::new_v4().to_string();
        let description = format!("Refund booking {}", booking.code);

        let raw = format!(
            "accessKey={}&amount={}&description={}&orderId={}&partnerCode={}&requestId={}&transId={}",
            self.access_key, amount, description, order_id,
            self.partner_code, request_id, trans_id
        );

        let payload = RefundRequest {
            partner_code: self.partner_code.clone(),
            order_id,
            request_id,
            amount,
            trans_id,
            description,
            lang: "vi".to_string(),
            signature: self.sign(&raw),
        };

        let resp: RefundResponse = self.post("/v2/gateway/api/refund", &payload).await?;

        Ok(RefundOutcome { result_code: resp.result_code, message: resp.message })
    }
}
