use serde::{Deserialize, Serialize};

/// Result of opening a payment session with the wallet gateway. The client
/// navigates the browser to `pay_url`; `deeplink` is the in-app alternative.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentSession {
    pub pay_url: String,
    pub deeplink: Option<String>,
    pub request_id: String,
}

/// Authoritative payment outcome, whether it arrived via the notify webhook
/// or from querying the gateway directly. `result_code` 0 means the wallet
/// captured the amount; any other code is a specific failure (1006 = user
/// denied confirmation).
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub order_id: String,
    pub result_code: i64,
    pub trans_id: Option<String>,
}

impl PaymentOutcome {
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }
}

#[derive(Debug, Clone)]
pub struct RefundOutcome {
    pub result_code: i64,
    pub message: Option<String>,
}

impl RefundOutcome {
    pub fn is_success(&self) -> bool {
        self.result_code == 0
    }
}
