//! Wire data types for the `BotVips` backend.
//!
//! Field names follow the backend JSON contract (camelCase), so every type
//! here carries serde renames rather than leaking wire spelling into the
//! rest of the crate. All monetary figures are integers in minor currency
//! units (cents); dividing by 100 is the presentation layer's job.

use serde::{Deserialize, Serialize};

/// The authenticated user's profile as returned by the sign-in endpoint and
/// persisted locally as the `user_data` blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Account e-mail, also the identity used for push registration
    pub email: String,
    /// Platform fee rate applied to this account
    pub fee: f64,
    /// Payment-account identifier, when the user has payouts configured
    #[serde(rename = "stripeAccountId", skip_serializing_if = "Option::is_none")]
    pub stripe_account_id: Option<String>,
}

/// Request body for `POST /user/singin`.
#[derive(Debug, Serialize)]
pub struct SignInRequest {
    /// Account e-mail
    pub email: String,
    /// Plaintext password, sent over TLS
    pub password: String,
}

/// Response body of a successful sign-in: the bearer token plus the profile
/// fields, flat in one object.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInResponse {
    /// Opaque bearer credential for subsequent requests
    pub token: String,
    /// The user profile carried alongside the token
    #[serde(flatten)]
    pub user: UserProfile,
}

/// Request body for `POST /user/singup`.
#[derive(Debug, Serialize)]
pub struct SignUpRequest {
    /// Display name
    pub name: String,
    /// Account e-mail
    pub email: String,
    /// Plaintext password, sent over TLS
    pub password: String,
    /// Optional affiliate referral code
    #[serde(rename = "affiliateIndication", skip_serializing_if = "Option::is_none")]
    pub affiliate_indication: Option<String>,
}

/// Request body for `POST /user/record/push-token`.
///
/// The backend expects the field `usermail`, not `email`.
#[derive(Debug, Serialize)]
pub struct PushTokenRequest {
    /// Account e-mail identifying the device owner
    pub usermail: String,
    /// Opaque device push token
    #[serde(rename = "pushToken")]
    pub push_token: String,
}

/// Request body for `POST /user/dashboard`.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardRequest {
    /// Bot to scope the metrics to; `None` covers all of the user's bots
    #[serde(rename = "botId")]
    pub bot_id: Option<String>,
    /// Inclusive range start, RFC 3339
    #[serde(rename = "initDate")]
    pub init_date: String,
    /// Inclusive range end, RFC 3339
    #[serde(rename = "finishDate")]
    pub finish_date: String,
}

/// One bucket of the daily billing series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphPoint {
    /// Day the bucket covers, as a date string
    pub label: String,
    /// Billing for that day in minor currency units
    pub value: i64,
}

/// Aggregate metrics for one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralDashboard {
    /// Total billing over the queried range, minor units
    pub billing: i64,
    /// Billing accumulated today, minor units
    pub billing_today: i64,
    /// Billing accumulated this calendar month, minor units
    pub billing_month: i64,
    /// Average ticket value, minor units
    pub average_ticket_value: i64,
    /// Orders created in the range
    pub created_orders_count: u32,
    /// Orders paid in the range
    pub paid_orders_count: u32,
    /// Orders still pending in the range
    pub pending_orders_count: u32,
    /// Paid/created conversion, percent
    pub conversion_rate: f64,
    /// Daily billing series
    pub graphs: Vec<GraphPoint>,
    /// ISO 4217 currency code of every monetary figure above
    pub currency: String,
}

/// Full dashboard payload: the primary-currency aggregate plus one parallel
/// sub-result per additional currency. Sub-results are never summed into
/// the general figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResult {
    /// Metrics in the account's primary currency
    pub general_dashboard: GeneralDashboard,
    /// Per-currency metrics for international sales, possibly empty
    #[serde(default)]
    pub international_dashboards: Vec<GeneralDashboard>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sign_in_response_parses_flat_profile() {
        let body = json!({
            "token": "tok-abc",
            "name": "Ana",
            "email": "ana@example.com",
            "fee": 0.05,
            "stripeAccountId": "acct_123"
        });

        let parsed: SignInResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.token, "tok-abc");
        assert_eq!(parsed.user.name, "Ana");
        assert_eq!(parsed.user.stripe_account_id.as_deref(), Some("acct_123"));
    }

    #[test]
    fn test_sign_in_response_without_payment_account() {
        let body = json!({
            "token": "tok-abc",
            "name": "Ana",
            "email": "ana@example.com",
            "fee": 0.1
        });

        let parsed: SignInResponse = serde_json::from_value(body).unwrap();
        assert!(parsed.user.stripe_account_id.is_none());
    }

    #[test]
    fn test_sign_up_request_omits_absent_affiliate() {
        let request = SignUpRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "secret".to_string(),
            affiliate_indication: None,
        };

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("affiliateIndication").is_none());
    }

    #[test]
    fn test_dashboard_request_uses_backend_field_names() {
        let request = DashboardRequest {
            bot_id: None,
            init_date: "2026-08-01T00:00:00.000Z".to_string(),
            finish_date: "2026-08-31T23:59:59.999Z".to_string(),
        };

        let body = serde_json::to_value(&request).unwrap();
        assert!(body["botId"].is_null());
        assert_eq!(body["initDate"], "2026-08-01T00:00:00.000Z");
        assert_eq!(body["finishDate"], "2026-08-31T23:59:59.999Z");
    }

    #[test]
    fn test_dashboard_result_defaults_missing_international() {
        let body = json!({
            "generalDashboard": {
                "billing": 123_456,
                "billingToday": 1000,
                "billingMonth": 50_000,
                "averageTicketValue": 2469,
                "createdOrdersCount": 80,
                "paidOrdersCount": 50,
                "pendingOrdersCount": 30,
                "conversionRate": 62.5,
                "graphs": [{"label": "2026-08-01", "value": 1000}],
                "currency": "BRL"
            }
        });

        let parsed: DashboardResult = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.general_dashboard.billing, 123_456);
        assert!(parsed.international_dashboards.is_empty());
    }
}
