//! AWS Lambda handler for savings projections
//!
//! Accepts the three plan inputs via JSON and returns the horizon table,
//! optionally with the sampled curve for charting.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use wealth_projector::plan::{check_curve, DEFAULT_INVEST_PCT, DEFAULT_RETURN_PCT, DEFAULT_WEEKLY_PAY};
use wealth_projector::projection::{
    CurvePoint, HorizonValue, ProjectionConfig, ProjectionEngine, DEFAULT_CURVE_YEARS,
    DEFAULT_HORIZONS,
};
use wealth_projector::{ContributionPlan, PlanError};

/// Input for one projection
#[derive(Debug, Deserialize)]
pub struct ProjectionRequest {
    /// Weekly pay in dollars (default: 1000)
    #[serde(default = "default_weekly_pay")]
    pub weekly_pay: f64,

    /// Percent of pay invested, 0-50 (default: 20)
    #[serde(default = "default_invest_pct")]
    pub invest_pct: f64,

    /// Expected annual return in percent, 4-15 (default: 8)
    #[serde(default = "default_return_pct")]
    pub return_pct: f64,

    /// Horizons in years (default: 1, 5, 10)
    #[serde(default = "default_horizons")]
    pub horizons: Vec<f64>,

    /// Whether to include the sampled curve
    #[serde(default)]
    pub include_curve: bool,

    /// Curve length in years (default: 10)
    #[serde(default = "default_curve_years")]
    pub curve_years: f64,

    /// Curve samples per year (default: 52)
    #[serde(default = "default_points_per_year")]
    pub curve_points_per_year: u32,
}

fn default_weekly_pay() -> f64 { DEFAULT_WEEKLY_PAY }
fn default_invest_pct() -> f64 { DEFAULT_INVEST_PCT }
fn default_return_pct() -> f64 { DEFAULT_RETURN_PCT }
fn default_horizons() -> Vec<f64> { DEFAULT_HORIZONS.to_vec() }
fn default_curve_years() -> f64 { DEFAULT_CURVE_YEARS }
fn default_points_per_year() -> u32 { 52 }

/// Output from the projection
#[derive(Debug, Serialize)]
pub struct ProjectionResponse {
    pub weekly_investment: f64,
    pub annual_return_rate: f64,
    pub weekly_rate: f64,
    pub horizons: Vec<HorizonValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub curve: Vec<CurvePoint>,
    pub execution_time_ms: u64,
}

fn build_response(request: &ProjectionRequest) -> Result<ProjectionResponse, PlanError> {
    let start = std::time::Instant::now();

    let plan = ContributionPlan::new(request.weekly_pay, request.invest_pct, request.return_pct)?;
    let input = plan.to_input_with_horizons(&request.horizons)?;

    if request.include_curve {
        check_curve(request.curve_years, request.curve_points_per_year)?;
    }

    let engine = ProjectionEngine::new(ProjectionConfig {
        include_curve: request.include_curve,
        curve_years: request.curve_years,
        curve_points_per_year: request.curve_points_per_year,
    });
    let result = engine.project(&input);

    Ok(ProjectionResponse {
        weekly_investment: result.weekly_contribution,
        annual_return_rate: result.annual_return_rate,
        weekly_rate: result.weekly_rate,
        horizons: result.horizons,
        curve: result.curve,
        execution_time_ms: start.elapsed().as_millis() as u64,
    })
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    let body = serde_json::json!({ "error": message });
    Ok(with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(body.to_string()))?)
}

fn json_response(body: &ProjectionResponse) -> Result<Response<Body>, Error> {
    Ok(with_cors(Response::builder())
        .status(200)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

async fn handler(event: Request) -> Result<Response<Body>, Error> {
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: ProjectionRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            warn!("Invalid JSON body: {}", e);
            return error_response(400, &format!("Invalid JSON: {}", e));
        }
    };
    debug!("Projection request: {:?}", request);

    match build_response(&request) {
        Ok(response) => json_response(&response),
        Err(e) => {
            warn!("Rejected projection request: {}", e);
            error_response(400, e.user_message())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use wealth_projector::future_value;

    #[test]
    fn test_empty_request_uses_defaults() {
        let request: ProjectionRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.weekly_pay, 1000.0);
        assert_eq!(request.invest_pct, 20.0);
        assert_eq!(request.return_pct, 8.0);
        assert_eq!(request.horizons, vec![1.0, 5.0, 10.0]);
        assert!(!request.include_curve);

        let response = build_response(&request).unwrap();
        assert_eq!(response.weekly_investment, 200.0);
        assert_eq!(response.horizons.len(), 3);
        assert!(response.curve.is_empty());
        assert_eq!(response.horizons[2].future_value, future_value(200.0, 0.08, 10.0));
    }

    #[test]
    fn test_curve_request() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"weekly_pay": 500, "invest_pct": 10, "return_pct": 6,
                "include_curve": true, "curve_years": 2, "curve_points_per_year": 12}"#,
        )
        .unwrap();
        let response = build_response(&request).unwrap();
        assert_eq!(response.curve.len(), 25);
        assert_eq!(response.curve[0].future_value, 0.0);
    }

    #[test]
    fn test_out_of_range_request_is_rejected() {
        let request: ProjectionRequest =
            serde_json::from_str(r#"{"invest_pct": 75}"#).unwrap();
        let err = build_response(&request).unwrap_err();
        assert_eq!(err.user_message(), "Please enter valid numbers");

        let request: ProjectionRequest =
            serde_json::from_str(r#"{"horizons": [5, -1]}"#).unwrap();
        assert!(build_response(&request).is_err());
    }

    #[test]
    fn test_non_numeric_field_fails_to_parse() {
        assert!(serde_json::from_str::<ProjectionRequest>(r#"{"weekly_pay": "lots"}"#).is_err());
    }

    #[test]
    fn test_oversized_curve_is_rejected() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"include_curve": true, "curve_years": 1e15, "curve_points_per_year": 4294967295}"#,
        )
        .unwrap();
        assert!(matches!(
            build_response(&request),
            Err(PlanError::CurveTooLarge { .. })
        ));
    }

    fn request(method: &str, body: Body) -> Request {
        lambda_http::http::Request::builder()
            .method(method)
            .uri("/")
            .body(body)
            .unwrap()
    }

    fn header<'a>(response: &'a Response<Body>, name: &str) -> &'a str {
        response.headers().get(name).unwrap().to_str().unwrap()
    }

    fn body_json(response: &Response<Body>) -> serde_json::Value {
        match response.body() {
            Body::Text(s) => serde_json::from_str(s).unwrap(),
            other => panic!("expected text body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_options_returns_cors_headers() {
        let response = handler(request("OPTIONS", Body::Empty)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(header(&response, "Access-Control-Allow-Origin"), "*");
        assert_eq!(header(&response, "Access-Control-Allow-Methods"), "POST, OPTIONS");
        assert_eq!(header(&response, "Access-Control-Allow-Headers"), "Content-Type");
        assert!(matches!(response.body(), Body::Empty));
    }

    #[tokio::test]
    async fn test_empty_body_projects_defaults() {
        let response = handler(request("POST", Body::Empty)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(header(&response, "Content-Type"), "application/json");
        assert_eq!(header(&response, "Access-Control-Allow-Origin"), "*");

        let json = body_json(&response);
        assert_eq!(json["weekly_investment"], 200.0);
        assert_eq!(json["horizons"].as_array().unwrap().len(), 3);
        assert!(json.get("curve").is_none());
    }

    #[tokio::test]
    async fn test_binary_body_with_curve() {
        let body = Body::Binary(br#"{"include_curve": true, "curve_years": 1}"#.to_vec());
        let response = handler(request("POST", body)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(body_json(&response)["curve"].as_array().unwrap().len(), 53);
    }

    #[tokio::test]
    async fn test_invalid_json_is_bad_request() {
        let response = handler(request("POST", Body::Text("{ nope".to_string()))).await.unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(header(&response, "Access-Control-Allow-Origin"), "*");
        let message = body_json(&response)["error"].as_str().unwrap().to_string();
        assert!(message.starts_with("Invalid JSON: "), "got {}", message);
    }

    #[tokio::test]
    async fn test_invalid_numbers_get_generic_message() {
        let body = Body::Text(r#"{"return_pct": 40}"#.to_string());
        let response = handler(request("POST", body)).await.unwrap();

        assert_eq!(response.status(), 400);
        assert_eq!(body_json(&response)["error"], "Please enter valid numbers");
    }
}
