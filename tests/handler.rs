use leap_year::api::{ApiGatewayEvent, LeapYearApi, RangeReport, Response, YearReport};
use serde_json::{Value, json};

fn handle(event: Value) -> Response {
    let event: ApiGatewayEvent = serde_json::from_value(event).unwrap();
    LeapYearApi::default().handle_event(event)
}

fn body(response: &Response) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

fn assert_cors(response: &Response) {
    assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
    assert_eq!(
        response.header("Access-Control-Allow-Methods"),
        Some("GET, POST, OPTIONS")
    );
    assert_eq!(
        response.header("Access-Control-Allow-Headers"),
        Some("Content-Type")
    );
    assert_eq!(response.header("Content-Type"), Some("application/json"));
}

#[test]
fn get_leap_year() {
    let response = handle(json!({
        "httpMethod": "GET",
        "path": "/api/leap-year",
        "queryStringParameters": { "year": "2024" }
    }));

    assert_eq!(response.status_code, 200);
    let report: YearReport = serde_json::from_str(&response.body).unwrap();
    assert_eq!(report.year.get(), 2024);
    assert!(report.is_leap_year);
    assert!(report.reason.contains("is a leap year"));
}

#[test]
fn get_common_year() {
    let response = handle(json!({
        "httpMethod": "GET",
        "path": "/api/leap-year",
        "queryStringParameters": { "year": "2023" }
    }));

    assert_eq!(response.status_code, 200);
    let body = body(&response);
    assert_eq!(body["year"], 2023);
    assert_eq!(body["isLeapYear"], false);
    assert!(body["reason"].as_str().unwrap().contains("is not a leap year"));
}

#[test]
fn get_without_year_is_rejected() {
    for query in [json!({}), Value::Null] {
        let response = handle(json!({
            "httpMethod": "GET",
            "path": "/api/leap-year",
            "queryStringParameters": query
        }));

        assert_eq!(response.status_code, 400);
        assert_eq!(
            body(&response)["error"],
            "year must be specified as a query parameter (e.g. ?year=2024)"
        );
    }
}

#[test]
fn get_non_numeric_year_is_rejected() {
    let response = handle(json!({
        "httpMethod": "GET",
        "queryStringParameters": { "year": "abc" }
    }));

    assert_eq!(response.status_code, 400);
    assert!(body(&response)["error"].is_string());
}

#[test]
fn get_out_of_range_year_reports_engine_error() {
    for year in ["0", "-4"] {
        let response = handle(json!({
            "httpMethod": "GET",
            "queryStringParameters": { "year": year }
        }));

        assert_eq!(response.status_code, 400, "year {year}");
        assert_eq!(body(&response)["error"], "year must be 1 or greater");
    }
}

#[test]
fn post_single_year() {
    let response = handle(json!({
        "httpMethod": "POST",
        "path": "/api/leap-year",
        "body": json!({ "year": 2000 }).to_string()
    }));

    assert_eq!(response.status_code, 200);
    let body = body(&response);
    assert_eq!(body["year"], 2000);
    assert_eq!(body["isLeapYear"], true);
    assert_eq!(
        body["reason"],
        "2000 is a leap year because it is divisible by 400."
    );
}

#[test]
fn post_range() {
    let response = handle(json!({
        "httpMethod": "POST",
        "path": "/api/leap-year",
        "body": json!({ "startYear": 2020, "endYear": 2024 }).to_string()
    }));

    assert_eq!(response.status_code, 200);
    let report: RangeReport = serde_json::from_str(&response.body).unwrap();
    assert_eq!(report.start_year.get(), 2020);
    assert_eq!(report.end_year.get(), 2024);
    let years: Vec<u64> = report.leap_years.iter().map(|y| y.get()).collect();
    assert_eq!(years, vec![2020, 2024]);
    assert_eq!(report.count, 2);
}

#[test]
fn post_range_with_string_bounds() {
    let response = handle(json!({
        "httpMethod": "POST",
        "body": json!({ "startYear": "1896", "endYear": "1904" }).to_string()
    }));

    assert_eq!(response.status_code, 200);
    assert_eq!(
        body(&response),
        json!({
            "startYear": 1896,
            "endYear": 1904,
            "leapYears": [1896, 1904],
            "count": 2
        })
    );
}

#[test]
fn post_empty_range() {
    let response = handle(json!({
        "httpMethod": "POST",
        "body": json!({ "startYear": 2021, "endYear": 2023 }).to_string()
    }));

    assert_eq!(response.status_code, 200);
    assert_eq!(body(&response)["leapYears"], json!([]));
    assert_eq!(body(&response)["count"], 0);
}

#[test]
fn post_inverted_range_is_rejected() {
    let response = handle(json!({
        "httpMethod": "POST",
        "body": json!({ "startYear": 2024, "endYear": 2020 }).to_string()
    }));

    assert_eq!(response.status_code, 400);
    assert_eq!(body(&response)["error"], "start year must be ≤ end year");
}

#[test]
fn post_fractional_year_is_rejected() {
    let response = handle(json!({
        "httpMethod": "POST",
        "body": json!({ "year": 2024.5 }).to_string()
    }));

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body(&response)["error"],
        "year must be specified as an integer"
    );
}

#[test]
fn post_without_fields_is_rejected() {
    let response = handle(json!({
        "httpMethod": "POST",
        "path": "/api/leap-year",
        "body": "{}"
    }));

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body(&response)["error"],
        "year or startYear/endYear must be specified"
    );
}

#[test]
fn options_preflight() {
    let response = handle(json!({
        "httpMethod": "OPTIONS",
        "path": "/api/leap-year"
    }));

    assert_eq!(response.status_code, 200);
    assert!(response.body.is_empty());
    assert_cors(&response);
}

#[test]
fn unsupported_method() {
    let response = handle(json!({
        "httpMethod": "DELETE",
        "path": "/api/leap-year"
    }));

    assert_eq!(response.status_code, 405);
    assert_eq!(body(&response)["error"], "Method Not Allowed");
    assert_cors(&response);
}

#[test]
fn http_api_payload_method() {
    let response = handle(json!({
        "requestContext": { "http": { "method": "GET" } },
        "queryStringParameters": { "year": "1900" }
    }));

    assert_eq!(response.status_code, 200);
    assert_eq!(body(&response)["isLeapYear"], false);
}

#[test]
fn every_response_carries_cors_headers() {
    let events = [
        json!({ "httpMethod": "GET", "queryStringParameters": { "year": "2024" } }),
        json!({ "httpMethod": "GET", "queryStringParameters": {} }),
        json!({ "httpMethod": "POST", "body": "{\"year\": 2000}" }),
        json!({ "httpMethod": "POST", "body": "not json" }),
        json!({ "httpMethod": "OPTIONS" }),
        json!({ "httpMethod": "PATCH" }),
    ];

    for event in events {
        let response = handle(event);
        assert_cors(&response);
    }
}

#[test]
fn response_serializes_in_proxy_shape() {
    let response = handle(json!({ "httpMethod": "OPTIONS" }));
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["statusCode"], 200);
    assert_eq!(value["body"], "");
    assert_eq!(value["headers"]["Access-Control-Allow-Origin"], "*");
}

#[test]
fn post_non_object_body_is_rejected() {
    for raw in ["[2024]", "[null, 2020, 2024]", "2024", "\"2024\"", "null", "true"] {
        let response = handle(json!({
            "httpMethod": "POST",
            "body": raw
        }));

        assert_eq!(response.status_code, 400, "body {raw}");
        assert_eq!(
            body(&response)["error"],
            "request body must be valid JSON",
            "body {raw}"
        );
        assert_cors(&response);
    }
}

#[test]
fn years_beyond_i64_are_accepted() {
    let response = handle(json!({
        "httpMethod": "GET",
        "queryStringParameters": { "year": "18446744073709551615" }
    }));

    assert_eq!(response.status_code, 200);
    let report: YearReport = serde_json::from_str(&response.body).unwrap();
    assert_eq!(report.year.get(), u64::MAX);
    assert!(!report.is_leap_year);

    let response = handle(json!({
        "httpMethod": "POST",
        "body": json!({ "year": "9223372036854775808" }).to_string()
    }));

    assert_eq!(response.status_code, 200);
    assert_eq!(body(&response)["year"], 9_223_372_036_854_775_808_u64);
}

#[test]
fn years_beyond_u64_are_rejected() {
    let response = handle(json!({
        "httpMethod": "GET",
        "queryStringParameters": { "year": "18446744073709551616" }
    }));

    assert_eq!(response.status_code, 400);
    assert_eq!(
        body(&response)["error"],
        "year must be specified as an integer"
    );
}
