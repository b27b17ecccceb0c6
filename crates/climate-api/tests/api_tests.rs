//! Integration tests for the query API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. Each test seeds its own in-memory `SQLite`
//! database with the `hawaii.sqlite` schema.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::indexing_slicing
)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use climate_api::router::build_router;
use climate_api::state::AppState;
use climate_db::ClimatePool;
use climate_types::{DatasetBounds, Measurement, Station};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

const SCHEMA: &str = r"
CREATE TABLE station (
    id INTEGER PRIMARY KEY,
    station TEXT,
    name TEXT,
    latitude FLOAT,
    longitude FLOAT,
    elevation FLOAT
);
CREATE TABLE measurement (
    id INTEGER PRIMARY KEY,
    station TEXT,
    date TEXT,
    prcp FLOAT,
    tobs FLOAT
);
";

const INVALID_DATE: &str = "Invalid date. Please select a dates between 2010-01-01 and \
                            2017-08-23. Make sure date entered matches format yyyy-mm-dd";

const WAIKIKI: &str = "USC00519397";
const WAIHEE: &str = "USC00519281";
const KANEOHE: &str = "USC00513117";

// =========================================================================
// Fixtures
// =========================================================================

fn stations() -> Vec<Station> {
    vec![
        Station {
            id: 1,
            station: WAIKIKI.to_owned(),
            name: "WAIKIKI 717.2, HI US".to_owned(),
            latitude: 21.2716,
            longitude: -157.8168,
            elevation: 3.0,
        },
        Station {
            id: 2,
            station: WAIHEE.to_owned(),
            name: "WAIHEE 837.5, HI US".to_owned(),
            latitude: 21.45167,
            longitude: -157.84889,
            elevation: 32.9,
        },
        Station {
            id: 3,
            station: KANEOHE.to_owned(),
            name: "KANEOHE 838.1, HI US".to_owned(),
            latitude: 21.4234,
            longitude: -157.8015,
            elevation: 14.6,
        },
    ]
}

fn m(id: i64, station: &str, date: &str, prcp: Option<f64>, tobs: Option<f64>) -> Measurement {
    Measurement {
        id,
        station: station.to_owned(),
        date: date.to_owned(),
        prcp,
        tobs,
    }
}

/// Latest date 2017-08-23; the last-year window starts 2016-08-23.
fn measurements() -> Vec<Measurement> {
    vec![
        m(1, WAIKIKI, "2010-01-01", Some(0.08), Some(65.0)),
        m(2, WAIHEE, "2010-01-01", Some(0.15), Some(70.0)),
        m(3, WAIKIKI, "2016-08-22", Some(0.02), Some(79.0)),
        m(4, WAIHEE, "2016-08-23", Some(1.79), Some(77.0)),
        m(5, KANEOHE, "2016-12-31", Some(0.1), Some(66.0)),
        m(6, WAIHEE, "2017-01-01", Some(0.0), Some(62.0)),
        m(7, KANEOHE, "2017-01-01", None, None),
        m(8, WAIHEE, "2017-08-23", Some(0.45), Some(76.0)),
        m(9, WAIKIKI, "2017-08-23", Some(0.0), Some(81.0)),
    ]
}

async fn seed(stations: &[Station], measurements: &[Measurement]) -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    sqlx::raw_sql(SCHEMA).execute(&pool).await.unwrap();

    for s in stations {
        sqlx::query(
            r"INSERT INTO station (id, station, name, latitude, longitude, elevation)
              VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(s.id)
        .bind(&s.station)
        .bind(&s.name)
        .bind(s.latitude)
        .bind(s.longitude)
        .bind(s.elevation)
        .execute(&pool)
        .await
        .unwrap();
    }

    for row in measurements {
        sqlx::query(
            r"INSERT INTO measurement (id, station, date, prcp, tobs)
              VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(row.id)
        .bind(&row.station)
        .bind(&row.date)
        .bind(row.prcp)
        .bind(row.tobs)
        .execute(&pool)
        .await
        .unwrap();
    }

    let state = AppState::new(ClimatePool::from_pool(pool), DatasetBounds::default());
    build_router(Arc::new(state))
}

async fn fixture_router() -> Router {
    seed(&stations(), &measurements()).await
}

async fn get(router: Router, path: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(router: Router, path: &str) -> (StatusCode, Value) {
    let (status, body) = get(router, path).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn object_keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect()
}

// =========================================================================
// Index
// =========================================================================

#[tokio::test]
async fn test_index_lists_routes() {
    let router = fixture_router().await;
    let response = router
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();
    assert!(content_type.contains("text/html"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(body.starts_with("Welcome to the Hawaii Climate API"));
    for route in ["/api/v1.0/precipitation", "/api/v1.0/stations", "/api/v1.0/tobs"] {
        assert!(body.contains(route), "missing {route}");
    }
}

// =========================================================================
// Precipitation
// =========================================================================

#[tokio::test]
async fn test_precipitation_keys_are_distinct_dates_in_order() {
    let router = fixture_router().await;
    let response = router
        .oneshot(
            Request::get("/api/v1.0/precipitation")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(object_keys(&json), vec!["precipitation data"]);
    let list = json["precipitation data"].as_array().unwrap();
    assert_eq!(list.len(), 1);

    let dates = object_keys(&list[0]);
    assert_eq!(
        dates,
        vec![
            "2010-01-01",
            "2016-08-22",
            "2016-08-23",
            "2016-12-31",
            "2017-01-01",
            "2017-08-23",
        ]
    );
    assert_eq!(list[0]["2016-08-23"], 1.79);
}

#[tokio::test]
async fn test_precipitation_repeated_date_collapses_to_one_key() {
    let rows = vec![
        m(1, WAIKIKI, "2017-01-01", Some(0.3), Some(70.0)),
        m(2, WAIHEE, "2017-01-01", Some(0.7), Some(71.0)),
    ];
    let router = seed(&stations(), &rows).await;
    let (status, json) = get_json(router, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let data = &json["precipitation data"][0];
    assert_eq!(object_keys(data), vec!["2017-01-01"]);
    // Either row may sort last among equal dates; one of them is kept.
    let kept = data["2017-01-01"].as_f64().unwrap();
    assert!(kept == 0.3 || kept == 0.7, "{kept}");
}

#[tokio::test]
async fn test_precipitation_null_values_are_kept() {
    let rows = vec![
        m(1, KANEOHE, "2017-01-01", None, None),
        m(2, KANEOHE, "2017-01-02", Some(0.2), Some(70.0)),
    ];
    let router = seed(&stations(), &rows).await;
    let (_, body) = get(router, "/api/v1.0/precipitation").await;

    assert_eq!(
        body,
        r#"{"precipitation data":[{"2017-01-01":null,"2017-01-02":0.2}]}"#
    );
}

#[tokio::test]
async fn test_precipitation_empty_dataset() {
    let router = seed(&[], &[]).await;
    let (status, body) = get(router, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"precipitation data":[{}]}"#);
}

// =========================================================================
// Stations
// =========================================================================

#[tokio::test]
async fn test_stations_one_record_per_station() {
    let router = fixture_router().await;
    let (status, json) = get_json(router, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    let list = json["stations"].as_array().unwrap();
    assert_eq!(list.len(), 3);

    let ids: Vec<&str> = list.iter().map(|s| s["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec![WAIKIKI, WAIHEE, KANEOHE]);

    assert_eq!(
        object_keys(&list[0]),
        vec!["id", "name", "lat", "long", "elevation"]
    );
    assert_eq!(list[0]["name"], "WAIKIKI 717.2, HI US");
    assert_eq!(list[0]["lat"], 21.2716);
    assert_eq!(list[0]["long"], -157.8168);
    assert_eq!(list[0]["elevation"], 3.0);
}

#[tokio::test]
async fn test_stations_empty_table() {
    let router = seed(&[], &measurements()).await;
    let (status, body) = get(router, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"stations":[]}"#);
}

// =========================================================================
// Most active station
// =========================================================================

#[tokio::test]
async fn test_tobs_returns_most_active_station_in_window() {
    let router = fixture_router().await;
    let (status, json) = get_json(router, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    // The record itself, without a "station" wrapper.
    assert_eq!(object_keys(&json), vec!["id", "data"]);
    assert_eq!(json["id"], WAIHEE);

    let data = &json["data"];
    assert_eq!(
        object_keys(data),
        vec!["2016-08-23", "2017-01-01", "2017-08-23"]
    );
    assert!(object_keys(data).iter().all(|d| *d >= "2016-08-23"));
    assert_eq!(data["2016-08-23"], 1.79);
    assert_eq!(data["2017-08-23"], 0.45);
}

#[tokio::test]
async fn test_tobs_empty_dataset_is_server_error() {
    let router = seed(&stations(), &[]).await;
    let (status, json) = get_json(router, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["status"], 500);
    assert!(json["error"].is_string());
}

// =========================================================================
// Temperature summary
// =========================================================================

#[tokio::test]
async fn test_start_summary_shape_and_values() {
    let router = fixture_router().await;
    let (status, body) = get(router, "/api/v1.0/2017-01-01").await;

    assert_eq!(status, StatusCode::OK);
    // 62, 76, 81; the null reading is not a data point.
    assert_eq!(body, r#"{"data_points":3,"TMIN":62.0,"TMAX":81.0,"TAVG":73.0}"#);
}

#[tokio::test]
async fn test_start_summary_counts_150_rows() {
    let rows: Vec<Measurement> = [WAIKIKI, WAIHEE, KANEOHE, "USC00517948", "USC00518838"]
        .iter()
        .enumerate()
        .flat_map(|(s, station)| {
            (1..=30_i64).map(move |day| {
                m(
                    i64::try_from(s).unwrap() * 100 + day,
                    station,
                    &format!("2017-01-{day:02}"),
                    Some(0.0),
                    Some(70.0),
                )
            })
        })
        .collect();
    assert_eq!(rows.len(), 150);

    let router = seed(&stations(), &rows).await;
    let (status, json) = get_json(router, "/api/v1.0/2017-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data_points"], 150);
    assert_eq!(json["TAVG"], 70.0);
}

#[tokio::test]
async fn test_start_before_bounds_is_404_even_with_rows() {
    let router = fixture_router().await;
    let (status, json) = get_json(router, "/api/v1.0/2009-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({ "error": INVALID_DATE }));
}

#[tokio::test]
async fn test_start_after_data_is_404() {
    let router = fixture_router().await;
    let (status, json) = get_json(router, "/api/v1.0/2018-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], INVALID_DATE);
}

#[tokio::test]
async fn test_malformed_start_matches_nothing() {
    let router = fixture_router().await;
    let (status, json) = get_json(router, "/api/v1.0/yesterday").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], INVALID_DATE);
}

#[tokio::test]
async fn test_range_summary_inside_bounds() {
    let router = fixture_router().await;
    let (status, json) = get_json(router, "/api/v1.0/2016-08-22/2016-12-31").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(object_keys(&json), vec!["data_points", "TMIN", "TMAX", "TAVG"]);
    assert_eq!(json["data_points"], 3);
    assert_eq!(json["TMIN"], 66.0);
    assert_eq!(json["TMAX"], 79.0);
    assert_eq!(json["TAVG"], 74.0);
}

#[tokio::test]
async fn test_range_min_avg_max_are_ordered() {
    for path in [
        "/api/v1.0/2010-01-01/2017-08-23",
        "/api/v1.0/2016-08-23/2017-01-01",
        "/api/v1.0/2017-08-23/2017-08-23",
    ] {
        let router = fixture_router().await;
        let (status, json) = get_json(router, path).await;

        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(json["data_points"].as_i64().unwrap() > 0);
        let min = json["TMIN"].as_f64().unwrap();
        let avg = json["TAVG"].as_f64().unwrap();
        let max = json["TMAX"].as_f64().unwrap();
        assert!(min <= avg && avg <= max, "{path}: {min} {avg} {max}");
    }
}

#[tokio::test]
async fn test_range_end_beyond_bounds_is_404() {
    let router = fixture_router().await;
    let (status, json) = get_json(router, "/api/v1.0/2016-01-01/2018-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, serde_json::json!({ "error": INVALID_DATE }));
}

#[tokio::test]
async fn test_range_inverted_is_404() {
    let router = fixture_router().await;
    let (status, _) = get_json(router, "/api/v1.0/2017-08-23/2010-01-01").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =========================================================================
// Routing
// =========================================================================

#[tokio::test]
async fn test_nonexistent_route_returns_404() {
    let router = fixture_router().await;
    let (status, _) = get(router, "/api/v1.0/2016-01-01/2017-01-01/extra").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
