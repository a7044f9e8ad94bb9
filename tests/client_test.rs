//! GeoDataClient behavior against a mock server: URL shaping, the response
//! envelope, and the error taxonomy.

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;

use geo_cascade::{AdministrativeLevel, FetchError, GeoDataClient};

use AdministrativeLevel::{Province, Village};

fn client(server: &Server) -> GeoDataClient {
    GeoDataClient::new(&server.url_str("/")).expect("client")
}

#[tokio::test]
async fn fetch_json_unwraps_the_envelope() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/provinsi/31"))
            .respond_with(json_encoded(json!({
                "success": true,
                "data": { "name": "DKI Jakarta" },
            }))),
    );

    let data = client(&server)
        .fetch_json("/provinsi/31", &[])
        .await
        .expect("fetch");
    assert_eq!(data["name"], "DKI Jakarta");
}

#[tokio::test]
async fn non_2xx_status_maps_to_http_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/provinsi/404"))
            .respond_with(status_code(404)),
    );

    let err = client(&server)
        .fetch_json("/provinsi/404", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Http { status: 404 }));
}

#[tokio::test]
async fn non_json_body_maps_to_decode_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/provinsi"))
            .respond_with(status_code(200).body("<html>maintenance</html>")),
    );

    let err = client(&server).fetch_json("/provinsi", &[]).await.unwrap_err();
    assert!(matches!(err, FetchError::Decode(_)));
}

#[tokio::test]
async fn success_false_envelope_maps_to_service_error() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/provinsi"))
            .respond_with(json_encoded(json!({ "success": false, "data": null }))),
    );

    let err = client(&server).fetch_json("/provinsi", &[]).await.unwrap_err();
    assert!(matches!(err, FetchError::Service));
}

#[tokio::test]
async fn unreachable_service_maps_to_transport_error() {
    // Nothing listens on port 1.
    let client = GeoDataClient::new("http://127.0.0.1:1").expect("client");
    let err = client.fetch_json("/provinsi", &[]).await.unwrap_err();
    assert!(matches!(err, FetchError::Transport(_)));
}

#[tokio::test]
async fn list_caps_the_limit_parameter() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/provinsi"),
            request::query(url_decoded(contains(("limit", "100")))),
        ])
        .respond_with(json_encoded(json!({ "success": true, "data": [] }))),
    );

    let rows = client(&server)
        .list(Province, None, 5000, None)
        .await
        .expect("list");
    assert!(rows.is_empty());
}

#[tokio::test]
async fn list_passes_scope_and_search_parameters() {
    let server = Server::run();
    server.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/desa-kelurahan"),
            request::query(url_decoded(contains(("districtCode", "317101")))),
            request::query(url_decoded(contains(("search", "gambir")))),
        ])
        .respond_with(json_encoded(json!({
            "success": true,
            "data": [{ "code": "3171011001", "name": "Gambir" }],
        }))),
    );

    let rows = client(&server)
        .list(Village, Some("317101"), 100, Some("gambir"))
        .await
        .expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Gambir");
}

#[tokio::test]
async fn geo_detail_falls_back_to_the_detail_path_for_deep_levels() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/kecamatan/317101"))
            .respond_with(json_encoded(json!({
                "success": true,
                "data": { "name": "Gambir" },
            }))),
    );

    let detail = client(&server)
        .geo_detail(AdministrativeLevel::District, "317101")
        .await
        .expect("detail");
    assert_eq!(detail.name, "Gambir");
    assert!(detail.coordinate().is_none());
}

#[tokio::test]
async fn base_url_path_prefix_is_preserved() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/api/v1/provinsi"))
            .respond_with(json_encoded(json!({ "success": true, "data": [] }))),
    );

    let client = GeoDataClient::new(&server.url_str("/api/v1")).expect("client");
    let data = client.fetch_json("/provinsi", &[]).await.expect("fetch");
    assert!(data.as_array().unwrap().is_empty());
}
