//! HTTP-level tests for the Sheets client against a mock API server.

use std::sync::Arc;

use serde_json::json;
use sheets::{PlacedValue, SheetRef, SheetsClient, SheetsError, SpreadsheetApi, StaticToken};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SheetsClient {
    SheetsClient::new(Arc::new(StaticToken::new("test-token")))
        .unwrap()
        .with_api_url(format!("{}/v4/spreadsheets", server.uri()))
}

async fn mount_metadata(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sid"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sid",
            "sheets": [
                { "properties": { "sheetId": 0, "title": "Archive", "index": 1 } },
                { "properties": { "sheetId": 123, "title": "Responses", "index": 0 } }
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_get_metadata() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;
    let client = client_for(&server);

    let spreadsheet = client.get_metadata("sid").await.unwrap();
    assert_eq!(spreadsheet.spreadsheet_id, "sid");
    assert_eq!(spreadsheet.sheets.len(), 2);
    assert_eq!(
        sheets::sheet_titles(&client, "sid").await.unwrap(),
        vec!["Responses", "Archive"]
    );
}

#[tokio::test]
async fn test_read_range_stringifies_cells() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sid/values/'Responses'!1:1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "'Responses'!A1:C1",
            "majorDimension": "ROWS",
            "values": [["name", 42, ""]]
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let rows = client.read_range("sid", "'Responses'!1:1").await.unwrap();
    assert_eq!(rows, vec![vec!["name", "42", ""]]);
}

#[tokio::test]
async fn test_read_empty_range() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sid/values/'Responses'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "'Responses'!A1:Z1000",
            "majorDimension": "ROWS"
        })))
        .mount(&server)
        .await;
    let client = client_for(&server);

    assert!(client.read_range("sid", "'Responses'").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_write_row_uses_user_entered() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;

    Mock::given(method("PUT"))
        .and(path("/v4/spreadsheets/sid/values/'Responses'!A4:C4"))
        .and(query_param("valueInputOption", "USER_ENTERED"))
        .and(body_json(json!({
            "range": "'Responses'!A4:C4",
            "majorDimension": "ROWS",
            "values": [["'+79001234567", "", "Да"]]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sid",
            "updatedRange": "'Responses'!A4:C4",
            "updatedRows": 1,
            "updatedColumns": 3,
            "updatedCells": 3
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let sheet = SheetRef::locate(&client, "sid", 123).await.unwrap();
    let written = sheet
        .write_row(
            4,
            &[
                PlacedValue::new(1, "'+79001234567"),
                PlacedValue::new(3, "Да"),
            ],
        )
        .await
        .unwrap();

    assert_eq!(written.range, "'Responses'!A4:C4");
}

#[tokio::test]
async fn test_batch_update_deletes_rows() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;

    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sid/values/'Responses'!A:A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [["keep"], ["drop"], ["keep"], ["drop"]]
        })))
        .mount(&server)
        .await;

    for row in [4_usize, 2] {
        Mock::given(method("POST"))
            .and(path("/v4/spreadsheets/sid:batchUpdate"))
            .and(body_json(json!({
                "requests": [{
                    "deleteDimension": {
                        "range": {
                            "sheetId": 123,
                            "dimension": "ROWS",
                            "startIndex": row - 1,
                            "endIndex": row
                        }
                    }
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "spreadsheetId": "sid",
                "replies": [{}]
            })))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    let sheet = SheetRef::locate(&client, "sid", 123).await.unwrap();
    assert_eq!(sheet.delete_rows_by_value("drop").await.unwrap(), vec![4, 2]);
}

#[tokio::test]
async fn test_not_found_maps_to_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Requested entity was not found."))
        .mount(&server)
        .await;
    let client = client_for(&server);

    let result = client.get_metadata("missing").await;
    assert!(matches!(result, Err(SheetsError::NotFound(_))));
}

#[tokio::test]
async fn test_api_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sid/values/'Responses'"))
        .respond_with(ResponseTemplate::new(403).set_body_string("The caller does not have permission"))
        .mount(&server)
        .await;
    let client = client_for(&server);

    match client.read_range("sid", "'Responses'").await {
        Err(SheetsError::Api { status, message }) => {
            assert_eq!(status, 403);
            assert!(message.contains("permission"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_gid() {
    let server = MockServer::start().await;
    mount_metadata(&server).await;
    let client = client_for(&server);

    let result = SheetRef::locate(&client, "sid", 999).await;
    assert!(matches!(result, Err(SheetsError::NotFound(_))));
}
