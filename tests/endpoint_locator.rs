mod common;
use common::directory_fixture;

use qradar_rest::{find_endpoint, find_service, ClientErrorKind, ServiceDescriptor, ServiceVersion};

#[test]
fn find_service_matches_string_version_against_number() {
    let services = directory_fixture();
    let found = find_service(&services, "inventory", &ServiceVersion::from("2")).expect("service");
    assert_eq!(found.endpoints()[0].path, "/application/v2/items/{id}");
}

#[test]
fn find_service_matches_number_version_against_string() {
    let services = directory_fixture();
    let found = find_service(&services, "inventory", &ServiceVersion::from(1)).expect("service");
    assert_eq!(found.endpoints().len(), 2);

    let health = find_service(&services, "health", &ServiceVersion::from("1.0")).expect("health");
    assert_eq!(health.name, "health");
}

#[test]
fn find_service_compares_versions_as_text() {
    let services = directory_fixture();
    let err = find_service(&services, "health", &ServiceVersion::from(1))
        .expect_err("\"1.0\" is not \"1\"");
    assert_eq!(err.hint.as_deref(), Some("Available versions: 1.0"));
}

#[test]
fn find_service_returns_first_match_in_list_order() {
    let services: Vec<ServiceDescriptor> = serde_json::from_value(serde_json::json!([
        {
            "name": "dup",
            "version": "1",
            "endpoints": [{"name": "a", "http_method": "GET", "path": "/first"}]
        },
        {
            "name": "dup",
            "version": 1,
            "endpoints": [{"name": "a", "http_method": "GET", "path": "/second"}]
        }
    ]))
    .expect("services");
    let found = find_service(&services, "dup", &ServiceVersion::from("1")).expect("service");
    assert_eq!(found.endpoints()[0].path, "/first");
}

#[test]
fn find_service_name_is_case_sensitive() {
    let services = directory_fixture();
    let err = find_service(&services, "Inventory", &ServiceVersion::from("1"))
        .expect_err("strict name match");
    assert_eq!(err.kind, ClientErrorKind::NotFound);
    assert_eq!(err.message, "Service Inventory version 1 not found");
    assert!(err.hint.as_deref().unwrap_or("").contains("inventory"));
}

#[test]
fn find_service_unknown_version_lists_available_versions() {
    let services = directory_fixture();
    let err = find_service(&services, "inventory", &ServiceVersion::from("3"))
        .expect_err("no version 3");
    assert_eq!(err.kind, ClientErrorKind::NotFound);
    assert_eq!(err.hint.as_deref(), Some("Available versions: 1, 2"));
}

#[test]
fn find_service_on_empty_list_is_not_found() {
    let err = find_service(&[], "inventory", &ServiceVersion::from("1")).expect_err("empty");
    assert_eq!(err.kind, ClientErrorKind::NotFound);
    assert!(err.hint.is_none());
}

#[test]
fn find_endpoint_returns_named_endpoint() {
    let services = directory_fixture();
    let service =
        find_service(&services, "inventory", &ServiceVersion::from("1")).expect("service");
    let endpoint = find_endpoint(service, "createItem").expect("endpoint");
    assert_eq!(endpoint.path, "/application/items");
}

#[test]
fn find_endpoint_without_endpoint_list_is_not_found() {
    let services = directory_fixture();
    let health = find_service(&services, "health", &ServiceVersion::from("1.0")).expect("health");
    let err = find_endpoint(health, "status").expect_err("no endpoints");
    assert_eq!(err.kind, ClientErrorKind::NotFound);
    assert_eq!(err.message, "Service endpoint status not found");
}

#[test]
fn find_endpoint_suggests_close_names() {
    let services = directory_fixture();
    let service =
        find_service(&services, "inventory", &ServiceVersion::from("1")).expect("service");
    let err = find_endpoint(service, "getitems").expect_err("typo");
    assert_eq!(err.hint.as_deref(), Some("Did you mean: getItem?"));
}
