//! Integration tests for the PCI passthrough inventory.

mod common;

use common::{addrs, host, MockService};
use ptctl_core::{HostSelector, PassthruError, PassthruManager, PassthruStatus, ServiceError};
use std::sync::Arc;

fn manager(service: &Arc<MockService>, host: Option<&str>) -> PassthruManager {
    PassthruManager::new(service.clone(), HostSelector::new(host.map(str::to_string)))
}

fn two_hosts() -> Vec<ptctl_core::HostSystem> {
    vec![
        host(
            "host-21",
            "esx-01",
            &[
                ("0000:00:1f.0", None),
                ("0000:02:00.0", Some((true, false, false))),
                ("0000:03:00.0", Some((true, true, false))),
                ("0000:04:00.0", Some((true, true, true))),
                ("0000:05:00.0", Some((false, false, false))),
            ],
        ),
        host("host-22", "esx-02", &[("0000:81:00.0", Some((true, true, true)))]),
    ]
}

#[tokio::test]
async fn test_list_single_implied_host() {
    let service = Arc::new(MockService::new(vec![two_hosts().remove(0)]));

    let report = manager(&service, None).list(&[]).await.unwrap();

    assert_eq!(report.hosts.len(), 1);
    assert_eq!(report.hosts[0].name, "esx-01");
    let statuses: Vec<PassthruStatus> = report.rows().iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            PassthruStatus::NotCapable,
            PassthruStatus::Disabled,
            PassthruStatus::Enabled,
            PassthruStatus::Active,
            PassthruStatus::NotCapable,
        ]
    );
    assert_eq!(service.fetch_calls(), 1);
}

#[tokio::test]
async fn test_list_named_hosts_in_one_fetch() {
    let service = Arc::new(MockService::new(two_hosts()));

    let report = manager(&service, None).list(&addrs(&["esx-01", "esx-02"])).await.unwrap();

    assert_eq!(service.fetch_calls(), 1);
    let names: Vec<&str> = report.hosts.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["esx-01", "esx-02"]);
    assert_eq!(report.rows().len(), 6);
    assert_eq!(report.rows()[5].status, PassthruStatus::Active);
}

#[tokio::test]
async fn test_explicit_host_overrides_names() {
    let service = Arc::new(MockService::new(two_hosts()));

    let report = manager(&service, Some("esx-02")).list(&addrs(&["esx-01"])).await.unwrap();

    assert_eq!(report.hosts.len(), 1);
    assert_eq!(report.hosts[0].name, "esx-02");
}

#[tokio::test]
async fn test_no_hosts_yields_empty_report() {
    let service = Arc::new(MockService::new(vec![]));

    let report = manager(&service, None).list(&[]).await.unwrap();

    assert!(report.is_empty());
    assert_eq!(service.fetch_calls(), 0);
}

#[tokio::test]
async fn test_ambiguous_default_yields_empty_report() {
    let service = Arc::new(MockService::new(two_hosts()));

    let report = manager(&service, None).list(&[]).await.unwrap();

    assert!(report.is_empty());
    assert_eq!(service.fetch_calls(), 0);
}

#[tokio::test]
async fn test_unknown_host_name_is_resolution_error() {
    let service = Arc::new(MockService::new(two_hosts()));

    let err = manager(&service, None).list(&addrs(&["esx-99"])).await.unwrap_err();

    assert!(matches!(err, PassthruError::HostResolution { .. }));
}

#[tokio::test]
async fn test_fetch_failure_aborts_listing() {
    let fault = ServiceError::Fault {
        code: "NotAuthenticated".to_string(),
        message: "session expired".to_string(),
    };
    let service = Arc::new(MockService::new(two_hosts()).failing_fetch(fault.clone()));

    let err = manager(&service, None).list(&addrs(&["*"])).await.unwrap_err();

    assert!(matches!(err, PassthruError::RemoteFetch(ref source) if *source == fault));
}

#[tokio::test]
async fn test_list_is_read_only() {
    let service = Arc::new(MockService::new(two_hosts()));

    manager(&service, None).list(&addrs(&["*"])).await.unwrap();

    assert_eq!(service.update_calls(), 0);
}
