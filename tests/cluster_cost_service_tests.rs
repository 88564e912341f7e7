// Aggregation tests against a scripted metrics backend

mod common;

use std::sync::Arc;

use clustercost_core::domain::cluster_cost::totals::{CostDimension, Totals};
use clustercost_core::errors::CostModelError;
use common::{matrix, pair, service, vector, ScriptedBackend};

#[tokio::test]
async fn per_cluster_costs_are_keyed_by_cluster_label() {
    let backend = Arc::new(ScriptedBackend::new().respond(
        CostDimension::Cores,
        vector(&[(Some("A"), 100.0, "5.0"), (Some("B"), 100.0, "7.0")]),
    ));

    let totals = service(backend, "local")
        .cluster_costs_for_all_clusters("1h", "")
        .await
        .unwrap();

    assert_eq!(totals.len(), 2);
    assert_eq!(
        totals["A"],
        Totals {
            cpu_cost: vec![pair("100.000000", "5.000000")],
            ..Default::default()
        }
    );
    assert_eq!(
        totals["B"],
        Totals {
            cpu_cost: vec![pair("100.000000", "7.000000")],
            ..Default::default()
        }
    );
}

#[tokio::test]
async fn per_cluster_costs_merge_dimensions_and_default_cluster() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .respond(
                CostDimension::Cores,
                vector(&[(Some("A"), 100.0, "5.0"), (Some(""), 100.0, "1.0")]),
            )
            .respond(CostDimension::Memory, vector(&[(Some("A"), 100.0, "2.5")]))
            .respond(CostDimension::Storage, vector(&[(None, 100.0, "0.75")])),
    );

    let totals = service(backend, "local")
        .cluster_costs_for_all_clusters("1h", "")
        .await
        .unwrap();

    assert_eq!(totals.len(), 2);
    assert!(!totals.contains_key(""));
    assert_eq!(totals["A"].cpu_cost, vec![pair("100.000000", "5.000000")]);
    assert_eq!(totals["A"].mem_cost, vec![pair("100.000000", "2.500000")]);
    assert!(totals["A"].storage_cost.is_empty());
    assert_eq!(totals["local"].cpu_cost, vec![pair("100.000000", "1.000000")]);
    assert_eq!(totals["local"].storage_cost, vec![pair("100.000000", "0.750000")]);
    assert!(totals["local"].mem_cost.is_empty());
}

#[tokio::test]
async fn per_cluster_snapshot_keeps_one_value_when_series_share_a_cluster() {
    let backend = Arc::new(ScriptedBackend::new().respond(
        CostDimension::Cores,
        vector(&[(Some(""), 100.0, "5.0"), (Some("local"), 100.0, "7.0")]),
    ));

    let totals = service(backend, "local")
        .cluster_costs_for_all_clusters("1h", "")
        .await
        .unwrap();

    assert_eq!(totals.len(), 1);
    assert_eq!(totals["local"].cpu_cost, vec![pair("100.000000", "5.000000")]);
}

#[tokio::test]
async fn per_cluster_costs_skip_series_without_samples() {
    let cores = serde_json::json!({
        "status": "success",
        "data": {
            "resultType": "matrix",
            "result": [
                { "metric": { "cluster_id": "A" }, "values": [] },
                { "metric": { "cluster_id": "B" }, "values": [[100, "3"]] }
            ]
        }
    });
    let backend = Arc::new(ScriptedBackend::new().respond(CostDimension::Cores, cores));

    let totals = service(backend, "")
        .cluster_costs_for_all_clusters("1h", "")
        .await
        .unwrap();

    assert!(!totals.contains_key("A"));
    assert_eq!(totals["B"].cpu_cost, vec![pair("100.000000", "3.000000")]);
}

#[tokio::test]
async fn per_cluster_costs_are_idempotent() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .respond(
                CostDimension::Cores,
                vector(&[(Some("b"), 1.5, "0.1"), (Some("a"), 1.5, "0.2")]),
            )
            .respond(CostDimension::Memory, vector(&[(Some("a"), 1.5, "0.3")])),
    );
    let svc = service(backend, "");

    let first = svc.cluster_costs_for_all_clusters("1h", "").await.unwrap();
    let second = svc.cluster_costs_for_all_clusters("1h", "").await.unwrap();

    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn single_cluster_costs_take_first_value_of_each_dimension() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .respond(CostDimension::Cores, vector(&[(Some("remote"), 10.0, "4")]))
            .respond(CostDimension::Memory, vector(&[(None, 10.0, "2")]))
            .respond(CostDimension::Storage, vector(&[(None, 10.0, "1")]))
            .respond(CostDimension::Total, vector(&[(None, 10.0, "7")])),
    );

    let totals = service(backend.clone(), "local")
        .cluster_costs("1h", "")
        .await
        .unwrap();

    assert_eq!(
        totals,
        Totals {
            total_cost: vec![pair("10.000000", "7.000000")],
            cpu_cost: vec![pair("10.000000", "4.000000")],
            mem_cost: vec![pair("10.000000", "2.000000")],
            storage_cost: vec![pair("10.000000", "1.000000")],
        }
    );
    assert_eq!(backend.calls(), 4);
}

#[tokio::test]
async fn single_cluster_costs_without_data_fail() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .respond(CostDimension::Cores, vector(&[(None, 10.0, "4")]))
            .respond(CostDimension::Memory, vector(&[(None, 10.0, "2")]))
            .respond(CostDimension::Total, vector(&[(None, 10.0, "7")])),
    );

    let err = service(backend, "").cluster_costs("1h", "").await.unwrap_err();
    assert!(matches!(
        err,
        CostModelError::NoData {
            dimension: CostDimension::Storage
        }
    ));
}

#[tokio::test]
async fn any_failing_dimension_aborts_the_call() {
    let backend = Arc::new(
        ScriptedBackend::new()
            .respond(CostDimension::Cores, vector(&[(Some("A"), 1.0, "1")]))
            .fail(CostDimension::Memory, "backend unavailable"),
    );

    let err = service(backend, "")
        .cluster_costs_for_all_clusters("1h", "")
        .await
        .unwrap_err();

    match err {
        CostModelError::Execution { query, source } => {
            assert!(query.contains("kube_node_status_capacity_memory_bytes"));
            assert!(source.to_string().contains("backend unavailable"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn offset_is_rewritten_into_every_query() {
    let backend = Arc::new(
        ScriptedBackend::new().respond(CostDimension::Cores, vector(&[(Some("A"), 1.0, "1")])),
    );

    service(backend.clone(), "")
        .cluster_costs_for_all_clusters("2h", "1d")
        .await
        .unwrap();

    let queries = backend.queries();
    assert_eq!(queries.len(), 3);
    for query in queries {
        assert!(query.contains("[2h] offset 1d)"), "missing offset in {query}");
    }
}

#[tokio::test]
async fn costs_over_time_keep_backend_order() {
    let samples: &[(f64, &str)] = &[(100.0, "1"), (200.0, "2"), (300.0, "3")];
    let backend = Arc::new(
        ScriptedBackend::new()
            .respond(CostDimension::Cores, matrix(&[(None, samples)]))
            .respond(CostDimension::Memory, matrix(&[(None, samples)]))
            .respond(CostDimension::Storage, matrix(&[(None, samples)]))
            .respond(CostDimension::Total, matrix(&[(None, samples)])),
    );

    let totals = service(backend, "")
        .cluster_costs_over_time(
            "2024-01-01T00:00:00.000Z",
            "2024-01-01T03:00:00.000Z",
            "1h",
            "",
        )
        .await
        .unwrap();

    let expected = vec![
        pair("100.000000", "1.000000"),
        pair("200.000000", "2.000000"),
        pair("300.000000", "3.000000"),
    ];
    assert_eq!(totals.cpu_cost, expected);
    assert_eq!(totals.mem_cost, expected);
    assert_eq!(totals.storage_cost, expected);
    assert_eq!(totals.total_cost, expected);
}

#[tokio::test]
async fn malformed_range_bounds_fail_before_querying() {
    let backend = Arc::new(ScriptedBackend::new());
    let svc = service(backend.clone(), "");

    let err = svc
        .cluster_costs_over_time("01/01/2024", "2024-01-01T03:00:00.000Z", "1h", "")
        .await
        .unwrap_err();
    assert!(matches!(err, CostModelError::TimeParse { field: "start", .. }));

    let err = svc
        .cluster_costs_over_time(
            "2024-01-01T00:00:00.000Z",
            "2024-01-01T03:00:00.000Z",
            "hourly",
            "",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CostModelError::TimeParse { field: "window", .. }));

    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn costs_over_time_without_series_fail() {
    let backend = Arc::new(ScriptedBackend::new());

    let err = service(backend, "")
        .cluster_costs_over_time(
            "2024-01-01T00:00:00.000Z",
            "2024-01-01T03:00:00.000Z",
            "1h",
            "",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CostModelError::NoData { .. }));
}

#[tokio::test]
async fn costs_over_time_with_only_empty_series_fail() {
    let empty: &[(f64, &str)] = &[];
    let backend = Arc::new(
        ScriptedBackend::new().respond(CostDimension::Cores, matrix(&[(Some("A"), empty)])),
    );

    let err = service(backend, "")
        .cluster_costs_over_time(
            "2024-01-01T00:00:00.000Z",
            "2024-01-01T03:00:00.000Z",
            "1h",
            "",
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CostModelError::NoData {
            dimension: CostDimension::Cores
        }
    ));
}
