use cql_manager::{Manager, ManagerConfig, QueryArgs, Value};
use cql_manager_core::{
    record,
    stmt::{BinaryOp, Expr},
};
use tests::{models, setup, ExecLog};

use pretty_assertions::assert_eq;
use serde_json::{Map, Value as Json};

type Row = Map<String, Json>;

/// Follows continuation tokens from the first page to the last.
async fn list_all(manager: &Manager, mut args: QueryArgs) -> Vec<Row> {
    let mut rows = vec![];

    for _ in 0..1000 {
        let (page_rows, page) = manager.retrieve_list(args).await.unwrap();
        assert!(page_rows.len() as u64 <= page.count);
        rows.extend(page_rows);

        match page.next {
            Some(next) => {
                assert!(!page.next_cursor.is_empty());
                args = QueryArgs::parse(&next);
            }
            None => {
                assert!(page.next_cursor.is_empty());
                return rows;
            }
        }
    }

    panic!("pagination did not terminate");
}

/// Every row in a single page, in scan order.
async fn scan(manager: &Manager, args: QueryArgs) -> Vec<Row> {
    let (rows, page) = manager.retrieve_list(args).await.unwrap();
    assert!(page.is_last());
    rows
}

fn keys(manager: &Manager, rows: &[Row]) -> Vec<Vec<Json>> {
    rows.iter()
        .map(|row| {
            manager
                .model()
                .primary_key_columns()
                .map(|column| row[&column.name].clone())
                .collect()
        })
        .collect()
}

fn with_count(mut args: QueryArgs, count: u64) -> QueryArgs {
    args.insert("count", Value::I64(count as i64));
    args
}

async fn seed_readings(manager: &Manager) {
    for sensor in ["a", "b", "c"] {
        for day in [1i32, 2] {
            for hour in [2i32, 0, 1] {
                for seq in [1i32, 0] {
                    manager
                        .create(record! {
                            "sensor" => sensor,
                            "day" => day,
                            "hour" => hour,
                            "seq" => seq,
                            "value" => (hour * 10 + seq) as f64,
                        })
                        .await
                        .unwrap();
                }
            }
        }
    }
}

async fn seed_events(manager: &Manager) {
    for stream in ["x", "y", "z"] {
        for ts in 0..5i64 {
            manager
                .create(record! { "stream" => stream, "ts" => ts, "body" => format!("{stream}{ts}") })
                .await
                .unwrap();
        }
    }
}

async fn seed_mixed(manager: &Manager) {
    for stream in ["x", "y", "z"] {
        for a in 0..3i32 {
            for b in 0..3i32 {
                for c in 0..2i32 {
                    manager
                        .create(record! {
                            "stream" => stream,
                            "a" => a,
                            "b" => b,
                            "c" => c,
                            "body" => format!("{stream}{a}{b}{c}"),
                        })
                        .await
                        .unwrap();
                }
            }
        }
    }
}

fn clustering(rows: &[Row], columns: &[&str]) -> Vec<Vec<i64>> {
    rows.iter()
        .map(|row| columns.iter().map(|c| row[*c].as_i64().unwrap()).collect())
        .collect()
}

fn has_token(expr: &Expr) -> bool {
    match expr {
        Expr::Token(_) => true,
        Expr::BinaryOp(expr) => has_token(&expr.lhs) || has_token(&expr.rhs),
        Expr::Record(expr) => expr.fields.iter().any(has_token),
        Expr::Column(_) | Expr::Value(_) => false,
    }
}

/// Asserts no select in the log restricts the partition with anything but
/// equality.
fn assert_partition_only_pinned(log: &ExecLog, partition: &[&str]) {
    let selects = log.selects();
    assert!(!selects.is_empty());

    for select in selects {
        for expr in &select.filter {
            assert!(!has_token(expr), "token predicate in {select:?}");

            let Expr::BinaryOp(binary) = expr else {
                panic!("unexpected filter {expr:?}");
            };

            if binary.op != BinaryOp::Eq {
                for name in expr.columns() {
                    assert!(
                        !partition.contains(&name),
                        "range predicate on partition column `{name}` in {select:?}"
                    );
                }
            }
        }
    }
}

#[tokio::test]
async fn pages_visit_every_person_once() {
    let (manager, _log) = setup(models::person(), ManagerConfig::new());

    for i in 0..25i32 {
        manager
            .create(record! { "first_name" => format!("p{i}"), "age" => i })
            .await
            .unwrap();
    }

    let expected = keys(&manager, &scan(&manager, QueryArgs::new()).await);
    assert_eq!(expected.len(), 25);

    for count in [1, 4, 7, 24, 25] {
        let rows = list_all(&manager, with_count(QueryArgs::new(), count)).await;
        assert_eq!(keys(&manager, &rows), expected, "count={count}");
    }
}

#[tokio::test]
async fn pages_visit_every_clustered_row_once() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let expected = keys(&manager, &scan(&manager, QueryArgs::new()).await);
    assert_eq!(expected.len(), 36);

    for count in 1..=7 {
        let rows = list_all(&manager, with_count(QueryArgs::new(), count)).await;
        assert_eq!(keys(&manager, &rows), expected, "count={count}");
    }
}

#[tokio::test]
async fn pages_visit_every_row_with_mixed_clustering_directions() {
    let (manager, _log) = setup(models::mixed(), ManagerConfig::new());
    seed_mixed(&manager).await;

    let expected = keys(&manager, &scan(&manager, QueryArgs::new()).await);
    assert_eq!(expected.len(), 54);

    for count in 1..=7 {
        let rows = list_all(&manager, with_count(QueryArgs::new(), count)).await;
        assert_eq!(keys(&manager, &rows), expected, "count={count}");
    }

    let filters: QueryArgs = [("stream", "y")].into_iter().collect();
    let mut declared: Vec<Vec<i64>> = vec![];
    for a in 0..3 {
        for b in (0..3).rev() {
            for c in (0..2).rev() {
                declared.push(vec![a, b, c]);
            }
        }
    }

    for count in [1, 2, 4, 5] {
        let rows = list_all(&manager, with_count(filters.clone(), count)).await;
        assert_eq!(clustering(&rows, &["a", "b", "c"]), declared, "count={count}");
    }
}

#[tokio::test]
async fn reversed_mixed_clustering_pages_in_reverse() {
    let config = ManagerConfig::new().order_by("-a");
    let (manager, _log) = setup(models::mixed(), config);
    seed_mixed(&manager).await;

    let filters: QueryArgs = [("stream", "x")].into_iter().collect();
    let mut reversed: Vec<Vec<i64>> = vec![];
    for a in (0..3).rev() {
        for b in 0..3 {
            for c in 0..2 {
                reversed.push(vec![a, b, c]);
            }
        }
    }

    for count in [1, 3, 4] {
        let rows = list_all(&manager, with_count(filters.clone(), count)).await;
        assert_eq!(clustering(&rows, &["a", "b", "c"]), reversed, "count={count}");
    }

    let expected = keys(&manager, &scan(&manager, QueryArgs::new()).await);
    let rows = list_all(&manager, with_count(QueryArgs::new(), 5)).await;
    assert_eq!(keys(&manager, &rows), expected);
}

#[tokio::test]
async fn partially_pinned_partition_pages_through_every_match() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let filters: QueryArgs = [("sensor", "a")].into_iter().collect();
    let expected = keys(&manager, &scan(&manager, filters.clone()).await);
    assert_eq!(expected.len(), 12);

    for count in 1..=5 {
        let rows = list_all(&manager, with_count(filters.clone(), count)).await;
        assert!(rows.iter().all(|row| row["sensor"] == "a"));
        assert_eq!(keys(&manager, &rows), expected, "count={count}");
    }

    let filters: QueryArgs = [("sensor", "b"), ("hour", "1")].into_iter().collect();
    let expected = keys(&manager, &scan(&manager, filters.clone()).await);
    assert_eq!(expected.len(), 4);

    for count in 1..=3 {
        let rows = list_all(&manager, with_count(filters.clone(), count)).await;
        assert_eq!(keys(&manager, &rows), expected, "count={count}");
    }
}

#[tokio::test]
async fn page_size_must_leave_room_for_the_lookahead_row() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    for count in ["18446744073709551615", "9223372036854775807"] {
        let args: QueryArgs = [("count", count)].into_iter().collect();
        let err = manager.retrieve_list(args).await.unwrap_err();
        assert!(err.is_validation(), "count={count}");
    }

    let args: QueryArgs = [("count", "9223372036854775806")].into_iter().collect();
    let (rows, page) = manager.retrieve_list(args).await.unwrap();
    assert_eq!(rows.len(), 36);
    assert!(page.is_last());

    let config = ManagerConfig::new().paginate_by(u64::MAX);
    let (manager, _log) = setup(models::reading(), config);
    let err = manager.retrieve_list(QueryArgs::new()).await.unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn pages_within_a_partition_follow_clustering_order() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let filters: QueryArgs = [("sensor", "b"), ("day", "2")].into_iter().collect();
    let rows = list_all(&manager, with_count(filters, 4)).await;

    let clustering: Vec<(i64, i64)> = rows
        .iter()
        .map(|row| (row["hour"].as_i64().unwrap(), row["seq"].as_i64().unwrap()))
        .collect();

    assert_eq!(
        clustering,
        [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)]
    );
    assert!(rows.iter().all(|row| row["sensor"] == "b" && row["day"] == 2));
}

#[tokio::test]
async fn pinned_partition_uses_clustering_bounds_only() {
    let (manager, log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let filters: QueryArgs = [("sensor", "a"), ("day", "1")].into_iter().collect();
    let rows = list_all(&manager, with_count(filters, 2)).await;
    assert_eq!(rows.len(), 6);

    assert_partition_only_pinned(&log, &["sensor", "day"]);

    // Pages after the first carry a clustering bound
    let bounded = log
        .selects()
        .iter()
        .filter(|select| select.filter.len() > 2)
        .count();
    assert_eq!(bounded, 2);
}

#[tokio::test]
async fn pinned_clustering_column_is_skipped_in_bounds() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let filters: QueryArgs = [("sensor", "c"), ("day", "1"), ("hour", "1")]
        .into_iter()
        .collect();
    let rows = list_all(&manager, with_count(filters, 1)).await;

    let seqs: Vec<_> = rows.iter().map(|row| row["seq"].clone()).collect();
    assert_eq!(seqs, [Json::from(0), Json::from(1)]);
}

#[tokio::test]
async fn descending_clustering_pages_in_declared_order() {
    let (manager, _log) = setup(models::event(), ManagerConfig::new());
    seed_events(&manager).await;

    let expected = keys(&manager, &scan(&manager, QueryArgs::new()).await);

    for count in [1, 2, 4] {
        let rows = list_all(&manager, with_count(QueryArgs::new(), count)).await;
        assert_eq!(keys(&manager, &rows), expected, "count={count}");
    }

    let filters: QueryArgs = [("stream", "y")].into_iter().collect();
    let rows = list_all(&manager, with_count(filters, 2)).await;
    let ts: Vec<_> = rows.iter().map(|row| row["ts"].as_i64().unwrap()).collect();
    assert_eq!(ts, [4, 3, 2, 1, 0]);
}

#[tokio::test]
async fn reversed_order_pages_in_reverse() {
    let config = ManagerConfig::new().order_by("ts");
    let (manager, _log) = setup(models::event(), config);
    seed_events(&manager).await;

    let filters: QueryArgs = [("stream", "z")].into_iter().collect();
    let rows = list_all(&manager, with_count(filters, 2)).await;
    let ts: Vec<_> = rows.iter().map(|row| row["ts"].as_i64().unwrap()).collect();
    assert_eq!(ts, [0, 1, 2, 3, 4]);

    let expected = keys(&manager, &scan(&manager, QueryArgs::new()).await);
    let rows = list_all(&manager, with_count(QueryArgs::new(), 3)).await;
    assert_eq!(keys(&manager, &rows), expected);
}

#[tokio::test]
async fn first_page_cursor_is_the_next_record() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let all = scan(&manager, QueryArgs::new()).await;

    let (rows, page) = manager
        .retrieve_list(with_count(QueryArgs::new(), 5))
        .await
        .unwrap();

    assert_eq!(rows, all[..5].to_vec());
    assert_eq!(page.count, 5);

    let cursor: Vec<Json> = page.next_cursor.iter().map(Value::to_json).collect();
    assert_eq!(cursor, keys(&manager, &all[5..6])[0]);

    let next = page.next.unwrap();
    assert!(next.starts_with("count=5&page="));
}

#[tokio::test]
async fn last_page_has_no_continuation() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let (rows, page) = manager
        .retrieve_list(with_count(QueryArgs::new(), 36))
        .await
        .unwrap();

    assert_eq!(rows.len(), 36);
    assert!(page.is_last());
    assert_eq!(page.next, None);
    assert!(page.next_cursor.is_empty());
}

#[tokio::test]
async fn continuation_token_keeps_filters() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let filters: QueryArgs = [("sensor", "a"), ("day", "2")].into_iter().collect();
    let (_, page) = manager.retrieve_list(with_count(filters, 4)).await.unwrap();

    assert_eq!(
        page.next.unwrap(),
        "count=4&sensor=a&day=2&page=a&page=2&page=2&page=0"
    );
}

#[tokio::test]
async fn page_size_defaults_to_configuration() {
    let config = ManagerConfig::new().paginate_by(3);
    let (manager, _log) = setup(models::reading(), config);
    seed_readings(&manager).await;

    let (rows, page) = manager.retrieve_list(QueryArgs::new()).await.unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(page.count, 3);
}

#[tokio::test]
async fn invalid_page_size_is_rejected() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());

    for count in ["0", "-1", "ten"] {
        let args: QueryArgs = [("count", count)].into_iter().collect();
        let err = manager.retrieve_list(args).await.unwrap_err();
        assert!(err.is_validation(), "count={count}");
    }
}

#[tokio::test]
async fn next_argument_is_ignored() {
    let (manager, _log) = setup(models::reading(), ManagerConfig::new());
    seed_readings(&manager).await;

    let args: QueryArgs = [("count", "2"), ("next", "whatever")].into_iter().collect();
    let (rows, _) = manager.retrieve_list(args).await.unwrap();
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn list_projects_listable_fields() {
    let config = ManagerConfig::new().list_fields(["sensor", "value"]);
    let (manager, _log) = setup(models::reading(), config);
    seed_readings(&manager).await;

    let (rows, _) = manager
        .retrieve_list(with_count(QueryArgs::new(), 2))
        .await
        .unwrap();

    for row in rows {
        let names: Vec<_> = row.keys().map(String::as_str).collect();
        assert_eq!(names, ["sensor", "value"]);
    }
}
