//! Cursor pagination over token-ordered partitions.
//!
//! A page is fetched with `limit = count + 1`. When the extra row comes
//! back, it is dropped from the page and its primary key becomes the cursor:
//! the next request starts *at* that row, so range bounds built from a
//! cursor are inclusive.
//!
//! Partitions are not ordered by key value, only by the token of their
//! partition key, so the cursor's partition is located with a `token(...)`
//! bound. Within a partition, rows follow the clustering order and the
//! cursor's clustering values bound the clustering columns that are not
//! pinned by an equality filter. Unless the whole partition key is pinned,
//! the cursor's partition is finished first and the partitions after it on
//! the ring are read next, each step as its own select.

use crate::{ManagerConfig, PageDescriptor, QueryArgs};

use cql_manager_core::{
    driver::{operation::Select, Driver},
    schema::{Column, Model},
    stmt::{Direction, Expr, OrderByExpr, Record, Value},
    Error, Result,
};
use cql_manager_cql::Serializer;

/// The selects serving one page, run in order until `count + 1` rows are
/// collected.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub segments: Vec<Select>,
}

/// Translates list requests into bounded query plans and result sets into
/// pages.
#[derive(Debug, Clone, Copy)]
pub struct PagedQueryTranslator<'a> {
    model: &'a Model,
    config: &'a ManagerConfig,
}

impl<'a> PagedQueryTranslator<'a> {
    pub fn new(model: &'a Model, config: &'a ManagerConfig) -> Self {
        Self { model, config }
    }

    /// Removes the page size argument from `args` and returns it, or the
    /// configured default when absent.
    ///
    /// A page size must be positive and leave room for the extra row, so it
    /// is capped below `i64::MAX`.
    pub fn get_pagination_count(&self, args: &mut QueryArgs) -> Result<u64> {
        let (count, src) = match args.remove(&self.config.pagination_count_query_arg) {
            Some(value) => (parse_page_size(&value), value.to_string()),
            None => (
                Some(self.config.paginate_by),
                self.config.paginate_by.to_string(),
            ),
        };

        match count {
            Some(count) if count > 0 && count < i64::MAX as u64 => Ok(count),
            _ => Err(Error::invalid_page_size(src)),
        }
    }

    /// Removes the cursor arguments from `args` and returns them in order.
    pub fn get_pagination_pks(&self, args: &mut QueryArgs) -> Vec<Value> {
        args.remove(&self.config.pagination_pk_query_arg)
            .map(Value::into_items)
            .unwrap_or_default()
    }

    /// Builds the plan fetching `count + 1` rows starting at `cursor`.
    ///
    /// `filters` holds only domain filters; each becomes an equality
    /// predicate.
    pub fn pagination_filtration(
        &self,
        filters: &QueryArgs,
        cursor: &[Value],
        count: u64,
    ) -> Result<QueryPlan> {
        let limit = count
            .checked_add(1)
            .ok_or_else(|| Error::invalid_page_size(count.to_string()))?;

        let mut base = Select::new()
            .allow_filtering(self.config.allow_filtering)
            .limit(limit);

        for (name, value) in filters {
            let column = self.model.expect_column(name)?;
            base = base.filter_eq(name, value.clone().cast(&column.ty)?);
        }

        if let Some(order_by) = self.order_by() {
            base = base.order_by(order_by);
        }

        if cursor.is_empty() {
            return Ok(QueryPlan {
                segments: vec![base],
            });
        }

        let partition: Vec<&Column> = self.model.partition_key_columns().collect();

        if cursor.len() < partition.len() {
            return Err(Error::invalid_statement(format!(
                "cursor has {} values but the partition key of `{}` has {} columns",
                cursor.len(),
                self.model.name,
                partition.len()
            )));
        }

        let (partition_cursor, clustering_cursor) = cursor.split_at(partition.len());
        let partition_cursor = partition
            .iter()
            .zip(partition_cursor)
            .map(|(column, value)| value.clone().cast(&column.ty))
            .collect::<Result<Vec<_>>>()?;

        let clustering_bounds = self.clustering_bounds(filters, clustering_cursor)?;

        // Partition fully pinned: only the clustering bounds apply
        if partition.iter().all(|column| filters.contains(&column.name)) {
            if clustering_bounds.is_empty() {
                return Ok(QueryPlan {
                    segments: vec![base],
                });
            }

            return Ok(QueryPlan {
                segments: clustering_bounds
                    .into_iter()
                    .map(|bound| with_bound(base.clone(), bound))
                    .collect(),
            });
        }

        let token = || Expr::token(partition.iter().map(|column| Expr::column(&column.name)));
        let cursor_token = || Expr::token(partition_cursor.iter().cloned());

        if clustering_bounds.is_empty() {
            return Ok(QueryPlan {
                segments: vec![base.filter(Expr::ge(token(), cursor_token()))],
            });
        }

        // The clustering bounds only hold in the cursor's partition. Finish
        // that partition first, then continue with the partitions after it.
        let mut boundary = base.clone();
        for (column, value) in partition.iter().zip(&partition_cursor) {
            if !filters.contains(&column.name) {
                boundary = boundary.filter_eq(&column.name, value.clone());
            }
        }

        let mut segments: Vec<Select> = clustering_bounds
            .into_iter()
            .map(|bound| with_bound(boundary.clone(), bound))
            .collect();
        segments.push(base.filter(Expr::gt(token(), cursor_token())));

        Ok(QueryPlan { segments })
    }

    /// Builds the continuation token and cursor for the page ending before
    /// `last`.
    ///
    /// The token is `count=N`, then each filter, then one `page=value` per
    /// primary key column of `last`. Without a boundary record the token
    /// still carries the page size and filters, and the cursor is empty.
    pub fn get_next_query_args(
        &self,
        last: Option<&Record>,
        count: u64,
        filters: &QueryArgs,
    ) -> Result<(String, Vec<Value>)> {
        let count = i64::try_from(count).map_err(|_| Error::invalid_page_size(count.to_string()))?;

        let mut args = QueryArgs::new();
        args.insert(&self.config.pagination_count_query_arg, Value::I64(count));

        for (name, value) in filters {
            args.insert(name, value.clone());
        }

        let cursor = match last {
            Some(last) => self.model.key_of(last)?,
            None => vec![],
        };

        let mut token = args.to_string();
        for value in &cursor {
            token.push('&');
            token.push_str(&self.config.pagination_pk_query_arg);
            token.push('=');
            token.push_str(&value.to_string());
        }

        Ok((token, cursor))
    }

    /// Runs a list request: splits off the pagination controls, executes
    /// the plan and truncates the result into a page.
    pub async fn paginate(
        &self,
        driver: &dyn Driver,
        mut args: QueryArgs,
    ) -> Result<(Vec<Record>, PageDescriptor)> {
        let count = self.get_pagination_count(&mut args)?;
        let cursor = self.get_pagination_pks(&mut args);
        args.remove(&self.config.pagination_next);

        let plan = self.pagination_filtration(&args, &cursor, count)?;

        let wanted = count + 1;
        let mut rows = vec![];

        for mut segment in plan.segments {
            let missing = wanted.saturating_sub(rows.len() as u64);
            if missing == 0 {
                break;
            }

            segment.limit = Some(missing);

            if log::log_enabled!(log::Level::Debug) {
                let mut params = vec![];
                let op = segment.clone().into();
                let cql = Serializer::new(self.model).serialize(&op, &mut params);
                log::debug!("list segment; cql={cql}; params={params:?}");
            }

            rows.extend(driver.exec(self.model, segment.into()).await?.into_values()?);
        }

        let last = if rows.len() as u64 > count {
            rows.truncate(count as usize + 1);
            rows.pop()
        } else {
            None
        };

        let page = match last {
            Some(last) => {
                let (next, next_cursor) = self.get_next_query_args(Some(&last), count, &args)?;
                PageDescriptor {
                    count,
                    next_cursor,
                    next: Some(next),
                }
            }
            None => PageDescriptor {
                count,
                next_cursor: vec![],
                next: None,
            },
        };

        Ok((rows, page))
    }

    /// The configured clustering order, if any.
    fn order_by(&self) -> Option<OrderByExpr> {
        self.config.order_by.as_deref().map(OrderByExpr::parse)
    }

    /// True when the configured order runs against the declared clustering
    /// order, which reverses every clustering column.
    fn is_reversed(&self) -> bool {
        self.order_by().is_some_and(|order_by| {
            self.model
                .clustering_direction(&order_by.column)
                .is_some_and(|direction| direction != order_by.direction)
        })
    }

    /// Range bounds on the clustering columns selecting the cursor row and
    /// the rows after it, one conjunction per segment in scan order.
    ///
    /// Columns pinned by a filter are skipped and the rest are grouped into
    /// runs scanning in the same direction. The last run gets an inclusive
    /// bound with every earlier run held at the cursor's values; walking
    /// back, each earlier run gets a strict bound. A clustering key scanning
    /// in one direction yields a single inclusive bound. Cursor values beyond
    /// the clustering key are ignored.
    fn clustering_bounds(&self, filters: &QueryArgs, cursor: &[Value]) -> Result<Vec<Vec<Expr>>> {
        let reversed = self.is_reversed();
        let mut runs: Vec<ClusteringRun> = vec![];

        for ((column, direction), value) in self.model.clustering_key_columns().zip(cursor) {
            if filters.contains(&column.name) {
                continue;
            }

            let direction = if reversed {
                direction.reverse()
            } else {
                direction
            };
            let value = value.clone().cast(&column.ty)?;

            match runs.last_mut() {
                Some(run) if run.direction == direction => run.push(column, value),
                _ => {
                    let mut run = ClusteringRun::new(direction);
                    run.push(column, value);
                    runs.push(run);
                }
            }
        }

        let mut bounds = vec![];
        for depth in (0..runs.len()).rev() {
            let mut bound: Vec<Expr> = runs[..depth].iter().flat_map(ClusteringRun::eq).collect();
            bound.push(runs[depth].range(depth + 1 == runs.len()));
            bounds.push(bound);
        }

        Ok(bounds)
    }
}

/// Consecutive free clustering columns scanning in the same direction,
/// with the cursor's values for them.
#[derive(Debug)]
struct ClusteringRun {
    direction: Direction,
    columns: Vec<String>,
    values: Vec<Value>,
}

impl ClusteringRun {
    fn new(direction: Direction) -> Self {
        Self {
            direction,
            columns: vec![],
            values: vec![],
        }
    }

    fn push(&mut self, column: &Column, value: Value) {
        self.columns.push(column.name.clone());
        self.values.push(value);
    }

    /// Holds every column of the run at the cursor's value.
    fn eq(&self) -> Vec<Expr> {
        self.columns
            .iter()
            .zip(&self.values)
            .map(|(column, value)| Expr::eq(Expr::column(column), value.clone()))
            .collect()
    }

    /// Compares the run against the cursor in scan order. A run of several
    /// columns compares as a tuple.
    fn range(&self, inclusive: bool) -> Expr {
        let (lhs, rhs) = match (&self.columns[..], &self.values[..]) {
            ([column], [value]) => (Expr::column(column), Expr::from(value.clone())),
            (columns, values) => (
                Expr::record(columns.iter().map(Expr::column)),
                Expr::record(values.iter().cloned()),
            ),
        };

        match (self.direction, inclusive) {
            (Direction::Asc, true) => Expr::ge(lhs, rhs),
            (Direction::Asc, false) => Expr::gt(lhs, rhs),
            (Direction::Desc, true) => Expr::le(lhs, rhs),
            (Direction::Desc, false) => Expr::lt(lhs, rhs),
        }
    }
}

fn parse_page_size(value: &Value) -> Option<u64> {
    match value {
        Value::I32(_) | Value::I64(_) => value.as_i64().and_then(|n| u64::try_from(n).ok()),
        Value::String(src) => src.trim().parse().ok(),
        _ => None,
    }
}

fn with_bound(select: Select, bound: Vec<Expr>) -> Select {
    bound.into_iter().fold(select, Select::filter)
}
