//! FILENAME: core/pivot-engine/src/engine.rs
//! Report Engine - Filters tables and computes grouped sums.
//!
//! Every function here is pure: inputs are borrowed, outputs are new values.
//! An empty table flows through every function and yields empty results.

use crate::definition::{FilterCriteria, GroupBy, ReportDefinition, SortPolicy};
use crate::view::{AggregateGroup, ReportView, Totals};
use chrono::NaiveDate;
use ::engine::{Column, MonthKey, Record, Table};
use rustc_hash::{FxHashMap, FxHashSet};

/// Label of the group collecting rows whose category is null.
pub const EMPTY_GROUP_LABEL: &str = "(vazio)";

// ============================================================================
// FILTERING
// ============================================================================

/// True when the record passes all three predicates of `criteria`.
pub fn matches(record: &Record, criteria: &FilterCriteria) -> bool {
    matches_client(record, &criteria.client)
        && matches_any(record.responsavel_comercial.as_deref(), &criteria.owners)
        && matches_any(record.situacao.as_deref(), &criteria.statuses)
}

fn matches_client(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    let needle = needle.to_lowercase();
    record
        .cliente
        .as_deref()
        .map(|client| client.to_lowercase().contains(&needle))
        .unwrap_or(false)
}

fn matches_any(value: Option<&str>, accepted: &[String]) -> bool {
    if accepted.is_empty() {
        return true;
    }
    value.map(|v| accepted.iter().any(|a| a == v)).unwrap_or(false)
}

/// Rows of `table` that pass `criteria`, in their original order.
pub fn filter(table: &Table, criteria: &FilterCriteria) -> Table {
    if criteria.is_empty() {
        return table.clone();
    }
    table
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect()
}

/// Rows whose date column holds a valid date.
pub fn drop_missing_dates(table: &Table, column: Column) -> Table {
    table
        .iter()
        .filter(|record| record.date(column).is_some())
        .cloned()
        .collect()
}

/// Rows whose date column falls in one of the `MM/YYYY` labels in `selected`.
/// Rows without a date never match.
pub fn filter_months(table: &Table, column: Column, selected: &[String]) -> Table {
    table
        .iter()
        .filter(|record| {
            record
                .date(column)
                .map(|d| {
                    let label = MonthKey::of(&d).label();
                    selected.iter().any(|s| *s == label)
                })
                .unwrap_or(false)
        })
        .cloned()
        .collect()
}

// ============================================================================
// OPTION LISTS
// ============================================================================

/// Distinct non-null values of a text column, in first-seen order.
/// Nulls are left out of the option list, never out of the rows.
pub fn option_values(table: &Table, column: Column) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut options = Vec::new();
    for record in table {
        if let Some(value) = record.text(column) {
            if seen.insert(value) {
                options.push(value.to_string());
            }
        }
    }
    options
}

/// Distinct `MM/YYYY` labels of a date column, in first-seen order.
pub fn month_options(table: &Table, column: Column) -> Vec<String> {
    let mut seen: FxHashSet<MonthKey> = FxHashSet::default();
    let mut options = Vec::new();
    for record in table {
        if let Some(date) = record.date(column) {
            let key = MonthKey::of(&date);
            if seen.insert(key) {
                options.push(key.label());
            }
        }
    }
    options
}

/// Months preselected in the month filter: every option whose `MM/YYYY`
/// string compares `>=` the current month as a plain string.
///
/// The comparison is lexicographic, not chronological: with `today` in
/// 12/2025, "01/2026" sorts before "12/2025" and is not preselected.
pub fn default_month_selection(options: &[String], today: NaiveDate) -> Vec<String> {
    let current = MonthKey::of(&today).label();
    options
        .iter()
        .filter(|option| option.as_str() >= current.as_str())
        .cloned()
        .collect()
}

// ============================================================================
// AGGREGATION
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum GroupKey {
    Text(Option<String>),
    Month(MonthKey),
}

impl GroupKey {
    fn label(&self) -> String {
        match self {
            GroupKey::Text(Some(s)) => s.clone(),
            GroupKey::Text(None) => EMPTY_GROUP_LABEL.to_string(),
            GroupKey::Month(m) => m.label(),
        }
    }
}

fn group_key(record: &Record, group_by: GroupBy) -> Option<GroupKey> {
    match group_by {
        GroupBy::Column(c) => Some(GroupKey::Text(record.value(c).into_text())),
        GroupBy::Month(c) => record.date(c).map(|d| GroupKey::Month(MonthKey::of(&d))),
    }
}

/// Group, sum, order and truncate as configured by `definition`.
pub fn aggregate(table: &Table, definition: &ReportDefinition) -> ReportView {
    let mut index: FxHashMap<GroupKey, usize> = FxHashMap::default();
    let mut groups: Vec<(GroupKey, AggregateGroup)> = Vec::new();

    for record in table {
        let key = match group_key(record, definition.group_by) {
            Some(key) => key,
            None => continue,
        };
        let value = record.number(definition.value_column).unwrap_or(0.0);

        let slot = match index.get(&key) {
            Some(slot) => *slot,
            None => {
                groups.push((key.clone(), AggregateGroup::new(key.label(), 0.0)));
                index.insert(key, groups.len() - 1);
                groups.len() - 1
            }
        };
        let group = &mut groups[slot].1;
        group.total += value;
        group.row_count += 1;
    }

    // Both sorts are stable, so ties keep first-seen order
    match definition.sort {
        SortPolicy::ValueDescending => groups.sort_by(|a, b| b.1.total.total_cmp(&a.1.total)),
        SortPolicy::KeyAscending => groups.sort_by(|a, b| a.0.cmp(&b.0)),
    }

    let mut omitted_groups = 0;
    if let Some(limit) = definition.limit {
        omitted_groups = groups.len().saturating_sub(limit);
        groups.truncate(limit);
    }

    ReportView {
        groups: groups.into_iter().map(|(_, group)| group).collect(),
        omitted_groups,
        ..ReportView::empty(definition)
    }
}

/// Sum `value_column` per value of `group_column`, largest first.
pub fn aggregate_by(table: &Table, group_column: Column, value_column: Column) -> Vec<AggregateGroup> {
    let definition = ReportDefinition {
        value_column,
        ..ReportDefinition::new(group_column.header(), GroupBy::Column(group_column))
    };
    aggregate(table, &definition).groups
}

/// Gross and net value sums of the table.
pub fn totals(table: &Table) -> Totals {
    Totals {
        gross: table.sum(Column::ValorBruto),
        net: table.sum(Column::ValorLiquido),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn record(client: &str, owner: Option<&str>, status: Option<&str>, net: f64) -> Record {
        Record {
            cliente: Some(client.to_string()),
            responsavel_comercial: owner.map(str::to_string),
            situacao: status.map(str::to_string),
            valor_liquido: Some(net),
            ..Default::default()
        }
    }

    fn dated(year: i32, month: u32, net: f64) -> Record {
        Record {
            valor_liquido: Some(net),
            data_oficial_faturamento: NaiveDate::from_ymd_opt(year, month, 10)
                .map(|d| d.and_time(NaiveTime::MIN)),
            ..Default::default()
        }
    }

    fn sample() -> Table {
        Table::from_records(vec![
            record("ACME Ltda", Some("Ana"), Some("Aberto"), 100.0),
            record("Fundição Acme", Some("Bruno"), Some("Fechado"), 200.0),
            record("Metal Sul", Some("Ana"), None, 300.0),
            Record {
                cliente: None,
                valor_liquido: Some(50.0),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let table = sample();
        assert_eq!(filter(&table, &FilterCriteria::default()), table);
    }

    #[test]
    fn test_client_filter_is_case_insensitive_substring() {
        let table = sample();
        let criteria = FilterCriteria::new().with_client("aCmE");
        let filtered = filter(&table, &criteria);
        assert_eq!(filtered.len(), 2);
        for r in &table {
            let included = filtered.records.contains(r);
            let contains = r
                .cliente
                .as_deref()
                .map(|c| c.to_lowercase().contains("acme"))
                .unwrap_or(false);
            assert_eq!(included, contains);
        }
    }

    #[test]
    fn test_client_filter_is_not_a_pattern() {
        let table = Table::from_records(vec![record("A.C", None, None, 1.0), record("ABC", None, None, 1.0)]);
        let filtered = filter(&table, &FilterCriteria::new().with_client("a.c"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records[0].cliente.as_deref(), Some("A.C"));
    }

    #[test]
    fn test_membership_filters_and_combination() {
        let table = sample();
        let by_owner = filter(&table, &FilterCriteria::new().with_owners(["Ana"]));
        assert_eq!(by_owner.len(), 2);

        let both = filter(
            &table,
            &FilterCriteria::new().with_owners(["Ana"]).with_statuses(["Aberto"]),
        );
        assert_eq!(both.len(), 1);
        assert_eq!(both.records[0].cliente.as_deref(), Some("ACME Ltda"));

        // Null statuses never match a non-empty selection
        let closed = filter(&table, &FilterCriteria::new().with_statuses(["Fechado", "Aberto"]));
        assert_eq!(closed.len(), 2);
    }

    #[test]
    fn test_filter_does_not_touch_input() {
        let table = sample();
        let before = table.clone();
        let _ = filter(&table, &FilterCriteria::new().with_client("metal"));
        assert_eq!(table, before);
    }

    #[test]
    fn test_status_tie_keeps_first_seen_order() {
        let table = Table::from_records(vec![
            record("a", None, Some("Open"), 100.0),
            record("b", None, Some("Open"), 200.0),
            record("c", None, Some("Closed"), 300.0),
        ]);
        let view = aggregate(&table, &ReportDefinition::by_status());
        assert_eq!(
            view.pairs(),
            vec![("Open".to_string(), 300.0), ("Closed".to_string(), 300.0)]
        );
    }

    #[test]
    fn test_group_sums_are_exact_and_complete() {
        let table = sample();
        let view = aggregate(&table, &ReportDefinition::by_status());
        assert_eq!(view.total(), table.sum(Column::ValorLiquido));
        let empty = view.groups.iter().find(|g| g.label == EMPTY_GROUP_LABEL).unwrap();
        assert_eq!(empty.total, 350.0);
        assert_eq!(empty.row_count, 2);
    }

    #[test]
    fn test_client_report_keeps_top_twenty() {
        let records: Vec<Record> = (0..25)
            .map(|i| record(&format!("Cliente {:02}", i), None, None, (i * 10) as f64))
            .collect();
        let table = Table::from_records(records);
        let view = aggregate(&table, &ReportDefinition::by_client());

        assert_eq!(view.groups.len(), 20);
        assert_eq!(view.omitted_groups, 5);
        let smallest_included = view.groups.iter().map(|g| g.total).fold(f64::MAX, f64::min);
        let included: Vec<&str> = view.groups.iter().map(|g| g.label.as_str()).collect();
        for r in &table {
            let label = r.cliente.as_deref().unwrap();
            if !included.contains(&label) {
                assert!(r.valor_liquido.unwrap() <= smallest_included);
            }
        }

        // Other reports are never truncated
        let status_like = aggregate_by(&table, Column::Cliente, Column::ValorLiquido);
        assert_eq!(status_like.len(), 25);
    }

    #[test]
    fn test_month_report_is_chronological_and_drops_missing_dates() {
        let table = Table::from_records(vec![
            dated(2026, 1, 10.0),
            dated(2025, 12, 500.0),
            dated(2026, 1, 5.0),
            Record {
                valor_liquido: Some(999.0),
                ..Default::default()
            },
        ]);
        let view = aggregate(&table, &ReportDefinition::by_month());
        assert_eq!(
            view.pairs(),
            vec![("12/2025".to_string(), 500.0), ("01/2026".to_string(), 15.0)]
        );
        assert_eq!(view.total(), table.sum(Column::ValorLiquido) - 999.0);
    }

    #[test]
    fn test_month_options_and_default_selection() {
        let table = Table::from_records(vec![
            dated(2025, 11, 1.0),
            dated(2026, 1, 1.0),
            dated(2025, 12, 1.0),
            dated(2025, 11, 1.0),
        ]);
        let options = month_options(&table, Column::DataOficialFaturamento);
        assert_eq!(options, vec!["11/2025", "01/2026", "12/2025"]);

        let today = NaiveDate::from_ymd_opt(2025, 12, 5).unwrap();
        // "01/2026" < "12/2025" as strings, so it is not preselected
        assert_eq!(default_month_selection(&options, today), vec!["12/2025"]);

        let today = NaiveDate::from_ymd_opt(2025, 11, 5).unwrap();
        assert_eq!(default_month_selection(&options, today), vec!["11/2025", "12/2025"]);
    }

    #[test]
    fn test_filter_months() {
        let table = Table::from_records(vec![dated(2025, 11, 1.0), dated(2025, 12, 2.0), Record::default()]);
        let selected = vec!["12/2025".to_string()];
        let filtered = filter_months(&table, Column::DataOficialFaturamento, &selected);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.records[0].valor_liquido, Some(2.0));
        assert!(filter_months(&table, Column::DataOficialFaturamento, &[]).is_empty());
        assert_eq!(drop_missing_dates(&table, Column::DataOficialFaturamento).len(), 2);
    }

    #[test]
    fn test_option_values_skip_nulls() {
        let table = sample();
        assert_eq!(option_values(&table, Column::Situacao), vec!["Aberto", "Fechado"]);
        assert_eq!(option_values(&table, Column::ResponsavelComercial), vec!["Ana", "Bruno"]);
    }

    #[test]
    fn test_empty_table_flows_through() {
        let table = Table::new();
        assert!(filter(&table, &FilterCriteria::new().with_client("x")).is_empty());
        assert!(aggregate(&table, &ReportDefinition::by_client()).is_empty());
        assert!(aggregate(&table, &ReportDefinition::by_month()).is_empty());
        assert!(option_values(&table, Column::Situacao).is_empty());
        assert!(month_options(&table, Column::DataOficialFaturamento).is_empty());
        assert_eq!(totals(&table), Totals::default());
    }
}
