use std::cmp::Ordering;

use liga_terminal::aggregate::{
    compare_labels_numeric, group_by, month_label, sort_round_labels, sort_rows_by, SortDirection,
    TableSort, UNKNOWN_ROUND,
};

#[test]
fn group_by_keeps_first_seen_key_order_and_input_order_inside() {
    let records = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4), ("b", 5)];
    let groups = group_by(records, "missing", |(key, _)| Some(key.to_string()));
    let keys: Vec<&str> = groups.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
    let a_values: Vec<i32> = groups[0].1.iter().map(|(_, value)| *value).collect();
    assert_eq!(a_values, vec![1, 3]);
}

#[test]
fn group_by_accounts_for_every_record() {
    let records: Vec<i32> = (0..97).collect();
    let groups = group_by(records, "rest", |value| {
        if value % 3 == 0 {
            None
        } else {
            Some(format!("g{}", value % 5))
        }
    });
    let total: usize = groups.iter().map(|(_, rows)| rows.len()).sum();
    assert_eq!(total, 97);
}

#[test]
fn group_by_appends_the_missing_bucket_last() {
    let records = vec![Some("x"), None, Some("x"), None];
    let groups = group_by(records, "rest", |value| value.map(str::to_string));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[1].0, "rest");
    assert_eq!(groups[1].1.len(), 2);
}

#[test]
fn labels_compare_by_embedded_number() {
    assert_eq!(compare_labels_numeric("Fecha 2", "Fecha 10"), Ordering::Less);
    assert_eq!(compare_labels_numeric("Fecha 10", "Fecha 2"), Ordering::Greater);
    // numbered labels come before unnumbered ones
    assert_eq!(compare_labels_numeric("Fecha 2", "Apertura"), Ordering::Less);
    assert_eq!(compare_labels_numeric("Apertura", "Clausura"), Ordering::Less);
}

#[test]
fn round_label_sort_pins_the_reserved_bucket_last() {
    let mut labels = vec![
        UNKNOWN_ROUND.to_string(),
        "Fecha 10".to_string(),
        "Fecha 2".to_string(),
        "Apertura".to_string(),
    ];
    sort_round_labels(&mut labels);
    assert_eq!(
        labels,
        vec![
            "Fecha 2".to_string(),
            "Fecha 10".to_string(),
            "Apertura".to_string(),
            UNKNOWN_ROUND.to_string(),
        ]
    );
}

#[test]
fn table_sort_flips_on_repeat_and_resets_on_change() {
    let mut sort = TableSort::descending("goals");
    assert_eq!(sort.direction, SortDirection::Descending);

    sort.toggle("goals");
    assert_eq!(sort.direction, SortDirection::Ascending);

    sort.toggle("team");
    assert_eq!(sort.column, "team");
    assert_eq!(sort.direction, SortDirection::Descending);
}

#[test]
fn sort_rows_by_is_stable_in_both_directions() {
    let rows = vec![("a", 2), ("b", 1), ("c", 2), ("d", 1)];

    let mut desc = rows.clone();
    sort_rows_by(&mut desc, SortDirection::Descending, |(_, value)| *value);
    let names: Vec<&str> = desc.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["a", "c", "b", "d"]);

    let mut asc = rows;
    sort_rows_by(&mut asc, SortDirection::Ascending, |(_, value)| *value);
    let names: Vec<&str> = asc.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["b", "d", "a", "c"]);
}

#[test]
fn month_labels_are_fixed_spanish_uppercase() {
    assert_eq!(month_label(2025, 3), "MARZO 2025");
    assert_eq!(month_label(2026, 1), "ENERO 2026");
    assert_eq!(month_label(2025, 12), "DICIEMBRE 2025");
}
