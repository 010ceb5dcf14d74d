use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};

/// Reserved bucket for records with no round label.
pub const UNKNOWN_ROUND: &str = "N/A";
/// Reserved bucket for records with no timestamp.
pub const UNKNOWN_DATE: &str = "SIN FECHA";

/// Partitions `records` into named groups, preserving the first-seen order of
/// keys and the input order inside each group. Records whose key function
/// returns `None` land in the `missing_label` bucket, appended last. Every
/// record ends up in exactly one group.
pub fn group_by<T>(
    records: impl IntoIterator<Item = T>,
    missing_label: &str,
    key_fn: impl Fn(&T) -> Option<String>,
) -> Vec<(String, Vec<T>)> {
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut missing: Vec<T> = Vec::new();

    for record in records {
        let Some(key) = key_fn(&record) else {
            missing.push(record);
            continue;
        };
        match index.get(&key) {
            Some(&at) => groups[at].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    if !missing.is_empty() {
        groups.push((missing_label.to_string(), missing));
    }
    groups
}

/// Orders labels by their first embedded integer, so `"Fecha 2"` sorts before
/// `"Fecha 10"`. Labels without a number come after numbered ones, compared
/// lexicographically among themselves.
pub fn compare_labels_numeric(a: &str, b: &str) -> Ordering {
    match (embedded_number(a), embedded_number(b)) {
        (Some(na), Some(nb)) => na.cmp(&nb).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Numeric-aware label sort with the reserved bucket pinned last.
pub fn sort_round_labels(labels: &mut [String]) {
    labels.sort_by(|a, b| {
        match (a == UNKNOWN_ROUND, b == UNKNOWN_ROUND) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => compare_labels_numeric(a, b),
        }
    });
}

fn embedded_number(label: &str) -> Option<u64> {
    let digits: String = label
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Column-ordered table state. Re-selecting the current column flips the
/// direction; selecting a new column resets to descending (leaders first).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSort<C> {
    pub column: C,
    pub direction: SortDirection,
}

impl<C: PartialEq + Copy> TableSort<C> {
    pub fn descending(column: C) -> Self {
        Self {
            column,
            direction: SortDirection::Descending,
        }
    }

    pub fn toggle(&mut self, column: C) {
        if self.column == column {
            self.direction = self.direction.flipped();
        } else {
            self.column = column;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Stable sort by a derived key. Equal keys keep their input order in both
/// directions, which matters for virtual columns where ties are common.
pub fn sort_rows_by<T, K: Ord>(
    rows: &mut [T],
    direction: SortDirection,
    key: impl Fn(&T) -> K,
) {
    match direction {
        SortDirection::Ascending => rows.sort_by(|a, b| key(a).cmp(&key(b))),
        SortDirection::Descending => rows.sort_by(|a, b| key(b).cmp(&key(a))),
    }
}

/// Month bucket of a UTC instant, as `(year, month)`.
pub fn month_key(date: &DateTime<Utc>) -> (i32, u32) {
    (date.year(), date.month())
}

/// `"MARZO 2025"`-style label. Month names are fixed Spanish uppercase, not
/// locale-dependent.
pub fn month_label(year: i32, month: u32) -> String {
    format!("{} {year}", month_name_es(month))
}

fn month_name_es(month: u32) -> &'static str {
    match month {
        1 => "ENERO",
        2 => "FEBRERO",
        3 => "MARZO",
        4 => "ABRIL",
        5 => "MAYO",
        6 => "JUNIO",
        7 => "JULIO",
        8 => "AGOSTO",
        9 => "SEPTIEMBRE",
        10 => "OCTUBRE",
        11 => "NOVIEMBRE",
        12 => "DICIEMBRE",
        _ => "",
    }
}
