//! Deterministic ordering and grouping of items into franchise sequences

use crate::models::{FranchiseRef, Item};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Items of one franchise in release order
///
/// Positions in `items` are the coordinate system for every index in the
/// analysis output.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub franchise: FranchiseRef,
    pub items: Vec<Item>,
}

impl Sequence {
    /// Build a sequence, sorting items by release date (unknown last) then title
    pub fn new(franchise: FranchiseRef, mut items: Vec<Item>) -> Self {
        items.sort_by(release_order);
        Self { franchise, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Title at `index`, if in range
    pub fn title_at(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.title.as_str())
    }
}

/// Release date ascending with unknown dates last, then title
pub fn release_order(a: &Item, b: &Item) -> Ordering {
    let by_date = match (a.release_date, b.release_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    by_date.then_with(|| a.title.cmp(&b.title))
}

/// Group items by franchise, ordered by franchise id then name
pub fn group_sequences(items: impl IntoIterator<Item = Item>) -> Vec<Sequence> {
    let mut groups: BTreeMap<FranchiseRef, Vec<Item>> = BTreeMap::new();
    for item in items {
        groups.entry(item.franchise.clone()).or_default().push(item);
    }

    groups
        .into_iter()
        .map(|(franchise, items)| Sequence::new(franchise, items))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(franchise: u64, title: &str, date: Option<(i32, u32, u32)>) -> Item {
        Item {
            id: 0,
            franchise: FranchiseRef {
                id: franchise,
                name: format!("Collection {}", franchise),
            },
            title: title.to_string(),
            release_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            popularity: 0.0,
            poster_path: None,
            signals: Default::default(),
        }
    }

    #[test]
    fn test_orders_by_date_then_title_with_unknown_last() {
        let franchise = item(1, "", None).franchise;
        let seq = Sequence::new(
            franchise,
            vec![
                item(1, "Undated", None),
                item(1, "Sequel", Some((1990, 6, 1))),
                item(1, "B Side", Some((1985, 1, 1))),
                item(1, "A Side", Some((1985, 1, 1))),
            ],
        );

        let titles: Vec<_> = seq.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["A Side", "B Side", "Sequel", "Undated"]);
        assert_eq!(seq.title_at(2), Some("Sequel"));
        assert_eq!(seq.title_at(9), None);
    }

    #[test]
    fn test_group_sequences_is_ordered_by_franchise() {
        let seqs = group_sequences(vec![
            item(20, "x", Some((2001, 1, 1))),
            item(3, "y", Some((2002, 1, 1))),
            item(20, "w", Some((2000, 1, 1))),
        ]);

        assert_eq!(seqs.len(), 2);
        assert_eq!(seqs[0].franchise.id, 3);
        assert_eq!(seqs[1].franchise.id, 20);
        assert_eq!(seqs[1].title_at(0), Some("w"));
        assert_eq!(seqs[1].len(), 2);
    }
}
