// Copyright (c) 2020 White Leaf
//
// This software is released under the MIT License.
// https://opensource.org/licenses/MIT

use prettytable::{cell, format::consts::FORMAT_NO_LINESEP, row, Table};
use std::collections::{BTreeMap, HashMap};

/// A cleaned record that can be previewed on the terminal
pub trait Entity {
    type Id;

    /// Header of the id row in previews
    const ID_COLUMN: &'static str = "id";

    fn get_id(&self) -> Self::Id;
    fn get_data(&self) -> HashMap<String, String> {
        Default::default()
    }
}

pub trait ToTable {
    fn to_table(&self) -> Table;
}

/// Blank fields are left out, the rest sorted by name
impl<I: ToString, E: Entity<Id = I>> ToTable for E {
    fn to_table(&self) -> Table {
        let mut data: Vec<_> = self
            .get_data()
            .into_iter()
            .filter(|(_, val)| !val.is_empty())
            .collect();
        data.sort();

        let mut table = Table::new();
        table.set_titles(row![E::ID_COLUMN, self.get_id()]);

        for (key, val) in data {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

impl<K, V> ToTable for BTreeMap<K, V>
where
    K: ToString,
    V: ToString,
{
    fn to_table(&self) -> Table {
        let mut table = Table::new();

        for (key, val) in self {
            table.add_row(row![key, val]);
        }

        table.set_format(*FORMAT_NO_LINESEP);
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common_macros::hash_map;

    struct Sample;

    impl Entity for Sample {
        type Id = i32;
        const ID_COLUMN: &'static str = "movie_id";

        fn get_id(&self) -> Self::Id {
            862
        }

        fn get_data(&self) -> HashMap<String, String> {
            hash_map! {
                "title".into() => "Toy Story".into(),
                "budget".into() => "30000000".into(),
                "tagline".into() => String::new(),
            }
        }
    }

    #[test]
    fn entity_table_skips_blank_fields() {
        let table = Sample.to_table();
        assert_eq!(table.len(), 2);

        let first = table.get_row(0).unwrap();
        assert_eq!(first.get_cell(0).unwrap().get_content(), "budget");

        let rendered = table.to_string();
        assert!(rendered.contains("movie_id"));
        assert!(rendered.contains("862"));
        assert!(rendered.contains("Toy Story"));
        assert!(!rendered.contains("tagline"));
    }

    #[test]
    fn map_table_keeps_key_order() {
        let mut map = BTreeMap::new();
        map.insert("b", 2);
        map.insert("a", 1);

        let rendered = map.to_table().to_string();
        let a = rendered.find('a').unwrap();
        let b = rendered.find('b').unwrap();
        assert!(a < b);
    }
}
