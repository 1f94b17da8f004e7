//! Persistence of the world clock city selection.
//!
//! Cities are stored flat in a [`PreferenceStore`] under indexed keys:
//! `number_of_cities`, then `city_name_{i}`, `city_tz_{i}` and `city_id_{i}`
//! for each entry.

use std::collections::BTreeMap;

use deskclock_proto::ports::preferences::{PreferenceError, PreferenceStore};
use log::{debug, warn};

pub const NUMBER_OF_CITIES: &str = "number_of_cities";
const CITY_NAME: &str = "city_name_";
const CITY_TIME_ZONE: &str = "city_tz_";
const CITY_ID: &str = "city_id_";

/// Selected cities keyed by [`City::id`].
pub type Cities = BTreeMap<String, City>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id:        String,
    pub name:      String,
    pub time_zone: String,
}

impl City {
    pub fn new(id: impl Into<String>, name: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            id:        id.into(),
            name:      name.into(),
            time_zone: time_zone.into(),
        }
    }

    fn save(&self, store: &mut dyn PreferenceStore, index: usize) {
        store.put_string(&format!("{CITY_NAME}{index}"), &self.name);
        store.put_string(&format!("{CITY_TIME_ZONE}{index}"), &self.time_zone);
        store.put_string(&format!("{CITY_ID}{index}"), &self.id);
    }

    /// Entries without a name or zone are unusable and yield `None`. A
    /// missing id falls back to the city name.
    fn load(store: &dyn PreferenceStore, index: usize) -> Option<Self> {
        let name = store.get_string(&format!("{CITY_NAME}{index}"))?;
        let time_zone = store.get_string(&format!("{CITY_TIME_ZONE}{index}"))?;
        let id = store
            .get_string(&format!("{CITY_ID}{index}"))
            .unwrap_or_else(|| name.clone());

        Some(Self {
            id,
            name,
            time_zone,
        })
    }
}

/// Index encoded in a `city_*_{i}` key.
fn city_index(key: &str) -> Option<usize> {
    [CITY_NAME, CITY_TIME_ZONE, CITY_ID]
        .into_iter()
        .find_map(|prefix| key.strip_prefix(prefix))
        .and_then(|index| index.parse().ok())
}

/// Stored count, capped at the number of stored city names.
fn stored_count(store: &dyn PreferenceStore) -> usize {
    let count = usize::try_from(store.get_int(NUMBER_OF_CITIES, -1)).unwrap_or(0);
    let names = store
        .keys()
        .iter()
        .filter(|key| key.starts_with(CITY_NAME))
        .count();

    if count > names {
        warn!("Stored city count {count} exceeds the {names} stored names");
    }

    count.min(names)
}

/// Overwrite the stored list with `cities` and commit.
///
/// Entries left over from a longer list are removed.
pub fn save_cities(store: &mut dyn PreferenceStore, cities: &Cities) -> Result<(), PreferenceError> {
    let stale: Vec<String> = store
        .keys()
        .into_iter()
        .filter(|key| city_index(key).is_some_and(|index| index >= cities.len()))
        .collect();

    for key in &stale {
        store.remove(key);
    }

    store.put_int(NUMBER_OF_CITIES, cities.len() as i64);

    for (index, city) in cities.values().enumerate() {
        city.save(store, index);
    }

    store.apply()
}

/// Read the stored list. A store that never saved any cities yields an empty
/// map.
pub fn read_cities(store: &dyn PreferenceStore) -> Cities {
    let count = stored_count(store);
    let mut cities = Cities::new();

    for index in 0..count {
        match City::load(store, index) {
            Some(city) => {
                cities.insert(city.id.clone(), city);
            }
            None => warn!("Skipping incomplete city entry {index}"),
        }
    }

    cities
}

pub fn dump_cities(store: &dyn PreferenceStore, title: &str) {
    debug!("Cities from {title}:");

    let count = stored_count(store);
    debug!("Number of cities {count}");

    for index in 0..count {
        match City::load(store, index) {
            Some(city) => debug!("{index}: {} {} {}", city.id, city.name, city.time_zone),
            None => debug!("{index}: incomplete entry"),
        }
    }
}
