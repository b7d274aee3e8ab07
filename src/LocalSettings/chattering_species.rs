//! # Chattering Species Module
//!
//! ## Purpose
//! Chattering species are pairs of species connected by a fast reversible reaction
//! (e.g. `O2+npropyl=npropyloo`). Pathway analysis merges every such pair into one
//! node, otherwise pathways are flooded by spurious back-and-forth cycles.
//!
//! ## Main Data Structures and Logic
//! - `FastTransition`: a forward/backward reaction pair and, for every atom-following
//!   scheme (`H`, `C`, `O`, `HA1`..`HA6`), the two species the followed atom jumps between
//! - `ChatteringSpecies`: pairs selected for one atom tag, numbered "1", "2", ... in table order
//! - `fast_transitions()`: the table of fast transitions of the propane mechanism
//! - `resolve_chattering_species()`: filtering and renumbering
//!
//! The reaction data in the table is informative only, the consumer needs the species pairs.
//! Pairs keep their table order, they are never sorted.
//!
//! ## Usage
//! ```rust
//! use KiPath::LocalSettings::chattering_species::get_chattering_species;
//! let chattering = get_chattering_species("C");
//! assert_eq!(chattering.len(), 11);
//! assert_eq!(chattering.get("1"), Some([60, 78]));
//! ```

use super::settings_error::SettingsError;
use log::{debug, trace};
use prettytable::{Table, row};
use serde::de::{Error, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// atom-following schemes defined for every record of the default table
pub const ATOM_TAGS: [&str; 9] = ["H", "C", "O", "HA1", "HA2", "HA3", "HA4", "HA5", "HA6"];

/// fast (chattering) transition between two species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastTransition {
    /// indices of the forward and backward reactions
    pub rxn: [usize; 2],
    #[serde(default)]
    pub equation: String,
    /// atom tag -> pair of species indices
    #[serde(default)]
    pub spe: Option<BTreeMap<String, Vec<usize>>>,
}

impl FastTransition {
    /// Every hydrogen, carbon and labelled-hydrogen scheme follows `pair`,
    /// the oxygen scheme follows `o_pair` (O2 carries the oxygen in oxidation steps).
    pub fn new(rxn: [usize; 2], equation: &str, pair: [usize; 2], o_pair: [usize; 2]) -> Self {
        let spe: BTreeMap<String, Vec<usize>> = ATOM_TAGS
            .iter()
            .map(|tag| {
                let p = if *tag == "O" { o_pair } else { pair };
                (tag.to_string(), p.to_vec())
            })
            .collect();
        Self {
            rxn,
            equation: equation.to_string(),
            spe: Some(spe),
        }
    }

    /// the species pair for `atom_followed`, if the record defines exactly two species for it
    pub fn pair_for(&self, atom_followed: &str) -> Option<[usize; 2]> {
        let species = self.spe.as_ref()?.get(atom_followed)?;
        match species.as_slice() {
            [first, second] => Some([*first, *second]),
            _ => None,
        }
    }
}

/// Fast transitions of the propane low temperature oxidation mechanism, in table order.
pub fn fast_transitions() -> Vec<FastTransition> {
    vec![
        FastTransition::new([1068, 1069], "O2+npropyl=npropyloo", [60, 78], [9, 78]),
        FastTransition::new([1116, 1117], "O2+QOOH_1=well_1", [87, 90], [9, 90]),
        FastTransition::new([1080, 1081], "npropyloo=QOOH_1", [78, 87], [78, 87]),
        FastTransition::new([1096, 1097], "O2+ipropyl=ipropyloo", [61, 80], [9, 80]),
        FastTransition::new([1124, 1125], "O2+QOOH_2=well_2", [88, 91], [9, 91]),
        FastTransition::new([1146, 1147], "O2+QOOH_3=well_3", [89, 92], [9, 92]),
        // prod_1=frag_1+OH (1214, 1215) is left out of the table
        FastTransition::new([1042, 1043], "allyloxy=vinoxylmethyl", [72, 108], [72, 108]),
        FastTransition::new([348, 349], "C2H5+O2=CH3CH2OO", [39, 50], [9, 50]),
        FastTransition::new([132, 133], "CH3+O2(+M)=CH3OO(+M)", [25, 27], [9, 27]),
        FastTransition::new([586, 587], "O2C2H4OH=CH2CH2OH+O2", [85, 54], [85, 9]),
        FastTransition::new([434, 435], "acetyl+O2=acetylperoxy", [45, 47], [9, 47]),
    ]
}

/// Pairs of chattering species numbered from 1 in the order of the source table.
/// Serialized as an ordered JSON object `{"1": [60, 78], "2": [87, 90], ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatteringSpecies {
    pairs: Vec<[usize; 2]>,
}

impl ChatteringSpecies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, pair: [usize; 2]) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn pairs(&self) -> &[[usize; 2]] {
        &self.pairs
    }

    /// pair stored under the 1-based key `"1"`, `"2"`, ...
    pub fn get(&self, key: &str) -> Option<[usize; 2]> {
        let idx: usize = key.parse().ok()?;
        idx.checked_sub(1).and_then(|i| self.pairs.get(i)).copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = String> + '_ {
        (1..=self.pairs.len()).map(|i| i.to_string())
    }

    pub fn iter(&self) -> impl Iterator<Item = (String, [usize; 2])> + '_ {
        self.pairs
            .iter()
            .enumerate()
            .map(|(i, pair)| ((i + 1).to_string(), *pair))
    }

    /// the species `species` chatters with, first match in numbering order
    pub fn partner(&self, species: usize) -> Option<usize> {
        self.pairs.iter().find_map(|[a, b]| {
            if *a == species {
                Some(*b)
            } else if *b == species {
                Some(*a)
            } else {
                None
            }
        })
    }

    /// a species cannot chatter with itself
    pub fn validate(&self) -> Result<(), SettingsError> {
        match self.iter().find(|(_, [a, b])| a == b) {
            Some((key, [species, _])) => Err(SettingsError::DegenerateChatteringPair { key, species }),
            None => Ok(()),
        }
    }

    pub fn create_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["#", "species 1", "species 2"]);
        for (key, [a, b]) in self.iter() {
            table.add_row(row![key, a, b]);
        }
        table
    }
}

impl Serialize for ChatteringSpecies {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (key, pair) in self.iter() {
            map.serialize_entry(&key, &pair)?;
        }
        map.end()
    }
}

struct ChatteringSpeciesVisitor;

impl<'de> Visitor<'de> for ChatteringSpeciesVisitor {
    type Value = ChatteringSpecies;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from sequential keys \"1\", \"2\", ... to species pairs")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        // maps that sort keys as text ("1", "10", "11", "2", ...) are accepted too
        let mut numbered: BTreeMap<usize, [usize; 2]> = BTreeMap::new();
        while let Some((key, pair)) = access.next_entry::<String, [usize; 2]>()? {
            let number: usize = key
                .parse()
                .map_err(|_| M::Error::custom(format!("key \"{}\" is not a number", key)))?;
            if numbered.insert(number, pair).is_some() {
                return Err(M::Error::custom(format!("duplicate key \"{}\"", key)));
            }
        }
        let mut chattering = ChatteringSpecies::new();
        for (number, pair) in numbered {
            let expected = chattering.len() + 1;
            if number != expected {
                return Err(M::Error::custom(format!(
                    "expected key \"{}\", found \"{}\"",
                    expected, number
                )));
            }
            chattering.push(pair);
        }
        Ok(chattering)
    }
}

impl<'de> Deserialize<'de> for ChatteringSpecies {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(ChatteringSpeciesVisitor)
    }
}

/// Selects the species pairs of `atom_followed` from `transitions`.
///
/// Records without species data, without the tag, or with anything but two species
/// for the tag are skipped. An unknown tag gives an empty result.
pub fn resolve_chattering_species(
    transitions: &[FastTransition],
    atom_followed: &str,
) -> ChatteringSpecies {
    let mut chattering = ChatteringSpecies::new();
    for transition in transitions {
        trace!("fast transition {:?}", transition);
        match transition.pair_for(atom_followed) {
            Some(pair) => chattering.push(pair),
            None => debug!(
                "skipping {:?} ({}): no species pair for atom {}",
                transition.rxn, transition.equation, atom_followed
            ),
        }
    }
    debug!(
        "{} chattering species pairs for atom {}: {:?}",
        chattering.len(),
        atom_followed,
        chattering.pairs()
    );
    chattering
}

/// chattering species of the default fast transitions table
pub fn get_chattering_species(atom_followed: &str) -> ChatteringSpecies {
    resolve_chattering_species(&fast_transitions(), atom_followed)
}
