/// Creatures: the capturable records served by the peer.
///
/// A creature arrives with a grid coordinate. Once caught the coordinate
/// is meaningless, so the on-disk shape (`CaughtRecord`) drops it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Grid coordinate. Signed so out-of-range peer data decodes and is simply
/// never drawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Is this coordinate inside a `size` × `size` grid?
    pub fn in_bounds(self, size: usize) -> bool {
        let size = size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

/// A stat value. The peer sends stats as strings, but numbers are accepted too.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Attr {
    Int(i64),
    Float(f64),
    Text(String),
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Int(v) => write!(f, "{v}"),
            Attr::Float(v) => write!(f, "{v}"),
            Attr::Text(v) => f.write_str(v),
        }
    }
}

/// Experience points as sent by the peer (`"exp": "120"`).
///
/// The text is kept verbatim so a save writes back exactly what arrived,
/// including values like `"064"`, `"12.5"` or `""`. A bare JSON number is
/// accepted and kept as its decimal text; `null` becomes empty.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Experience(pub String);

impl Experience {
    /// Numeric reading of the text, if it has one.
    #[allow(dead_code)]
    pub fn value(&self) -> Option<f64> {
        self.0.trim().parse().ok()
    }
}

impl From<&str> for Experience {
    fn from(s: &str) -> Self {
        Experience(s.to_string())
    }
}

impl fmt::Display for Experience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Experience {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Experience {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Int(i64),
            Uint(u64),
            Float(f64),
        }

        let text = match Option::<Raw>::deserialize(d)? {
            None => String::new(),
            Some(Raw::Text(s)) => s,
            Some(Raw::Int(n)) => n.to_string(),
            Some(Raw::Uint(n)) => n.to_string(),
            Some(Raw::Float(n)) => n.to_string(),
        };
        Ok(Experience(text))
    }
}

/// A creature as received from the peer. Missing fields take their zero values.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Creature {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub stats: BTreeMap<String, Attr>,
    #[serde(default)]
    pub exp: Experience,
    #[serde(default)]
    pub when_attacked: BTreeMap<String, String>,
    #[serde(default, alias = "X")]
    pub x: i32,
    #[serde(default, alias = "Y")]
    pub y: i32,
}

impl Creature {
    pub fn pos(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Human-readable catch announcement listing every attribute.
    pub fn catch_message(&self) -> String {
        format!(
            "You caught a Pokémon: {} (ID: {}, Types: {}, Stats: {}, Exp: {}, When Attacked: {})!",
            self.name,
            self.id,
            self.types.join(", "),
            join_map(&self.stats),
            self.exp,
            join_map(&self.when_attacked),
        )
    }
}

fn join_map<V: fmt::Display>(map: &BTreeMap<String, V>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Persisted shape of a caught creature: everything but the coordinate.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct CaughtRecord {
    pub id: String,
    pub name: String,
    pub types: Vec<String>,
    pub stats: BTreeMap<String, Attr>,
    pub exp: Experience,
    pub when_attacked: BTreeMap<String, String>,
}

impl From<&Creature> for CaughtRecord {
    fn from(c: &Creature) -> Self {
        CaughtRecord {
            id: c.id.clone(),
            name: c.name.clone(),
            types: c.types.clone(),
            stats: c.stats.clone(),
            exp: c.exp.clone(),
            when_attacked: c.when_attacked.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PIKACHU: &str = r#"{
        "id": "25", "name": "Pikachu", "types": ["electric"],
        "stats": {"hp": "35", "attack": 55},
        "exp": "112", "when_attacked": {"thunder": "paralyze"},
        "x": 3, "y": 7
    }"#;

    #[test]
    fn decodes_peer_record() {
        let c: Creature = serde_json::from_str(PIKACHU).unwrap();
        assert_eq!(c.name, "Pikachu");
        assert_eq!(c.exp, Experience::from("112"));
        assert_eq!(c.exp.value(), Some(112.0));
        assert_eq!(c.stats["hp"], Attr::Text("35".into()));
        assert_eq!(c.stats["attack"], Attr::Int(55));
        assert_eq!(c.pos(), Position::new(3, 7));
    }

    #[test]
    fn accepts_uppercase_coordinates_and_numeric_exp() {
        let c: Creature = serde_json::from_str(
            r#"{"id":"1","name":"Bulbasaur","types":[],"stats":{},"exp":64,"when_attacked":{},"X":10,"Y":2}"#,
        ).unwrap();
        assert_eq!(c.pos(), Position::new(10, 2));
        assert_eq!(c.exp, Experience::from("64"));
    }

    fn exp_of(raw: &str) -> Experience {
        let c: Creature = serde_json::from_str(
            &format!(r#"{{"id":"1","name":"X","exp":{raw},"x":0,"y":0}}"#),
        ).unwrap();
        c.exp
    }

    #[test]
    fn exp_text_is_kept_verbatim() {
        assert_eq!(exp_of(r#""""#), Experience::from(""));
        assert_eq!(exp_of(r#""-3""#).value(), Some(-3.0));
        assert_eq!(exp_of(r#""12.5""#).value(), Some(12.5));
        assert_eq!(exp_of(r#""064""#).0, "064");
        assert_eq!(exp_of(r#""lots""#).value(), None);
        assert_eq!(exp_of("null"), Experience::default());
        assert_eq!(exp_of("-7"), Experience::from("-7"));
    }

    #[test]
    fn saved_exp_matches_received_text() {
        let c: Creature = serde_json::from_str(
            r#"{"id":"1","name":"X","exp":"064","x":0,"y":0}"#,
        ).unwrap();
        let v = serde_json::to_value(CaughtRecord::from(&c)).unwrap();
        assert_eq!(v["exp"], "064");
    }

    #[test]
    fn missing_fields_take_zero_values() {
        let roster: Vec<Creature> = serde_json::from_str(r#"[{"name":"Ditto"}, {}]"#).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].name, "Ditto");
        assert_eq!(roster[0].id, "");
        assert_eq!(roster[0].exp, Experience::default());
        assert_eq!(roster[1].pos(), Position::new(0, 0));
    }

    #[test]
    fn caught_record_has_no_coordinates() {
        let c: Creature = serde_json::from_str(PIKACHU).unwrap();
        let v = serde_json::to_value(CaughtRecord::from(&c)).unwrap();
        let obj = v.as_object().unwrap();
        for key in ["x", "y", "X", "Y"] {
            assert!(!obj.contains_key(key), "{key} leaked into record");
        }
        assert_eq!(obj["exp"], "112");
        assert_eq!(obj["stats"]["attack"], 55);
    }

    #[test]
    fn catch_message_lists_attributes() {
        let c: Creature = serde_json::from_str(PIKACHU).unwrap();
        let msg = c.catch_message();
        assert!(msg.starts_with("You caught a Pokémon: Pikachu (ID: 25"));
        assert!(msg.contains("Types: electric"));
        assert!(msg.contains("Stats: attack=55, hp=35"));
        assert!(msg.contains("Exp: 112"));
        assert!(msg.contains("When Attacked: thunder=paralyze"));
    }

    #[test]
    fn bounds() {
        assert!(Position::new(0, 19).in_bounds(20));
        assert!(!Position::new(20, 0).in_bounds(20));
        assert!(!Position::new(-1, 5).in_bounds(20));
    }
}
