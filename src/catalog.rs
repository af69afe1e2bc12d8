// Room catalog
// The rooms a guest can pick from in the booking form. Defined once at startup and never mutated.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("YAML parse error: {0}")]
    YamlParseError(#[from] serde_yaml::Error),

    #[error("Room {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("Room {name} has a non-positive nightly price: {price}")]
    InvalidPrice { name: String, price: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomOption {
    pub id: u32,
    pub name: String,
    /// Price per night in whole roubles
    pub nightly_price: i64,
    pub description: String,
    pub size_sqm: u32,
    pub max_guests: u32,
}

impl RoomOption {
    /// Label shown in the room picker, e.g. `Deluxe room - 8000 ₽`
    pub fn select_label(&self) -> String {
        format!("{} - {} ₽", self.name, self.nightly_price)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomCatalog {
    rooms: Vec<RoomOption>,
}

impl RoomCatalog {
    pub fn new(rooms: Vec<RoomOption>) -> Self {
        Self { rooms }
    }

    // The hotel's own rooms
    pub fn standard() -> Self {
        Self::new(vec![
            RoomOption {
                id: 1,
                name: "Standard room".to_string(),
                nightly_price: 5000,
                description: "Cosy room with a city view, a double bed and modern amenities"
                    .to_string(),
                size_sqm: 25,
                max_guests: 2,
            },
            RoomOption {
                id: 2,
                name: "Deluxe room".to_string(),
                nightly_price: 8000,
                description:
                    "Spacious room with a panoramic view, a lounge area and a luxury bathroom"
                        .to_string(),
                size_sqm: 35,
                max_guests: 2,
            },
            RoomOption {
                id: 3,
                name: "Suite".to_string(),
                nightly_price: 12000,
                description:
                    "Luxury suite with a separate living room, a kitchen and a balcony over the city"
                        .to_string(),
                size_sqm: 50,
                max_guests: 4,
            },
        ])
    }

    /// Load a catalog shipped as content, e.g.
    ///
    /// ```yaml
    /// rooms:
    ///   - id: 1
    ///     name: Standard room
    ///     nightly_price: 5000
    ///     description: Cosy room
    ///     size_sqm: 25
    ///     max_guests: 2
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let catalog: RoomCatalog = serde_yaml::from_str(yaml)?;

        for room in &catalog.rooms {
            if room.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { id: room.id });
            }
            if room.nightly_price <= 0 {
                return Err(CatalogError::InvalidPrice {
                    name: room.name.clone(),
                    price: room.nightly_price,
                });
            }
        }

        Ok(catalog)
    }

    pub fn rooms(&self) -> &[RoomOption] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Returns the room with this exact display name, or `None` when no room
    /// or more than one room carries it.
    pub fn find_by_name(&self, name: &str) -> Option<&RoomOption> {
        let mut matches = self.rooms.iter().filter(|room| room.name == name);
        match (matches.next(), matches.next()) {
            (Some(room), None) => Some(room),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog() {
        let catalog = RoomCatalog::standard();
        assert_eq!(catalog.len(), 3);

        let prices: Vec<i64> = catalog.rooms().iter().map(|r| r.nightly_price).collect();
        assert_eq!(prices, vec![5000, 8000, 12000]);

        let suite = catalog.find_by_name("Suite").unwrap();
        assert_eq!(suite.max_guests, 4);
        assert_eq!(suite.size_sqm, 50);
    }

    #[test]
    fn test_find_by_name_is_exact() {
        let catalog = RoomCatalog::standard();
        assert!(catalog.find_by_name("suite").is_none());
        assert!(catalog.find_by_name("Suite ").is_none());
        assert!(catalog.find_by_name("").is_none());
    }

    #[test]
    fn test_duplicate_names_are_ambiguous() {
        let mut rooms = RoomCatalog::standard().rooms().to_vec();
        let mut copy = rooms[0].clone();
        copy.id = 99;
        rooms.push(copy);

        let catalog = RoomCatalog::new(rooms);
        assert!(catalog.find_by_name("Standard room").is_none());
        assert!(catalog.find_by_name("Deluxe room").is_some());
    }

    #[test]
    fn test_select_label() {
        let catalog = RoomCatalog::standard();
        let deluxe = catalog.find_by_name("Deluxe room").unwrap();
        assert_eq!(deluxe.select_label(), "Deluxe room - 8000 ₽");
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
rooms:
  - id: 7
    name: Attic
    nightly_price: 3500
    description: Small room under the roof
    size_sqm: 14
    max_guests: 1
"#;
        let catalog = RoomCatalog::from_yaml_str(yaml).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find_by_name("Attic").unwrap().nightly_price, 3500);
    }

    #[test]
    fn test_from_yaml_rejects_bad_rooms() {
        let zero_price = r#"
rooms:
  - id: 1
    name: Free
    nightly_price: 0
    description: ""
    size_sqm: 10
    max_guests: 1
"#;
        let result = RoomCatalog::from_yaml_str(zero_price);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { price: 0, .. })));

        let blank_name = r#"
rooms:
  - id: 4
    name: "  "
    nightly_price: 100
    description: ""
    size_sqm: 10
    max_guests: 1
"#;
        let result = RoomCatalog::from_yaml_str(blank_name);
        assert!(matches!(result, Err(CatalogError::EmptyName { id: 4 })));

        assert!(matches!(
            RoomCatalog::from_yaml_str("rooms: [1, 2"),
            Err(CatalogError::YamlParseError(_))
        ));
    }
}
