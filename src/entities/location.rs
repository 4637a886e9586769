use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<Coordinates> for String {
    fn from(coordinates: Coordinates) -> Self {
        format!("{},{}", coordinates.latitude, coordinates.longitude)
    }
}

/// A start location as entered by the user: either a device fix or a typed
/// address. The backend accepts both as a single string field.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationInput {
    Position(Coordinates),
    Address(String),
}

impl LocationInput {
    pub fn wire(&self) -> String {
        match self {
            Self::Position(coordinates) => (*coordinates).into(),
            Self::Address(address) => address.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_wire_string() {
        let wire: String = Coordinates::new(48.8566, 2.3522).into();
        assert_eq!(wire, "48.8566,2.3522");
    }

    #[test]
    fn address_input_is_trimmed() {
        let input = LocationInput::Address("  Gare du Nord  ".into());
        assert_eq!(input.wire(), "Gare du Nord");
    }

    #[test]
    fn position_input_wins_over_formatting() {
        let input = LocationInput::Position(Coordinates::new(45.75, 4.85));
        assert_eq!(input.wire(), "45.75,4.85");
    }

    #[test]
    fn route_point_wire_names() {
        let json = serde_json::to_value(Coordinates::new(1.0, 2.0)).unwrap();
        assert_eq!(json["lat"], 1.0);
        assert_eq!(json["lng"], 2.0);
    }
}
