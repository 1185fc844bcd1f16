use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees
///
/// Callers supply values within lat ∈ [-90, 90], lon ∈ [-180, 180].
/// The discovery core does not re-check the range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[inline]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Build a coordinate from two independently nullable columns.
    ///
    /// Only a fully populated pair yields a coordinate.
    pub fn from_parts(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(lat), Some(lon)) => Some(Self::new(lat, lon)),
            _ => None,
        }
    }
}

/// Reverse-geocoding result for a position fix
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeocodedPlace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
}

impl GeocodedPlace {
    /// Single-line address in the form "name, street, subregion"
    pub fn address(&self) -> String {
        let part = |p: &Option<String>| p.clone().unwrap_or_default();
        format!(
            "{}, {}, {}",
            part(&self.name),
            part(&self.street),
            part(&self.subregion)
        )
    }

    /// City name, falling back to the region
    pub fn locality(&self) -> Option<String> {
        self.city
            .clone()
            .filter(|c| !c.is_empty())
            .or_else(|| self.region.clone().filter(|r| !r.is_empty()))
    }
}

/// The requesting user's resolved position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

impl UserLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            address: None,
            city: None,
        }
    }

    /// Combine a position fix with its (optional) reverse-geocoded place
    pub fn from_fix(coordinate: Coordinate, place: Option<&GeocodedPlace>) -> Self {
        match place {
            Some(place) => Self {
                coordinate,
                address: Some(place.address()),
                city: place.locality(),
            },
            None => Self::new(coordinate),
        }
    }
}

/// A provider eligible for discovery
///
/// `attributes` is carried through untouched; ranking only reads
/// `name`, `coordinate` and `rating`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate<A> {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(flatten)]
    pub attributes: A,
}

impl<A> Candidate<A> {
    pub fn new(id: impl Into<String>, name: impl Into<String>, attributes: A) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            coordinate: None,
            rating: None,
            attributes,
        }
    }

    pub fn with_coordinate(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinate = Some(Coordinate::new(latitude, longitude));
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }
}

/// A candidate annotated with its display distance from the origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate<A> {
    #[serde(flatten)]
    pub candidate: Candidate<A>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
}

impl<A> RankedCandidate<A> {
    pub fn into_candidate(self) -> Candidate<A> {
        self.candidate
    }
}

/// Display payload for a kitchen
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KitchenAttributes {
    #[serde(rename = "cuisineTypes", default)]
    pub cuisine_types: Vec<String>,
    #[serde(rename = "kitchenAddress", default)]
    pub kitchen_address: Option<String>,
    #[serde(rename = "kitchenImageUrl")]
    pub kitchen_image_url: String,
}

pub type Kitchen = Candidate<KitchenAttributes>;

/// Radius constraint; `None` admits every candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(rename = "radiusKm")]
    pub radius_km: Option<f64>,
}

impl FilterConfig {
    pub const fn within(radius_km: f64) -> Self {
        Self {
            radius_km: Some(radius_km),
        }
    }

    pub const fn unbounded() -> Self {
        Self { radius_km: None }
    }

    /// Label shown in the radius picker, e.g. "10km" or "All"
    pub fn label(&self) -> String {
        match self.radius_km {
            Some(radius) => format!("{}km", radius),
            None => "All".to_string(),
        }
    }
}

/// Active ordering strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Distance,
    Rating,
    Name,
}

impl SortKey {
    pub const ALL: [SortKey; 3] = [SortKey::Distance, SortKey::Rating, SortKey::Name];

    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Distance => "Distance",
            SortKey::Rating => "Rating",
            SortKey::Name => "Name",
        }
    }
}
