//! Map widget abstraction.
//!
//! The real widget (a JS map, a native tile renderer...) lives outside this
//! crate; the controller drives it through [`MapWidget`] and obtains it once
//! through [`MapLoader`].

use futures::future::LocalBoxFuture;

use crate::error_handler::MapInitError;
use crate::models::LatLng;

/// Options used to construct the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    /// Credential for the map provider, if it needs one.
    pub api_key: Option<String>,
}

/// A point marker to place.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: LatLng,
    /// Hover title.
    pub title: String,
    /// Short label drawn on the marker (the 1-based rank).
    pub label: String,
}

/// Handle of a placed marker; the widget reports clicks with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    /// Degenerate bounds around a single point.
    pub fn from_point(p: LatLng) -> Self {
        Self {
            south_west: p,
            north_east: p,
        }
    }

    /// Smallest bounds containing all points; `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::from_point(first), |mut b, p| {
            b.extend(p);
            b
        }))
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn contains(&self, p: LatLng) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&p.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&p.lng)
    }
}

/// Operations the controller needs from a live map.
pub trait MapWidget {
    fn add_marker(&mut self, marker: MarkerOptions) -> MarkerId;
    fn remove_marker(&mut self, id: MarkerId);
    fn fit_bounds(&mut self, bounds: LatLngBounds);
    fn set_center(&mut self, center: LatLng);
    fn set_zoom(&mut self, zoom: u8);
}

/// Loads the mapping capability and builds the widget.
pub trait MapLoader {
    fn load<'a>(
        &'a self,
        options: &'a MapOptions,
    ) -> LocalBoxFuture<'a, Result<Box<dyn MapWidget>, MapInitError>>;
}
