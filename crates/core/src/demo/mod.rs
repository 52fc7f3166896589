//! Placeholder data for the dashboard's vegetation and weather panels

pub mod ndvi;
pub mod provider;
pub mod weather;

pub use ndvi::{
    clamp_grid_size, geojson_centroid, NdviCell, NdviGrid, NdviPoint, NdviSample, NdviSeries,
    DEFAULT_GRID_SIZE, DEFAULT_SERIES_DAYS,
};
pub use provider::{DemoDataProvider, SyntheticProvider, DEFAULT_SEED};
pub use weather::{DailyPrecipitation, WeatherSeries, DEFAULT_WEATHER_DAYS};
