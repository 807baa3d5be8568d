//! Catalog Export
//!
//! JSON backup of the catalog and the favorites subset.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::favorites::Favorites;
use crate::models::Movie;

pub const EXPORT_FILE_NAME: &str = "peliculas_backup.json";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogExport<'a> {
    all_movies: &'a [Movie],
    favorite_movies: Vec<&'a Movie>,
    export_date: String,
}

/// Pretty-printed `{ allMovies, favoriteMovies, exportDate }`
pub fn export_json(
    movies: &[Movie],
    favorites: &Favorites,
    now: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let export = CatalogExport {
        all_movies: movies,
        favorite_movies: favorites.select(movies),
        export_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    serde_json::to_string_pretty(&export)
}
