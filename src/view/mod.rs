//! View Renderer
//!
//! Projects the catalog into card markup for the active view mode. Output
//! replaces the container content wholesale; there is no incremental diffing.

mod card;
mod carousel;
mod escape;

pub use card::{movie_card, CardAction};
pub use carousel::{nav_state, scroll_target, NavState, ScrollDirection, ScrollMetrics};
pub use escape::escape_html;

use crate::favorites::Favorites;
use crate::models::Movie;

pub const LOADING_HTML: &str = r#"<div class="loading" role="status">Cargando películas...</div>"#;

/// Presentation of the catalog; not persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    Carousel,
    Favorites,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Grid, ViewMode::Carousel, ViewMode::Favorites];

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Grid => "Cuadrícula",
            ViewMode::Carousel => "Carrusel",
            ViewMode::Favorites => "Favoritas",
        }
    }

    pub fn container_class(self) -> &'static str {
        match self {
            ViewMode::Grid => "films-grid",
            ViewMode::Carousel | ViewMode::Favorites => "films-carousel",
        }
    }

    /// Horizontal strip with prev/next controls
    pub fn is_scrollable(self) -> bool {
        self != ViewMode::Grid
    }

    fn empty_message(self) -> &'static str {
        match self {
            ViewMode::Favorites => "No hay películas favoritas aún",
            ViewMode::Grid | ViewMode::Carousel => "No hay películas registradas",
        }
    }
}

/// Result of one render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub mode: ViewMode,
    pub html: String,
    /// Cards rendered in this view
    pub count: usize,
    /// Favorites present in the catalog, for the tab badge
    pub favorite_count: usize,
    /// Live-region text describing the result
    pub announcement: String,
}

impl RenderedView {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// What the movie container currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewContent {
    #[default]
    Loading,
    Ready(RenderedView),
}

impl ViewContent {
    pub fn html(&self) -> String {
        match self {
            ViewContent::Loading => LOADING_HTML.to_string(),
            ViewContent::Ready(view) => view.html.clone(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewContent::Loading)
    }
}

/// Render `movies` in `mode`
pub fn render(movies: &[Movie], mode: ViewMode, favorites: &Favorites) -> RenderedView {
    let favorite_movies = favorites.select(movies);
    let favorite_count = favorite_movies.len();
    let visible: Vec<&Movie> = match mode {
        ViewMode::Favorites => favorite_movies,
        ViewMode::Grid | ViewMode::Carousel => movies.iter().collect(),
    };

    let html = if visible.is_empty() {
        format!(r#"<div class="no-movies" role="status">{}</div>"#, mode.empty_message())
    } else {
        visible
            .iter()
            .map(|movie| movie_card(movie, favorites.contains(&movie.id)))
            .collect()
    };

    let announcement = match (mode, visible.len()) {
        (_, 0) => mode.empty_message().to_string(),
        (ViewMode::Favorites, 1) => "1 película favorita".to_string(),
        (ViewMode::Favorites, n) => format!("{} películas favoritas", n),
        (_, 1) => "1 película cargada".to_string(),
        (_, n) => format!("{} películas cargadas", n),
    };

    RenderedView { mode, html, count: visible.len(), favorite_count, announcement }
}
