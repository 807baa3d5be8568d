//! Movie card markup.
//!
//! Cards carry no inline handlers. Buttons expose `data-action` and
//! `data-movie-id`; the container dispatches clicks from those attributes.

use super::escape::escape_html;
use crate::models::Movie;

/// Click action a card button requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    Edit,
    Delete,
    Favorite,
}

impl CardAction {
    pub fn as_str(self) -> &'static str {
        match self {
            CardAction::Edit => "edit",
            CardAction::Delete => "delete",
            CardAction::Favorite => "favorite",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "edit" => Some(CardAction::Edit),
            "delete" => Some(CardAction::Delete),
            "favorite" => Some(CardAction::Favorite),
            _ => None,
        }
    }
}

/// Markup for a single card. Every movie field is escaped exactly once.
pub fn movie_card(movie: &Movie, favorite: bool) -> String {
    let id = escape_html(movie.id.as_str());
    let title = escape_html(&movie.title);

    let mut html = format!(
        r#"<article class="movie-card" role="listitem" aria-labelledby="title-{id}" data-movie-id="{id}">"#
    );
    html.push_str(&poster(movie, &title));
    html.push_str(r#"<div class="movie-content">"#);
    html.push_str(&format!(r#"<h3 id="title-{id}" class="movie-title">{title}</h3>"#));
    html.push_str(&format!(
        r#"<p class="movie-director">{}</p>"#,
        escape_html(&movie.director)
    ));
    if let Some(meta) = meta_line(movie) {
        html.push_str(&format!(r#"<p class="movie-meta">{}</p>"#, meta));
    }
    html.push_str(&format!(
        r#"<p class="movie-description">{}</p>"#,
        escape_html(&movie.description)
    ));
    html.push_str(&actions(&id, &title, favorite));
    html.push_str("</div></article>");
    html
}

fn poster(movie: &Movie, title: &str) -> String {
    const PLACEHOLDER: &str = "🎬 Sin imagen";
    match movie.image.as_deref().map(str::trim).filter(|url| !url.is_empty()) {
        Some(url) => format!(
            r#"<img src="{}" alt="Póster de {}" class="movie-poster" loading="lazy" data-fallback="poster"><div class="movie-poster-placeholder" hidden aria-hidden="true">{}</div>"#,
            escape_html(url),
            title,
            PLACEHOLDER
        ),
        None => format!(
            r#"<div class="movie-poster-placeholder" aria-hidden="true">{}</div>"#,
            PLACEHOLDER
        ),
    }
}

/// "1979 · Terror · ⭐ 8.5/10" from whichever optional fields are present
fn meta_line(movie: &Movie) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(year) = movie.year {
        parts.push(year.to_string());
    }
    if let Some(genre) = movie.genre.as_deref().filter(|g| !g.is_empty()) {
        parts.push(escape_html(genre));
    }
    if let Some(rating) = movie.rating {
        parts.push(format!("⭐ {:.1}/10", rating));
    }
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn actions(id: &str, title: &str, favorite: bool) -> String {
    let (favorite_class, favorite_label, favorite_icon) = if favorite {
        ("btn btn-favorite active", "Quitar de favoritos", "❤️")
    } else {
        ("btn btn-favorite", "Agregar a favoritos", "🤍")
    };

    format!(
        concat!(
            r#"<div class="movie-actions" role="group" aria-label="Acciones para {title}">"#,
            r#"<button type="button" class="{favorite_class}" data-action="favorite" data-movie-id="{id}" aria-pressed="{favorite}" aria-label="{favorite_label}: {title}">{favorite_icon}</button>"#,
            r#"<button type="button" class="btn btn-edit" data-action="edit" data-movie-id="{id}" aria-label="Editar {title}">Editar</button>"#,
            r#"<button type="button" class="btn btn-delete" data-action="delete" data-movie-id="{id}" aria-label="Eliminar {title}">Eliminar</button>"#,
            "</div>"
        ),
        title = title,
        id = id,
        favorite = favorite,
        favorite_class = favorite_class,
        favorite_label = favorite_label,
        favorite_icon = favorite_icon,
    )
}
