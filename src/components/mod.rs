//! UI Components
//!
//! Leptos components for the catalog page.

mod carousel_nav;
mod film_form;
mod film_grid;
mod notification;
mod view_switcher;

pub use carousel_nav::CarouselNav;
pub use film_form::FilmForm;
pub use film_grid::{scroll_carousel, FilmGrid};
pub use notification::Notification;
pub use view_switcher::ViewSwitcher;
