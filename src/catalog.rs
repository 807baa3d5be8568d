//! Catalog State
//!
//! The single in-memory movie list every view renders from. It is only ever
//! replaced wholesale; entries are never patched in place.

use std::rc::Rc;

use crate::models::{Movie, MovieId};

/// Sequence number of a `list()` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug)]
pub struct Catalog {
    movies: Rc<[Movie]>,
    issued: u64,
    applied: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self { movies: Rc::from(Vec::new()), issued: 0, applied: 0 }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable snapshot; later replacements do not affect it
    pub fn current(&self) -> Rc<[Movie]> {
        Rc::clone(&self.movies)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn find_by_id(&self, id: &MovieId) -> Option<Movie> {
        self.movies.iter().find(|movie| &movie.id == id).cloned()
    }

    /// Replace the list unconditionally
    pub fn replace_all(&mut self, movies: Vec<Movie>) {
        let ticket = self.issue_ticket();
        self.accept(ticket, movies);
    }

    /// Ticket for a load about to be issued
    pub fn issue_ticket(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Apply a load result unless a newer one was already applied
    pub fn accept(&mut self, ticket: LoadTicket, movies: Vec<Movie>) -> bool {
        if ticket.0 <= self.applied {
            log::debug!(
                "[CATALOG] Dropping stale load #{} (already at #{})",
                ticket.0,
                self.applied
            );
            return false;
        }
        self.movies = Rc::from(movies);
        self.applied = ticket.0;
        true
    }
}
