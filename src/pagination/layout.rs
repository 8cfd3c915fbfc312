use super::nested::{Category, CategoryHeading, NestedPages};
use super::page_source::PageSource;
use super::render::View;
use super::PaginationError;

/// Entries handed to a session. The variant decides how they are paged.
#[derive(Debug, Clone)]
pub enum Entries<E> {
    Flat(Vec<E>),
    Nested(Vec<Category<E>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Flat,
    Nested,
}

/// The paging strategy of a session, picked once from its entries.
pub enum Pages<E> {
    Flat(PageSource<E>),
    Nested(NestedPages<E>),
}

impl<E> Pages<E> {
    pub fn paginate(entries: Entries<E>, per_page: usize) -> Result<Self, PaginationError> {
        Ok(match entries {
            Entries::Flat(entries) => Pages::Flat(PageSource::paginate(entries, per_page)?),
            Entries::Nested(categories) => {
                Pages::Nested(NestedPages::paginate(categories, per_page)?)
            }
        })
    }

    pub fn mode(&self) -> Mode {
        match self {
            Pages::Flat(_) => Mode::Flat,
            Pages::Nested(_) => Mode::Nested,
        }
    }

    pub fn page_count(&self) -> usize {
        match self {
            Pages::Flat(source) => source.page_count(),
            Pages::Nested(nested) => nested.page_count(),
        }
    }

    /// Leaf entries across the whole layout.
    pub fn total_entries(&self) -> usize {
        match self {
            Pages::Flat(source) => source.len(),
            Pages::Nested(nested) => nested.total_entries(),
        }
    }

    pub fn view(&mut self, page: usize) -> Result<View<'_, E>, PaginationError> {
        let (heading, entries): (Option<&CategoryHeading>, &[E]) = match self {
            Pages::Flat(source) => (None, source.slice(page)?),
            Pages::Nested(nested) => nested.page(page)?,
        };

        Ok(View::Page { heading, entries })
    }
}
