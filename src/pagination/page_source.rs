use super::PaginationError;

/// Number of pages needed for `len` entries, never less than one so an
/// empty list still has a page to show.
pub fn page_count_for(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// Splits a list of entries into fixed-size pages. Pages are 1-based and
/// derived on demand, nothing but the entries themselves is stored.
#[derive(Debug, Clone)]
pub struct PageSource<E> {
    entries: Vec<E>,
    per_page: usize,
}

impl<E> PageSource<E> {
    pub fn paginate(entries: Vec<E>, per_page: usize) -> Result<Self, PaginationError> {
        if per_page == 0 {
            return Err(PaginationError::InvalidConfiguration(
                "per_page must be at least 1".to_string(),
            ));
        }

        Ok(Self { entries, per_page })
    }

    pub fn page_count(&self) -> usize {
        page_count_for(self.entries.len(), self.per_page)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The entries shown on `page`. Page 1 of an empty source is an empty slice.
    pub fn slice(&self, page: usize) -> Result<&[E], PaginationError> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PaginationError::OutOfRange {
                requested: page,
                page_count,
            });
        }

        let start = ((page - 1) * self.per_page).min(self.entries.len());
        let end = (start + self.per_page).min(self.entries.len());
        Ok(&self.entries[start..end])
    }
}
