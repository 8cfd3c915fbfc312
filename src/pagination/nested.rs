use super::page_source::{page_count_for, PageSource};
use super::PaginationError;

/// A top-level entry in nested mode: a named group with its own entries.
#[derive(Debug, Clone, PartialEq)]
pub struct Category<E> {
    pub name: String,
    pub description: Option<String>,
    pub entries: Vec<E>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryHeading {
    pub name: String,
    pub description: Option<String>,
}

struct Section<E> {
    heading: CategoryHeading,
    page_count: usize,
    // moved into `source` the first time the category is visited
    pending: Vec<E>,
    source: Option<PageSource<E>>,
}

/// Two-level layout. Categories are walked in order and every category is
/// re-paged on its own, so a category never shares a page with another one.
/// Page numbers handed out by this type index the flattened sequence of
/// sub-pages across all categories.
pub struct NestedPages<E> {
    sections: Vec<Section<E>>,
    per_page: usize,
    total_entries: usize,
}

impl<E> NestedPages<E> {
    pub fn paginate(categories: Vec<Category<E>>, per_page: usize) -> Result<Self, PaginationError> {
        if per_page == 0 {
            return Err(PaginationError::InvalidConfiguration(
                "per_page must be at least 1".to_string(),
            ));
        }

        let total_entries = categories.iter().map(|c| c.entries.len()).sum();
        let sections = categories
            .into_iter()
            .map(|category| Section {
                page_count: page_count_for(category.entries.len(), per_page),
                heading: CategoryHeading {
                    name: category.name,
                    description: category.description,
                },
                pending: category.entries,
                source: None,
            })
            .collect();

        Ok(Self {
            sections,
            per_page,
            total_entries,
        })
    }

    /// Flattened sub-page count, at least 1 even without categories.
    pub fn page_count(&self) -> usize {
        self.sections
            .iter()
            .map(|s| s.page_count)
            .sum::<usize>()
            .max(1)
    }

    #[cfg(test)]
    pub fn category_count(&self) -> usize {
        self.sections.len()
    }

    pub fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Sub-page count of one category (0-based index).
    #[cfg(test)]
    pub fn sub_page_count(&self, category: usize) -> Option<usize> {
        self.sections.get(category).map(|s| s.page_count)
    }

    /// Map a flattened page number to `(category index, sub-page)`.
    pub fn locate(&self, page: usize) -> Result<(usize, usize), PaginationError> {
        let page_count = self.page_count();
        if page == 0 || page > page_count {
            return Err(PaginationError::OutOfRange {
                requested: page,
                page_count,
            });
        }

        let mut remaining = page;
        for (index, section) in self.sections.iter().enumerate() {
            if remaining <= section.page_count {
                return Ok((index, remaining));
            }
            remaining -= section.page_count;
        }

        // only reachable without categories, where page 1 is the empty page
        Err(PaginationError::OutOfRange {
            requested: page,
            page_count: 0,
        })
    }

    /// Heading and entries of a flattened page. Without any category, page 1
    /// is an empty page with no heading.
    pub fn page(&mut self, page: usize) -> Result<(Option<&CategoryHeading>, &[E]), PaginationError> {
        if self.sections.is_empty() && page == 1 {
            return Ok((None, &[]));
        }

        let (index, sub_page) = self.locate(page)?;
        let section = &mut self.sections[index];
        let source = match section.source.take() {
            Some(source) => source,
            None => PageSource::paginate(std::mem::take(&mut section.pending), self.per_page)?,
        };
        let source = section.source.insert(source);

        Ok((Some(&section.heading), source.slice(sub_page)?))
    }
}
