use crate::store::StoreError;

/// One page of a listing plus the counters a pager needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_prev: bool,
}

/// Slices a 1-based page out of the full item sequence. A page past the end
/// yields an empty item list with the counters intact.
pub fn paginate<T: Clone>(all: &[T], page: usize, page_size: usize) -> Result<Page<T>, StoreError> {
    if page_size == 0 {
        return Err(StoreError::BadPageSize);
    }
    let page = page.max(1);
    let total_items = all.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    Ok(Page {
        items: all[start..end].to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1,
    })
}
