//! Page reconciliation.
//!
//! Callers ask for `limit` records starting at `offset`; the RM API serves
//! fixed pages of `count` records numbered from 1. A window that straddles a
//! page boundary takes two downstream pages.

use crate::error::{TranslationError, TranslationResult};
use serde::Serialize;

/// Downstream pages for one caller window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PagePlan {
    /// Caller offset
    pub offset: u32,
    /// Caller page size, also the downstream `count`
    pub limit: u32,
    /// First downstream page, 1-based
    pub first_page: u64,
    /// Whether the window runs into `first_page + 1`
    pub needs_second_page: bool,
    /// Position of the caller's first record within `first_page`
    pub instance_index: u32,
}

impl PagePlan {
    /// Plan the pages for `offset`/`limit`. A zero limit asks for nothing.
    pub fn new(offset: u32, limit: u32) -> TranslationResult<Self> {
        if limit == 0 {
            return Err(TranslationError::empty(
                "Limit suggests that no results need to be returned.",
            ));
        }

        let (offset64, limit64) = (u64::from(offset), u64::from(limit));
        let first_page = offset64 / limit64 + 1;

        Ok(Self {
            offset,
            limit,
            first_page,
            needs_second_page: offset64 + limit64 > first_page * limit64,
            instance_index: offset % limit,
        })
    }

    /// Downstream page numbers in request order
    pub fn pages(&self) -> Vec<u64> {
        match self.second_page() {
            Some(second) => vec![self.first_page, second],
            None => vec![self.first_page],
        }
    }

    /// The second page, when the window needs one
    pub fn second_page(&self) -> Option<u64> {
        self.needs_second_page.then_some(self.first_page + 1)
    }

    /// Cut the caller's window out of the merged downstream records
    pub fn window<T>(&self, merged: impl IntoIterator<Item = T>) -> Vec<T> {
        merged
            .into_iter()
            .skip(self.instance_index as usize)
            .take(self.limit as usize)
            .collect()
    }
}
