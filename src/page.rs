/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */

//!
//! Zero-based paging.
//!

use serde::Serialize;
use crate::errors::Result;

/// Page number (zero based) and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    size: u64,
}

impl PageRequest {
    /// A size of 0 is raised to 1, since an empty page can never advance.
    pub fn of(page: u64, size: u64) -> Self {
        PageRequest { page, size: size.max(1) }
    }

    pub fn page_number(&self) -> u64 {
        self.page
    }

    pub fn page_size(&self) -> u64 {
        self.size
    }

    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    number: u64,
    size: u64,
    total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, pageable: PageRequest, total_elements: u64) -> Self {
        Page {
            content,
            number: pageable.page_number(),
            size: pageable.page_size(),
            total_elements,
        }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements
    }

    pub fn total_pages(&self) -> u64 {
        self.total_elements.div_ceil(self.size)
    }

    pub fn has_next(&self) -> bool {
        self.number.saturating_add(1) < self.total_pages()
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}

/// Builds pages whose total comes from a separate count query.
pub struct PageableExecution;

impl PageableExecution {
    /// Runs `count` only when the total cannot be derived from `content`:
    /// a first page shorter than the page size, or a non-empty page shorter
    /// than the page size, already tells the total.
    pub fn get_page<T, F>(content: Vec<T>, pageable: PageRequest, count: F) -> Result<Page<T>>
    where
        F: FnOnce() -> Result<u64>,
    {
        let len = content.len() as u64;
        if pageable.offset() == 0 {
            if pageable.page_size() > len {
                return Ok(Page::new(content, pageable, len));
            }
            let total = count()?;
            return Ok(Page::new(content, pageable, total));
        }
        if len != 0 && pageable.page_size() > len {
            let total = pageable.offset().saturating_add(len);
            return Ok(Page::new(content, pageable, total));
        }
        let total = count()?;
        Ok(Page::new(content, pageable, total))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use super::*;

    #[test]
    fn short_first_page_skips_count() {
        let called = Cell::new(false);
        let page = PageableExecution::get_page(vec![1, 2], PageRequest::of(0, 3), || {
            called.set(true);
            Ok(100)
        }).unwrap();
        assert!(!called.get());
        assert_eq!(page.total_elements(), 2);
        assert!(page.is_last());
    }

    #[test]
    fn short_last_page_derives_total() {
        let called = Cell::new(false);
        let page = PageableExecution::get_page(vec![7], PageRequest::of(1, 3), || {
            called.set(true);
            Ok(100)
        }).unwrap();
        assert!(!called.get());
        assert_eq!(page.total_elements(), 4);
        assert_eq!(page.total_pages(), 2);
    }

    #[test]
    fn full_page_runs_count() {
        let page = PageableExecution::get_page(vec![1, 2, 3], PageRequest::of(0, 3), || Ok(4)).unwrap();
        assert_eq!(page.total_elements(), 4);
        assert!(page.has_next());
        let empty: Page<i32> = PageableExecution::get_page(Vec::new(), PageRequest::of(5, 3), || Ok(4)).unwrap();
        assert_eq!(empty.total_elements(), 4);
        assert_eq!(empty.map(|v| v * 2).number(), 5);
    }

    #[test]
    fn huge_page_numbers_saturate() {
        let request = PageRequest::of(u64::MAX, 20);
        assert_eq!(request.offset(), u64::MAX);
        let page = PageableExecution::get_page(vec![1], request, || Ok(0)).unwrap();
        assert_eq!(page.total_elements(), u64::MAX);
    }

    #[test]
    fn zero_size_is_raised_to_one() {
        let request = PageRequest::of(3, 0);
        assert_eq!(request.page_size(), 1);
        assert_eq!(request.offset(), 3);
    }
}
