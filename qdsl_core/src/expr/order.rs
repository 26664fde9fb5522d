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

use super::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NullHandling {
    #[default]
    Default,
    NullsFirst,
    NullsLast,
}

/// One `ORDER BY` item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSpecifier {
    pub target: Expr,
    pub order: Order,
    pub null_handling: NullHandling,
}

impl OrderSpecifier {
    pub fn new(target: Expr, order: Order) -> Self {
        Self { target, order, null_handling: NullHandling::Default }
    }

    pub fn asc(target: Expr) -> Self {
        Self::new(target, Order::Asc)
    }

    pub fn desc(target: Expr) -> Self {
        Self::new(target, Order::Desc)
    }

    pub fn nulls_first(mut self) -> Self {
        self.null_handling = NullHandling::NullsFirst;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.null_handling = NullHandling::NullsLast;
        self
    }

    pub fn is_ascending(&self) -> bool {
        self.order == Order::Asc
    }
}
