//! Response envelopes shared by module handlers.
//!
//! Single resources are returned as `{ "data": ... }` and collections as
//! `{ "data": [...], "meta": { "count": n } }`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{ "data": [...], "meta": { "count": n } }` envelope.
///
/// `meta.count` is derived from `data` on construction, so the two can never
/// disagree.
#[derive(Debug, Serialize)]
pub struct CollectionResponse<T: Serialize> {
    data: Vec<T>,
    meta: CollectionMeta,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CollectionMeta {
    pub count: usize,
}

impl<T: Serialize> CollectionResponse<T> {
    pub fn new(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            data,
            meta: CollectionMeta { count },
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn meta(&self) -> CollectionMeta {
        self.meta
    }
}

impl<T: Serialize> From<Vec<T>> for CollectionResponse<T> {
    fn from(data: Vec<T>) -> Self {
        Self::new(data)
    }
}
