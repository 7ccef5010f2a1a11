//! Module: request
//! Responsibility: the resolved select/expand/order-by request tree.
//! Does not own: request-text parsing, name resolution, or validation
//! against the wire grammar (the external URI/query parser does both).
//! Boundary: hand-off shape between the parser and the compiler.

pub mod predicate;

pub use predicate::{CompareOp, ComparePredicate, Predicate};

use crate::model::MemberRef;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderDirection {
    Asc,
    Desc,
}

///
/// OrderByKey
/// One ordering key: resolved member plus direction.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderByKey {
    pub member: MemberRef,
    pub direction: OrderDirection,
}

impl OrderByKey {
    #[must_use]
    pub const fn asc(member: MemberRef) -> Self {
        Self {
            member,
            direction: OrderDirection::Asc,
        }
    }

    #[must_use]
    pub const fn desc(member: MemberRef) -> Self {
        Self {
            member,
            direction: OrderDirection::Desc,
        }
    }
}

///
/// OrderBySource
///
/// What a root-level order-by member is expressed against: the raw root
/// element, or a tuple the source pipeline already produced. Members
/// expressed against a produced tuple never consume projection slots;
/// they resolve against the produced shape instead.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderBySource {
    Root,
    Tuple,
}

///
/// OrderByItem
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderByItem {
    pub key: OrderByKey,
    pub source: OrderBySource,
}

impl OrderByItem {
    /// Root-sourced ordering item (the common case).
    #[must_use]
    pub const fn root(key: OrderByKey) -> Self {
        Self {
            key,
            source: OrderBySource::Root,
        }
    }

    /// Ordering item expressed against an already-produced tuple.
    #[must_use]
    pub const fn tuple(key: OrderByKey) -> Self {
        Self {
            key,
            source: OrderBySource::Tuple,
        }
    }
}

///
/// PathSegment
///
/// One resolved segment of a select path. `Operation` covers segment
/// kinds beyond property/navigation (bound functions and the like);
/// the compiler rejects them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PathSegment {
    Property(MemberRef),
    Navigation(MemberRef),
    Operation(String),
}

impl PathSegment {
    /// Stable kind label used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Property(_) => "property",
            Self::Navigation(_) => "navigation",
            Self::Operation(_) => "operation",
        }
    }
}

///
/// SelectPath
/// Resolved path of a select item; the last segment decides its kind.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SelectPath {
    pub segments: Vec<PathSegment>,
}

impl SelectPath {
    #[must_use]
    pub fn single(segment: PathSegment) -> Self {
        Self {
            segments: vec![segment],
        }
    }

    #[must_use]
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }
}

///
/// SelectItem
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SelectItem {
    /// Explicit property (or navigation-link) selection.
    Path(SelectPath),
    /// Relationship expansion with optional scoped options.
    Expand(ExpandItem),
}

impl SelectItem {
    /// Single-segment property selection.
    #[must_use]
    pub fn property(member: MemberRef) -> Self {
        Self::Path(SelectPath::single(PathSegment::Property(member)))
    }

    /// Single-segment navigation-link selection.
    #[must_use]
    pub fn navigation(member: MemberRef) -> Self {
        Self::Path(SelectPath::single(PathSegment::Navigation(member)))
    }
}

///
/// ExpandItem
///
/// One expand request: path to the navigation member plus the scoped
/// options applied to the expanded sequence. Scoped options are
/// forwarded to the external operator builder exactly once, in the
/// fixed order filter, order-by, skip, top.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpandItem {
    pub path: SelectPath,
    pub filter: Option<Predicate>,
    pub order_by: Vec<OrderByKey>,
    pub skip: Option<u64>,
    pub top: Option<u64>,
    pub count: Option<bool>,
    pub select: Vec<SelectItem>,
}

impl ExpandItem {
    #[must_use]
    pub fn new(navigation: MemberRef) -> Self {
        Self {
            path: SelectPath::single(PathSegment::Navigation(navigation)),
            filter: None,
            order_by: Vec::new(),
            skip: None,
            top: None,
            count: None,
            select: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Predicate) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_order_by(mut self, keys: Vec<OrderByKey>) -> Self {
        self.order_by = keys;
        self
    }

    #[must_use]
    pub const fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub const fn with_top(mut self, top: u64) -> Self {
        self.top = Some(top);
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    #[must_use]
    pub fn with_select(mut self, select: Vec<SelectItem>) -> Self {
        self.select = select;
        self
    }
}

///
/// QueryRequest
///
/// Root-level resolved request. Root filter/order-by/skip/top are
/// forwarded verbatim as root directives; `select` drives the
/// projection and assembly compilation.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryRequest {
    pub select: Vec<SelectItem>,
    pub filter: Option<Predicate>,
    pub order_by: Vec<OrderByItem>,
    pub skip: Option<u64>,
    pub top: Option<u64>,
}

impl QueryRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_select(mut self, select: Vec<SelectItem>) -> Self {
        self.select = select;
        self
    }

    #[must_use]
    pub fn with_filter(mut self, filter: Predicate) -> Self {
        self.filter = Some(filter);
        self
    }

    #[must_use]
    pub fn with_order_by(mut self, order_by: Vec<OrderByItem>) -> Self {
        self.order_by = order_by;
        self
    }

    #[must_use]
    pub const fn with_skip(mut self, skip: u64) -> Self {
        self.skip = Some(skip);
        self
    }

    #[must_use]
    pub const fn with_top(mut self, top: u64) -> Self {
        self.top = Some(top);
        self
    }
}
