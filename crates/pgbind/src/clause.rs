//! Composable SQL clause values.
//!
//! Every clause renders a SQL fragment and independently tracks the named
//! arguments it references, so argument maps compose by plain union no
//! matter how deeply clauses nest. Fragments use `{name}` placeholders and
//! stay unresolved until [`crate::render::render`] binds them for a dialect.
//!
//! # Example
//! ```ignore
//! use pgbind::{Cond, Or, Where};
//!
//! let filter = Where::new()
//!     .clause(Or::new()
//!         .clause(Cond::new().bind("id", 699_i64))
//!         .clause(Cond::new().bind("key", "search-key")));
//!
//! assert_eq!(filter.render(), "WHERE (((id = {id}) OR (key = {key})))");
//! ```

use crate::value::{ArgMap, SqlArg};
use tokio_postgres::types::ToSql;

/// Reserved argument name used by [`Limit`].
pub const LIMIT_ARG: &str = "__LIMIT__";

/// A child of a boolean clause: raw SQL text or a nested clause node.
#[derive(Debug, Clone)]
pub enum CondItem {
    /// Raw fragment, contributes no arguments.
    Raw(String),
    /// Nested node, contributes its collected arguments.
    Node(Clause),
}

/// Shared body of the boolean clauses.
///
/// Children are ordered; order is irrelevant to the boolean semantics but
/// fixed so output is deterministic.
#[derive(Debug, Clone, Default)]
struct CondSet {
    items: Vec<CondItem>,
    binds: ArgMap,
}

impl CondSet {
    fn push_expr(&mut self, raw: impl Into<String>) {
        self.items.push(CondItem::Raw(raw.into()));
    }

    fn push_clause(&mut self, node: impl Into<Clause>) {
        self.items.push(CondItem::Node(node.into()));
    }

    fn bind_arg(&mut self, name: impl Into<String>, arg: SqlArg) {
        self.binds.insert_arg(name, arg);
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty() && self.binds.is_empty()
    }

    /// Child fragments; with no explicit children, falls back to one
    /// `name = {name}` shorthand per named value.
    fn fragments(&self) -> Vec<String> {
        if self.items.is_empty() {
            self.binds
                .names()
                .map(|name| format!("{name} = {{{name}}}"))
                .collect()
        } else {
            self.items
                .iter()
                .map(|item| match item {
                    CondItem::Raw(raw) => raw.clone(),
                    CondItem::Node(node) => node.render(),
                })
                .collect()
        }
    }

    fn render_joined(&self, sep: &str) -> String {
        format!("({})", self.fragments().join(sep))
    }

    /// Own named values unioned with every nested node's arguments.
    fn args(&self) -> ArgMap {
        let mut args = self.binds.clone();
        for item in &self.items {
            if let CondItem::Node(node) = item {
                args.merge(node.args());
            }
        }
        args
    }
}

macro_rules! boolean_clause_methods {
    () => {
        /// Add a raw SQL fragment as a child condition.
        pub fn expr(mut self, raw: impl Into<String>) -> Self {
            self.0.push_expr(raw);
            self
        }

        /// Add a nested clause as a child condition.
        pub fn clause(mut self, node: impl Into<Clause>) -> Self {
            self.0.push_clause(node);
            self
        }

        /// Register a named value; with no explicit child conditions this
        /// also synthesizes the `name = {name}` shorthand.
        pub fn bind<T>(mut self, name: impl Into<String>, value: T) -> Self
        where
            T: ToSql + Sync + Send + 'static,
        {
            self.0.bind_arg(name, SqlArg::value(value));
            self
        }

        /// [`bind`](Self::bind) accepting a pre-built or verbatim argument.
        pub fn bind_arg(mut self, name: impl Into<String>, arg: impl Into<SqlArg>) -> Self {
            self.0.bind_arg(name, arg.into());
            self
        }

        /// Whether this clause has no children and no named values.
        pub fn is_empty(&self) -> bool {
            self.0.is_empty()
        }

        /// Collect the named arguments of this clause and all nested nodes.
        pub fn args(&self) -> ArgMap {
            self.0.args()
        }
    };
}

// ==================== Boolean clauses ====================

/// Leaf condition: raw fragments and/or `name = {name}` equality shorthands,
/// joined by `AND` in parentheses.
#[derive(Debug, Clone, Default)]
pub struct Cond(CondSet);

impl Cond {
    /// Create an empty condition.
    pub fn new() -> Self {
        Self::default()
    }

    boolean_clause_methods!();

    /// Render to a parenthesized `AND`-joined fragment.
    pub fn render(&self) -> String {
        self.0.render_joined(" AND ")
    }
}

/// Conjunction of child conditions: `(c1 AND c2 AND ...)`.
///
/// An empty `And` renders the canonical empty form `()`; callers that need
/// "no condition at all" use [`Where`], which collapses to nothing.
#[derive(Debug, Clone, Default)]
pub struct And(CondSet);

impl And {
    /// Create an empty conjunction.
    pub fn new() -> Self {
        Self::default()
    }

    boolean_clause_methods!();

    /// Render to `(c1 AND c2 AND ...)`.
    pub fn render(&self) -> String {
        self.0.render_joined(" AND ")
    }
}

/// Disjunction of child conditions: `(c1 OR c2 OR ...)`.
#[derive(Debug, Clone, Default)]
pub struct Or(CondSet);

impl Or {
    /// Create an empty disjunction.
    pub fn new() -> Self {
        Self::default()
    }

    boolean_clause_methods!();

    /// Render to `(c1 OR c2 OR ...)`.
    pub fn render(&self) -> String {
        self.0.render_joined(" OR ")
    }
}

/// `WHERE` clause wrapping an implicit [`And`].
///
/// Renders the empty string when it holds no conditions at all, so a query
/// with no filter omits the `WHERE` keyword entirely instead of emitting
/// `WHERE ()`.
#[derive(Debug, Clone, Default)]
pub struct Where(And);

impl Where {
    /// Create an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw SQL fragment as a child condition.
    pub fn expr(mut self, raw: impl Into<String>) -> Self {
        self.0 = self.0.expr(raw);
        self
    }

    /// Add a nested clause as a child condition.
    pub fn clause(mut self, node: impl Into<Clause>) -> Self {
        self.0 = self.0.clause(node);
        self
    }

    /// Register a named value; with no explicit child conditions this also
    /// synthesizes the `name = {name}` shorthand.
    pub fn bind<T>(mut self, name: impl Into<String>, value: T) -> Self
    where
        T: ToSql + Sync + Send + 'static,
    {
        self.0 = self.0.bind(name, value);
        self
    }

    /// [`bind`](Self::bind) accepting a pre-built or verbatim argument.
    pub fn bind_arg(mut self, name: impl Into<String>, arg: impl Into<SqlArg>) -> Self {
        self.0 = self.0.bind_arg(name, arg);
        self
    }

    /// Whether the filter holds no conditions and no named values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render to `WHERE (...)`, or the empty string when empty.
    pub fn render(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.0.render())
        }
    }

    /// Collect the named arguments of the wrapped conditions.
    pub fn args(&self) -> ArgMap {
        self.0.args()
    }
}

// ==================== Text-only clauses ====================

/// Text-only `SELECT` list fragment.
#[derive(Debug, Clone, Default)]
pub struct Select {
    exprs: Vec<String>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a select-list expression.
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.exprs.push(expr.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn render(&self) -> String {
        if self.exprs.is_empty() {
            String::new()
        } else {
            format!("SELECT {}", self.exprs.join(", "))
        }
    }

    pub fn args(&self) -> ArgMap {
        ArgMap::new()
    }
}

/// Text-only `FROM` fragment.
#[derive(Debug, Clone)]
pub struct FromTable {
    table: String,
}

impl FromTable {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
        }
    }

    pub fn render(&self) -> String {
        format!("FROM {}", self.table)
    }

    pub fn args(&self) -> ArgMap {
        ArgMap::new()
    }
}

/// `GROUP BY` over raw text expressions; contributes no arguments.
#[derive(Debug, Clone, Default)]
pub struct GroupBy {
    exprs: Vec<String>,
}

impl GroupBy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a grouping expression.
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.exprs.push(expr.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn render(&self) -> String {
        if self.exprs.is_empty() {
            String::new()
        } else {
            format!("GROUP BY {}", self.exprs.join(", "))
        }
    }

    pub fn args(&self) -> ArgMap {
        ArgMap::new()
    }
}

/// `ORDER BY` over raw text expressions; contributes no arguments.
#[derive(Debug, Clone, Default)]
pub struct OrderBy {
    exprs: Vec<String>,
}

impl OrderBy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ordering expression (e.g. `"created_at DESC"`).
    pub fn expr(mut self, expr: impl Into<String>) -> Self {
        self.exprs.push(expr.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exprs.is_empty()
    }

    pub fn render(&self) -> String {
        if self.exprs.is_empty() {
            String::new()
        } else {
            format!("ORDER BY {}", self.exprs.join(", "))
        }
    }

    pub fn args(&self) -> ArgMap {
        ArgMap::new()
    }
}

/// `LIMIT` clause bound through the reserved [`LIMIT_ARG`] argument.
///
/// An absent bound renders nothing and contributes no argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Limit(Option<i64>);

impl Limit {
    /// Limit to `n` rows.
    pub fn new(n: i64) -> Self {
        Limit(Some(n))
    }

    /// No limit.
    pub fn none() -> Self {
        Limit(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn render(&self) -> String {
        match self.0 {
            Some(_) => format!("LIMIT {{{LIMIT_ARG}}}"),
            None => String::new(),
        }
    }

    pub fn args(&self) -> ArgMap {
        match self.0 {
            Some(n) => ArgMap::new().with(LIMIT_ARG, n),
            None => ArgMap::new(),
        }
    }
}

// ==================== Clause sum type ====================

/// Sum over the clause kinds; composition is structural (variants contain
/// other variants through [`CondItem::Node`]).
#[derive(Debug, Clone)]
pub enum Clause {
    Cond(Cond),
    And(And),
    Or(Or),
    Where(Where),
    Select(Select),
    From(FromTable),
    GroupBy(GroupBy),
    OrderBy(OrderBy),
    Limit(Limit),
}

impl Clause {
    /// Render this node to a SQL fragment.
    pub fn render(&self) -> String {
        match self {
            Clause::Cond(c) => c.render(),
            Clause::And(c) => c.render(),
            Clause::Or(c) => c.render(),
            Clause::Where(c) => c.render(),
            Clause::Select(c) => c.render(),
            Clause::From(c) => c.render(),
            Clause::GroupBy(c) => c.render(),
            Clause::OrderBy(c) => c.render(),
            Clause::Limit(c) => c.render(),
        }
    }

    /// Collect the named arguments of this node and all nested nodes.
    pub fn args(&self) -> ArgMap {
        match self {
            Clause::Cond(c) => c.args(),
            Clause::And(c) => c.args(),
            Clause::Or(c) => c.args(),
            Clause::Where(c) => c.args(),
            Clause::Select(c) => c.args(),
            Clause::From(c) => c.args(),
            Clause::GroupBy(c) => c.args(),
            Clause::OrderBy(c) => c.args(),
            Clause::Limit(c) => c.args(),
        }
    }
}

impl From<Cond> for Clause {
    fn from(c: Cond) -> Self {
        Clause::Cond(c)
    }
}

impl From<And> for Clause {
    fn from(c: And) -> Self {
        Clause::And(c)
    }
}

impl From<Or> for Clause {
    fn from(c: Or) -> Self {
        Clause::Or(c)
    }
}

impl From<Where> for Clause {
    fn from(c: Where) -> Self {
        Clause::Where(c)
    }
}

impl From<Select> for Clause {
    fn from(c: Select) -> Self {
        Clause::Select(c)
    }
}

impl From<FromTable> for Clause {
    fn from(c: FromTable) -> Self {
        Clause::From(c)
    }
}

impl From<GroupBy> for Clause {
    fn from(c: GroupBy) -> Self {
        Clause::GroupBy(c)
    }
}

impl From<OrderBy> for Clause {
    fn from(c: OrderBy) -> Self {
        Clause::OrderBy(c)
    }
}

impl From<Limit> for Clause {
    fn from(c: Limit) -> Self {
        Clause::Limit(c)
    }
}
