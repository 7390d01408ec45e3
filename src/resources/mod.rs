/*!
Declarative resource catalog.

Each platform resource is one `ResourceSpec` value: its JSON:API type and
path, the verbs it supports, the list filters it understands, how a resource
object projects into a flat display row, which row fields make up the table,
and which flags a write command accepts. The generic list / show / create /
update / delete commands are driven entirely by these values.

Key items:
  ResourceSpec / Verb
  Filter / FilterKind          (list query flags)
  Field / Source / AttrKind    (row projection)
  Column                       (table layout)
  Input / Target / InputKind   (write flags)
  registry::all / registry::find
*/

pub mod field_ops;
pub mod jobs;
pub mod organizations;
pub mod registry;
pub mod tenders;

/* ---- Resource ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    List,
    Show,
    Create,
    Update,
    Delete,
}

impl Verb {
    pub const READ: &'static [Verb] = &[Verb::List, Verb::Show];
    pub const ALL: &'static [Verb] = &[
        Verb::List,
        Verb::Show,
        Verb::Create,
        Verb::Update,
        Verb::Delete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Verb::List => "list",
            Verb::Show => "show",
            Verb::Create => "create",
            Verb::Update => "update",
            Verb::Delete => "delete",
        }
    }

    pub fn is_write(self) -> bool {
        matches!(self, Verb::Create | Verb::Update | Verb::Delete)
    }
}

#[derive(Debug)]
pub struct ResourceSpec {
    /// JSON:API type; also the CLI name.
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub singular: &'static str,
    pub plural: &'static str,
    pub about: &'static str,
    pub path: &'static str,
    pub verbs: &'static [Verb],
    pub default_sort: Option<&'static str>,
    pub include: &'static [&'static str],
    /// Sparse fieldsets as `(type, "attr,attr")`.
    pub fieldsets: &'static [(&'static str, &'static str)],
    pub filters: &'static [Filter],
    pub fields: &'static [Field],
    pub columns: &'static [Column],
    pub inputs: &'static [Input],
}

impl ResourceSpec {
    pub fn supports(&self, verb: Verb) -> bool {
        self.verbs.contains(&verb)
    }

    pub fn matches(&self, name: &str) -> bool {
        self.name == name || self.aliases.contains(&name)
    }

    pub fn field(&self, name: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, crate::api::path_segment(id))
    }
}

/* ---- Filters ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// `--flag VALUE` -> `filter[param]=VALUE`
    Value,
    /// `--flag` -> `filter[param]=true`
    Switch,
}

#[derive(Debug)]
pub struct Filter {
    pub flag: &'static str,
    pub param: &'static str,
    pub help: &'static str,
    pub kind: FilterKind,
}

impl Filter {
    pub const fn value(flag: &'static str, param: &'static str, help: &'static str) -> Self {
        Self {
            flag,
            param,
            help,
            kind: FilterKind::Value,
        }
    }

    /// Flag and query parameter share the same name.
    pub const fn same(flag: &'static str, help: &'static str) -> Self {
        Self::value(flag, flag, help)
    }

    pub const fn switch(flag: &'static str, param: &'static str, help: &'static str) -> Self {
        Self {
            flag,
            param,
            help,
            kind: FilterKind::Switch,
        }
    }

    pub fn query_key(&self) -> String {
        format!("filter[{}]", self.param)
    }
}

/* ---- Row Projection ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrKind {
    Text,
    Bool,
    /// Two-decimal display; numeric strings accepted.
    Decimal,
    Integer,
    DateTime,
    Date,
    List,
    /// Passed through untouched (objects, arrays of objects).
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefStyle {
    /// `brokers|42`
    Pipe,
    /// `brokers (42)`
    Paren,
}

#[derive(Debug)]
pub enum Source {
    Id,
    Attr(&'static str, AttrKind),
    /// To-one relationship id.
    RelId(&'static str),
    /// Ordered to-many relationship ids.
    RelIds(&'static str),
    /// Target type of a (usually polymorphic) to-one relationship.
    RelType(&'static str),
    /// Type and id of a to-one relationship as one string.
    RelRef(&'static str, RefStyle),
    /// First non-blank of `attrs` on the included target of `rel`.
    Joined {
        rel: &'static str,
        attrs: &'static [&'static str],
    },
    /// The first of `rels` (with its label attrs) holding an id. Yields that
    /// id, or with `label` set the label joined through the same relationship.
    FallbackRel {
        rels: &'static [(&'static str, &'static [&'static str])],
        label: bool,
    },
}

#[derive(Debug)]
pub struct Field {
    /// Row key (snake_case).
    pub name: &'static str,
    pub source: Source,
    /// Drop the key from the row when the value is empty.
    pub omit_empty: bool,
}

impl Field {
    pub const fn new(name: &'static str, source: Source) -> Self {
        Self {
            name,
            source,
            omit_empty: false,
        }
    }

    pub const fn optional(mut self) -> Self {
        self.omit_empty = true;
        self
    }

    pub const fn text(name: &'static str, attr: &'static str) -> Self {
        Self::new(name, Source::Attr(attr, AttrKind::Text))
    }

    pub const fn attr(name: &'static str, attr: &'static str, kind: AttrKind) -> Self {
        Self::new(name, Source::Attr(attr, kind))
    }

    pub const fn rel_id(name: &'static str, rel: &'static str) -> Self {
        Self::new(name, Source::RelId(rel))
    }

    pub const fn joined(name: &'static str, rel: &'static str, attrs: &'static [&'static str]) -> Self {
        Self::new(name, Source::Joined { rel, attrs })
    }

    /// Display kind used when rendering table cells and detail views.
    pub fn display_kind(&self) -> AttrKind {
        match &self.source {
            Source::Attr(_, kind) => *kind,
            Source::RelIds(_) => AttrKind::List,
            _ => AttrKind::Text,
        }
    }
}

#[derive(Debug)]
pub struct Column {
    pub header: &'static str,
    /// Row keys tried in order; the first non-empty value is shown.
    pub fields: &'static [&'static str],
    /// Cell truncation limit in characters.
    pub max_width: Option<usize>,
}

impl Column {
    pub const fn new(header: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            header,
            fields,
            max_width: None,
        }
    }

    pub const fn max(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/* ---- Write Inputs ---- */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    /// `true` / `false`
    Bool,
    Integer,
    /// Validated as a number, sent as the string given.
    Number,
    /// Comma separated -> JSON array of strings.
    List,
    /// Parsed JSON value.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Attr(&'static str, InputKind),
    ToOne {
        rel: &'static str,
        kind: &'static str,
    },
    /// Comma separated ids.
    ToMany {
        rel: &'static str,
        kind: &'static str,
    },
    /// Type half of a polymorphic to-one pair.
    PolyType { rel: &'static str },
    /// Id half of a polymorphic to-one pair.
    PolyId { rel: &'static str },
}

#[derive(Debug)]
pub struct Input {
    pub flag: &'static str,
    pub target: Target,
    pub help: &'static str,
    /// Checked on create only.
    pub required: bool,
    pub choices: &'static [&'static str],
    pub default: Option<&'static str>,
}

impl Input {
    pub const fn new(flag: &'static str, target: Target, help: &'static str) -> Self {
        Self {
            flag,
            target,
            help,
            required: false,
            choices: &[],
            default: None,
        }
    }

    /// Text attribute whose key equals the flag name.
    pub const fn text(flag: &'static str, help: &'static str) -> Self {
        Self::new(flag, Target::Attr(flag, InputKind::Text), help)
    }

    pub const fn attr(flag: &'static str, kind: InputKind, help: &'static str) -> Self {
        Self::new(flag, Target::Attr(flag, kind), help)
    }

    pub const fn to_one(flag: &'static str, kind: &'static str, help: &'static str) -> Self {
        Self::new(flag, Target::ToOne { rel: flag, kind }, help)
    }

    pub const fn to_many(flag: &'static str, kind: &'static str, help: &'static str) -> Self {
        Self::new(flag, Target::ToMany { rel: flag, kind }, help)
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    pub const fn default_value(mut self, value: &'static str) -> Self {
        self.default = Some(value);
        self
    }
}
