//! Column labels for entity tables.
//!
//! Each [`EntityKind`] picks a [`HeaderProvider`]: a fixed label list, or
//! labels inferred from the keys of a sample record.

use ustr::Ustr;

use crate::record::FieldMap;

/// Ordered field name to display label mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(Ustr, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_static(labels: &[(&str, &str)]) -> Self {
        let mut map = Self::new();
        for (key, label) in labels {
            map.insert(key, *label);
        }
        map
    }

    /// Insert or relabel `key`. A relabelled key keeps its position.
    pub fn insert(&mut self, key: &str, label: impl Into<String>) {
        let key = Ustr::from(key);
        let label = label.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((key, label)),
        }
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, label)| label.as_str())
    }

    /// `(key, label)` pairs in column order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, label)| (key.as_str(), label.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Turn a camelCase field name into a Title Case label.
///
/// `managerEmployeeId` becomes `Manager Employee Id`. Already split labels
/// come back unchanged.
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev: Option<char> = None;
    for c in key.chars() {
        if let Some(p) = prev
            && (p.is_ascii_lowercase() || p.is_ascii_digit())
            && c.is_ascii_uppercase()
        {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_case(word: &str) -> String {
    if word.eq_ignore_ascii_case("id") {
        return "Id".to_owned();
    }
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// One label per key of `sample`, in the sample's key order.
pub fn infer_headers<M: FieldMap>(sample: &M) -> HeaderMap {
    let mut map = HeaderMap::new();
    for key in sample.field_names() {
        map.insert(key, humanize_key(key));
    }
    map
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderProvider {
    Static(&'static [(&'static str, &'static str)]),
    Inferred,
}

impl HeaderProvider {
    /// Headers for a page whose first record is `sample`.
    pub fn headers<M: FieldMap>(&self, sample: Option<&M>) -> HeaderMap {
        match self {
            Self::Static(labels) => HeaderMap::from_static(labels),
            Self::Inferred => sample.map(infer_headers).unwrap_or_default(),
        }
    }
}

pub const EMPLOYEE_HEADERS: &[(&str, &str)] = &[
    ("employeeId", "Employee Id"),
    ("firstName", "First Name"),
    ("lastName", "Last Name"),
    ("dateOfBirth", "Date Of Birth"),
    ("designation", "Designation"),
    ("gender", "Gender"),
    ("hireDate", "Hire Date"),
    ("jobStage", "Job Stage"),
    ("salary", "Salary"),
    ("managerEmployeeId", "Manager Employee Id"),
];

/// Entity collections the console can browse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Employees,
    Departments,
    Projects,
}

impl EntityKind {
    pub const ALL: [Self; 3] = [Self::Employees, Self::Departments, Self::Projects];

    /// Path segment under `/api/v1/`.
    pub fn service(self) -> &'static str {
        match self {
            Self::Employees => "employees",
            Self::Departments => "departments",
            Self::Projects => "projects",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Employees => "Employees",
            Self::Departments => "Departments",
            Self::Projects => "Projects",
        }
    }

    pub fn header_provider(self) -> HeaderProvider {
        match self {
            Self::Employees => HeaderProvider::Static(EMPLOYEE_HEADERS),
            Self::Departments | Self::Projects => HeaderProvider::Inferred,
        }
    }
}
