//! Route state for page navigation.

use std::any::Any;

use console_states::State;

use crate::headers::EntityKind;

/// Which page the console shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Route {
    /// Shown until the user signs in.
    #[default]
    Login,
    Home,
    Employees,
    Departments,
    Projects,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/",
            Self::Home => "/home",
            Self::Employees => "/employees",
            Self::Departments => "/departments",
            Self::Projects => "/projects",
        }
    }

    /// Parse a location path. Trailing slashes are ignored; unknown paths
    /// yield `None`.
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Self::Login),
            "/home" => Some(Self::Home),
            "/employees" => Some(Self::Employees),
            "/departments" => Some(Self::Departments),
            "/projects" => Some(Self::Projects),
            _ => None,
        }
    }

    pub fn entity(self) -> Option<EntityKind> {
        match self {
            Self::Employees => Some(EntityKind::Employees),
            Self::Departments => Some(EntityKind::Departments),
            Self::Projects => Some(EntityKind::Projects),
            Self::Login | Self::Home => None,
        }
    }

    pub fn requires_session(self) -> bool {
        self != Self::Login
    }
}

impl From<EntityKind> for Route {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::Employees => Self::Employees,
            EntityKind::Departments => Self::Departments,
            EntityKind::Projects => Self::Projects,
        }
    }
}

impl State for Route {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
