//! Sidebar navigation.

use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// The six dashboard views, in sidebar order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum View {
    #[default]
    Calendar,
    Create,
    Queue,
    Trends,
    Analytics,
    Settings,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Calendar => "Calendar",
            View::Create => "Create Post",
            View::Queue => "Content Queue",
            View::Trends => "Trends",
            View::Analytics => "Analytics",
            View::Settings => "Settings",
        }
    }

    /// Parses a view name, falling back to [`View::Calendar`] for anything unknown.
    pub fn from_name(name: &str) -> Self {
        name.trim().parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarItem {
    pub view: View,
    pub label: &'static str,
    pub active: bool,
}

pub fn sidebar(current: View) -> Vec<SidebarItem> {
    View::iter()
        .map(|view| SidebarItem {
            view,
            label: view.label(),
            active: view == current,
        })
        .collect()
}
