//! The fixed set of activity categories and how each one is presented.

use serde::Serialize;
use std::fmt;

use crate::entry::EntryId;

/// Semantic type of a log entry. Discriminants are the wire codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    IssueCreated = 0,
    IssueUpdated = 1,
    IssueDeleted = 2,
    IssueCommented = 3,
    NotesEdited = 4,
    SettingsEdited = 5,
    TeamCreated = 6,
    UserJoined = 7,
    UserLeft = 8,
    UserKicked = 9,
    UserBanned = 10,
    PrivilegeChanged = 11,
    IssueCompleted = 12,
    SprintCompleted = 13,
}

impl Category {
    pub const ALL: [Category; 14] = [
        Category::IssueCreated,
        Category::IssueUpdated,
        Category::IssueDeleted,
        Category::IssueCommented,
        Category::NotesEdited,
        Category::SettingsEdited,
        Category::TeamCreated,
        Category::UserJoined,
        Category::UserLeft,
        Category::UserKicked,
        Category::UserBanned,
        Category::PrivilegeChanged,
        Category::IssueCompleted,
        Category::SprintCompleted,
    ];

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u32 {
        self as u32
    }

    /// Label of the category in the type selector.
    pub fn label(self) -> &'static str {
        match self {
            Category::IssueCreated => "Issues created",
            Category::IssueUpdated => "Issues updated",
            Category::IssueDeleted => "Issues deleted",
            Category::IssueCommented => "Issue comments",
            Category::NotesEdited => "Team notes edited",
            Category::SettingsEdited => "Team settings edited",
            Category::TeamCreated => "Team created",
            Category::UserJoined => "Users joining",
            Category::UserLeft => "Users leaving",
            Category::UserKicked => "Users kicked",
            Category::UserBanned => "Users banned",
            Category::PrivilegeChanged => "User privileges changed",
            Category::IssueCompleted => "Issues completed",
            Category::SprintCompleted => "Sprints completed",
        }
    }

    pub fn presentation(self) -> Presentation {
        let (icon, color) = match self {
            Category::IssueCreated => (Icon::PullRequest, Rgb(0x7c, 0x67, 0xf9)),
            Category::IssueUpdated => (Icon::PullRequest, Rgb(0x51, 0xbb, 0x66)),
            Category::IssueDeleted => (Icon::PullRequest, Rgb(0xde, 0x45, 0x45)),
            Category::IssueCommented => (Icon::Pushpin, Rgb(0x41, 0x5a, 0xc1)),
            Category::NotesEdited => (Icon::Container, Rgb(0x24, 0xd4, 0x81)),
            Category::SettingsEdited => (Icon::Setting, Rgb(0xfc, 0x80, 0xb9)),
            Category::TeamCreated => (Icon::Team, Rgb(0xec, 0x86, 0x4f)),
            Category::UserJoined => (Icon::UserAdd, Rgb(0xb8, 0x5f, 0xc5)),
            Category::UserLeft => (Icon::UserDelete, Rgb(0x3b, 0xbd, 0xbb)),
            Category::UserKicked => (Icon::UserDelete, Rgb(0xfe, 0xbf, 0x35)),
            Category::UserBanned => (Icon::UserDelete, Rgb(0xad, 0x48, 0x48)),
            Category::PrivilegeChanged => (Icon::User, Rgb(0xbd, 0x9c, 0x63)),
            Category::IssueCompleted => (Icon::Check, Rgb(0x8a, 0xa9, 0x53)),
            Category::SprintCompleted => (Icon::Smile, Rgb(0x55, 0x86, 0x58)),
        };
        Presentation { icon, color }
    }

    /// Where entries of this category lead. Categories describing something
    /// that no longer exists (or a whole team) have no route.
    pub fn route(self) -> Option<Route> {
        match self {
            Category::IssueCreated | Category::IssueUpdated | Category::IssueCommented => {
                Some(Route::Issue)
            }
            Category::NotesEdited => Some(Route::Notes),
            Category::SettingsEdited => Some(Route::Settings),
            Category::UserJoined
            | Category::UserLeft
            | Category::UserKicked
            | Category::UserBanned
            | Category::PrivilegeChanged => Some(Route::Members),
            Category::IssueDeleted
            | Category::TeamCreated
            | Category::IssueCompleted
            | Category::SprintCompleted => None,
        }
    }

    pub fn is_navigable(self) -> bool {
        self.route().is_some()
    }

    pub fn navigation(self, issue_id: Option<&EntryId>) -> Option<NavTarget> {
        self.route().and_then(|route| route.target(issue_id))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Icon and color of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Presentation {
    pub icon: Icon,
    pub color: Rgb,
}

impl Presentation {
    /// Presentation of codes past the category table.
    pub const FALLBACK: Presentation = Presentation {
        icon: Icon::Pushpin,
        color: Rgb(0xa7, 0xa4, 0xa4),
    };

    pub fn for_code(code: u32) -> Self {
        Category::from_code(code)
            .map(Category::presentation)
            .unwrap_or(Self::FALLBACK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    PullRequest,
    Pushpin,
    Container,
    Setting,
    Team,
    UserAdd,
    UserDelete,
    User,
    Check,
    Smile,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::PullRequest => "pull-request",
            Icon::Pushpin => "pushpin",
            Icon::Container => "container",
            Icon::Setting => "setting",
            Icon::Team => "team",
            Icon::UserAdd => "user-add",
            Icon::UserDelete => "user-delete",
            Icon::User => "user",
            Icon::Check => "check",
            Icon::Smile => "smile",
        }
    }

    /// Single-width glyph used by the terminal console.
    pub fn glyph(&self) -> char {
        match self {
            Icon::PullRequest => '⇅',
            Icon::Pushpin => '•',
            Icon::Container => '▤',
            Icon::Setting => '⚙',
            Icon::Team => '☰',
            Icon::UserAdd => '+',
            Icon::UserDelete => '−',
            Icon::User => '☺',
            Icon::Check => '✓',
            Icon::Smile => '★',
        }
    }
}

impl Serialize for Icon {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// 24-bit color, serialized as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Navigation target builder attached to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Issue,
    Notes,
    Settings,
    Members,
}

impl Route {
    pub fn target(self, issue_id: Option<&EntryId>) -> Option<NavTarget> {
        match self {
            Route::Issue => issue_id.cloned().map(NavTarget::Issue),
            Route::Notes => Some(NavTarget::Notes),
            Route::Settings => Some(NavTarget::Settings),
            Route::Members => Some(NavTarget::Members),
        }
    }
}

/// A concrete place in the dashboard an entry links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    Issue(EntryId),
    Notes,
    Settings,
    Members,
}

impl NavTarget {
    pub fn path(&self) -> String {
        match self {
            NavTarget::Issue(id) => format!("/dashboard/issue/{}", id),
            NavTarget::Notes => "/dashboard/notes".to_string(),
            NavTarget::Settings => "/dashboard/settings".to_string(),
            NavTarget::Members => "/dashboard/members".to_string(),
        }
    }
}

impl fmt::Display for NavTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for NavTarget {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.path())
    }
}
