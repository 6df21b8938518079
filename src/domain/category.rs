//! Domain types representing transaction categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;

/// Groups transactions for reporting. Icon and color are presentation tags only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: CategoryIcon,
    #[serde(default)]
    pub color: CategoryColor,
    #[serde(default, alias = "created_at", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Category {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            icon: CategoryIcon::default(),
            color: CategoryColor::default(),
            created_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_style(mut self, icon: CategoryIcon, color: CategoryColor) -> Self {
        self.icon = icon;
        self.color = color;
        self
    }

    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.title
    }
}

/// Closed set of icon tags. Unknown tags decode to [`CategoryIcon::Wallet`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CategoryIcon {
    #[default]
    Wallet,
    Car,
    Heart,
    Pig,
    Cart,
    Film,
    Gift,
    Fork,
    Home,
    Tool,
    Book,
    Bag,
}

impl CategoryIcon {
    pub const ALL: [CategoryIcon; 12] = [
        CategoryIcon::Wallet,
        CategoryIcon::Car,
        CategoryIcon::Heart,
        CategoryIcon::Pig,
        CategoryIcon::Cart,
        CategoryIcon::Film,
        CategoryIcon::Gift,
        CategoryIcon::Fork,
        CategoryIcon::Home,
        CategoryIcon::Tool,
        CategoryIcon::Book,
        CategoryIcon::Bag,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryIcon::Wallet => "wallet",
            CategoryIcon::Car => "car",
            CategoryIcon::Heart => "heart",
            CategoryIcon::Pig => "pig",
            CategoryIcon::Cart => "cart",
            CategoryIcon::Film => "film",
            CategoryIcon::Gift => "gift",
            CategoryIcon::Fork => "fork",
            CategoryIcon::Home => "home",
            CategoryIcon::Tool => "tool",
            CategoryIcon::Book => "book",
            CategoryIcon::Bag => "bag",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|icon| icon.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or_default()
    }
}

impl From<String> for CategoryIcon {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

/// Closed set of color tags. Unknown tags decode to [`CategoryColor::Green`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum CategoryColor {
    #[default]
    Green,
    Blue,
    Purple,
    Pink,
    Red,
    Orange,
    Yellow,
}

impl CategoryColor {
    pub const ALL: [CategoryColor; 7] = [
        CategoryColor::Green,
        CategoryColor::Blue,
        CategoryColor::Purple,
        CategoryColor::Pink,
        CategoryColor::Red,
        CategoryColor::Orange,
        CategoryColor::Yellow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryColor::Green => "green",
            CategoryColor::Blue => "blue",
            CategoryColor::Purple => "purple",
            CategoryColor::Pink => "pink",
            CategoryColor::Red => "red",
            CategoryColor::Orange => "orange",
            CategoryColor::Yellow => "yellow",
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or_default()
    }
}

impl From<String> for CategoryColor {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}
