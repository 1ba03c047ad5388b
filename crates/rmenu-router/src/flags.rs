//! Route type flags
//!
//! A route's `type` is a bitmask of capabilities. The individual bits are
//! rarely used on their own; declarations normally pick one of the presets
//! (`NORMAL_ITEM`, `CALLBACK`, `LOCAL_TASK`, `DEFAULT_LOCAL_TASK`, ...).
//!
//! # Examples
//!
//! ```
//! use rmenu_router::MenuType;
//!
//! let ty = MenuType::DEFAULT_LOCAL_TASK;
//! assert!(ty.is_local_task());
//! assert!(ty.links_to_parent());
//! assert!(!ty.is_local_action());
//! ```
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

bitflags::bitflags! {
    /// Capability bits of a declared route.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct MenuType: u32 {
        /// Top level of a menu tree.
        const IS_ROOT = 0x0001;
        /// Shown in menu trees.
        const VISIBLE_IN_TREE = 0x0002;
        /// Shown in breadcrumbs.
        const VISIBLE_IN_BREADCRUMB = 0x0004;
        /// Links to its parent path instead of its own.
        const LINKS_TO_PARENT = 0x0008;
        /// Disabled until an administrator enables it.
        const SUGGESTED = 0x0010;
        /// Changed through the administration UI.
        const MODIFIED_BY_ADMIN = 0x0020;
        /// Created through the administration UI.
        const CREATED_BY_ADMIN = 0x0040;
        /// Rendered as a tab under its parent.
        const IS_LOCAL_TASK = 0x0080;
        /// Rendered as an action link under its parent.
        const IS_LOCAL_ACTION = 0x0100;

        /// Regular menu item.
        const NORMAL_ITEM = Self::VISIBLE_IN_TREE.bits() | Self::VISIBLE_IN_BREADCRUMB.bits();
        /// Plain path registration without a menu link.
        const CALLBACK = Self::VISIBLE_IN_BREADCRUMB.bits();
        /// Menu item shown only after an administrator enables it.
        const SUGGESTED_ITEM = Self::VISIBLE_IN_BREADCRUMB.bits() | Self::SUGGESTED.bits();
        /// Secondary tab.
        const LOCAL_TASK = Self::IS_LOCAL_TASK.bits() | Self::VISIBLE_IN_BREADCRUMB.bits();
        /// Tab representing the parent page itself.
        const DEFAULT_LOCAL_TASK = Self::IS_LOCAL_TASK.bits()
            | Self::LINKS_TO_PARENT.bits()
            | Self::VISIBLE_IN_BREADCRUMB.bits();
        /// Action link.
        const LOCAL_ACTION = Self::IS_LOCAL_TASK.bits()
            | Self::IS_LOCAL_ACTION.bits()
            | Self::VISIBLE_IN_BREADCRUMB.bits();
    }
}

impl Default for MenuType {
    fn default() -> Self {
        MenuType::NORMAL_ITEM
    }
}

impl MenuType {
    /// Whether the route shows up in breadcrumbs
    pub fn is_visible(self) -> bool {
        self.contains(MenuType::VISIBLE_IN_BREADCRUMB)
    }

    /// Whether the route is a tab (local task or local action)
    pub fn is_local_task(self) -> bool {
        self.contains(MenuType::IS_LOCAL_TASK)
    }

    /// Whether the route is an action link
    pub fn is_local_action(self) -> bool {
        self.contains(MenuType::IS_LOCAL_ACTION)
    }

    /// Whether the route links to its parent (default tab)
    pub fn links_to_parent(self) -> bool {
        self.contains(MenuType::LINKS_TO_PARENT)
    }

    /// Looks up a preset by name
    ///
    /// Accepts both the bare preset name (`local_task`) and the constant
    /// spelling (`MENU_LOCAL_TASK`), case-insensitively.
    ///
    /// ```
    /// use rmenu_router::MenuType;
    ///
    /// assert_eq!(MenuType::from_preset("callback"), Some(MenuType::CALLBACK));
    /// assert_eq!(MenuType::from_preset("MENU_LOCAL_ACTION"), Some(MenuType::LOCAL_ACTION));
    /// assert_eq!(MenuType::from_preset("tab"), None);
    /// ```
    pub fn from_preset(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        let bare = lower.strip_prefix("menu_").unwrap_or(&lower);

        match bare {
            "normal_item" => Some(MenuType::NORMAL_ITEM),
            "callback" => Some(MenuType::CALLBACK),
            "suggested_item" => Some(MenuType::SUGGESTED_ITEM),
            "local_task" => Some(MenuType::LOCAL_TASK),
            "default_local_task" => Some(MenuType::DEFAULT_LOCAL_TASK),
            "local_action" => Some(MenuType::LOCAL_ACTION),
            _ => None,
        }
    }
}

impl Serialize for MenuType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for MenuType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MenuTypeVisitor;

        impl<'de> Visitor<'de> for MenuTypeVisitor {
            type Value = MenuType;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a route type bitmask or preset name")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<MenuType, E> {
                u32::try_from(value)
                    .map(MenuType::from_bits_retain)
                    .map_err(|_| E::custom(format!("route type {value} out of range")))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<MenuType, E> {
                u64::try_from(value)
                    .map_err(|_| E::custom(format!("negative route type {value}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<MenuType, E> {
                MenuType::from_preset(value)
                    .ok_or_else(|| E::custom(format!("unknown route type preset '{value}'")))
            }
        }

        deserializer.deserialize_any(MenuTypeVisitor)
    }
}

/// Where a route's tab may be rendered
///
/// Serialized as its integer value (`0`, `1`, `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MenuContext {
    /// Not rendered as a tab anywhere.
    None,
    /// Rendered in the page's tab set.
    #[default]
    Page,
    /// Rendered inline only; never collected into tab sets.
    Inline,
}

impl MenuContext {
    /// Integer representation
    pub fn as_int(self) -> u8 {
        match self {
            MenuContext::None => 0,
            MenuContext::Page => 1,
            MenuContext::Inline => 2,
        }
    }
}

impl Serialize for MenuContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_int())
    }
}

impl<'de> Deserialize<'de> for MenuContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContextVisitor;

        impl<'de> Visitor<'de> for ContextVisitor {
            type Value = MenuContext;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("0, 1, 2 or one of \"none\", \"page\", \"inline\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<MenuContext, E> {
                match value {
                    0 => Ok(MenuContext::None),
                    1 => Ok(MenuContext::Page),
                    2 => Ok(MenuContext::Inline),
                    other => Err(E::custom(format!("unknown context {other}"))),
                }
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<MenuContext, E> {
                u64::try_from(value)
                    .map_err(|_| E::custom(format!("unknown context {value}")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<MenuContext, E> {
                match value.to_ascii_lowercase().as_str() {
                    "none" => Ok(MenuContext::None),
                    "page" => Ok(MenuContext::Page),
                    "inline" => Ok(MenuContext::Inline),
                    other => Err(E::custom(format!("unknown context '{other}'"))),
                }
            }
        }

        deserializer.deserialize_any(ContextVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_share_breadcrumb_bit() {
        for ty in [
            MenuType::NORMAL_ITEM,
            MenuType::CALLBACK,
            MenuType::LOCAL_TASK,
            MenuType::DEFAULT_LOCAL_TASK,
            MenuType::LOCAL_ACTION,
        ] {
            assert!(ty.is_visible());
        }
    }

    #[test]
    fn test_preset_classification() {
        assert!(!MenuType::NORMAL_ITEM.is_local_task());
        assert!(MenuType::LOCAL_TASK.is_local_task());
        assert!(!MenuType::LOCAL_TASK.links_to_parent());
        assert!(MenuType::LOCAL_ACTION.is_local_action());
        assert!(MenuType::DEFAULT_LOCAL_TASK.links_to_parent());
    }

    #[test]
    fn test_deserialize_int_and_name() {
        let ty: MenuType = serde_json::from_str("140").unwrap();
        assert_eq!(ty, MenuType::DEFAULT_LOCAL_TASK);

        let ty: MenuType = serde_json::from_str("\"local_task\"").unwrap();
        assert_eq!(ty, MenuType::LOCAL_TASK);

        assert!(serde_json::from_str::<MenuType>("\"bogus\"").is_err());
    }

    #[test]
    fn test_serialize_as_bits() {
        assert_eq!(serde_json::to_string(&MenuType::CALLBACK).unwrap(), "4");
        assert_eq!(serde_json::to_string(&MenuContext::Inline).unwrap(), "2");
    }

    #[test]
    fn test_context_from_name() {
        let ctx: MenuContext = serde_json::from_str("\"inline\"").unwrap();
        assert_eq!(ctx, MenuContext::Inline);
        assert_eq!(MenuContext::default(), MenuContext::Page);
    }
}
