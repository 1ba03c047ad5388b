/// Route declarations
///
/// The compiler's only input: one [`RouteDeclaration`] per declared pattern.
/// Every field besides `pattern` is optional and absence matters: an absent
/// page callback is inherited from the parent route, an empty one is not.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::flags::{MenuContext, MenuType};

/// Access callback as written in a declaration
///
/// Declarations may name a function, or give a boolean/integer constant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessValue {
    /// `true` / `false`
    Bool(bool),
    /// `1` / `0` (any non-zero integer grants access)
    Int(i64),
    /// Function name
    Name(String),
}

/// Resolved access callback
///
/// Constants serialize as the integers `0` and `1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessCallback {
    /// Fixed grant or denial
    Constant(bool),
    /// Permission-check function
    Named(String),
}

impl AccessCallback {
    /// Access denied by construction
    pub const DENIED: AccessCallback = AccessCallback::Constant(false);

    /// Whether this is the constant denial
    pub fn is_denied(&self) -> bool {
        *self == Self::DENIED
    }

    /// Function name, if this callback names one
    pub fn name(&self) -> Option<&str> {
        match self {
            AccessCallback::Named(name) => Some(name),
            AccessCallback::Constant(_) => None,
        }
    }
}

impl From<AccessValue> for AccessCallback {
    fn from(value: AccessValue) -> Self {
        match value {
            AccessValue::Bool(granted) => AccessCallback::Constant(granted),
            AccessValue::Int(n) => AccessCallback::Constant(n != 0),
            AccessValue::Name(name) => AccessCallback::Named(name),
        }
    }
}

impl Serialize for AccessCallback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AccessCallback::Constant(granted) => serializer.serialize_u8(u8::from(*granted)),
            AccessCallback::Named(name) => serializer.serialize_str(name),
        }
    }
}

impl<'de> Deserialize<'de> for AccessCallback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        AccessValue::deserialize(deserializer).map(AccessCallback::from)
    }
}

/// A single route declaration
///
/// # Examples
///
/// ```
/// use rmenu_router::{MenuType, RouteDeclaration};
///
/// let decl = RouteDeclaration::new("node/%node/edit")
///     .with_title("Edit")
///     .with_type(MenuType::LOCAL_TASK)
///     .with_page_callback("node_page_edit")
///     .with_page_arguments([serde_json::json!(1)]);
///
/// assert_eq!(decl.pattern, "node/%node/edit");
/// assert_eq!(decl.menu_type, Some(MenuType::LOCAL_TASK));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteDeclaration {
    /// Declared pattern, e.g. `node/%node/edit`
    pub pattern: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub position: Option<String>,
    pub weight: Option<i32>,
    #[serde(rename = "type")]
    pub menu_type: Option<MenuType>,
    pub access_callback: Option<AccessValue>,
    pub access_arguments: Option<Vec<Value>>,
    pub page_callback: Option<String>,
    pub page_arguments: Option<Vec<Value>>,
    pub delivery_callback: Option<String>,
    pub theme_callback: Option<String>,
    pub theme_arguments: Option<Vec<Value>>,
    pub title_callback: Option<String>,
    pub title_arguments: Option<Vec<Value>>,
    /// Extra arguments passed to every loader of this route
    pub load_arguments: Option<Vec<Value>>,
    /// File holding the page callback, relative to `file_path`
    pub file: Option<String>,
    /// Directory of `file`; defaults to the module's base path
    pub file_path: Option<String>,
    pub context: Option<MenuContext>,
    /// Declaring module
    pub module: Option<String>,
}

impl RouteDeclaration {
    /// Creates a declaration with only a pattern
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    // ========================================================================
    // Builder Methods
    // ========================================================================

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_weight(mut self, weight: i32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_type(mut self, menu_type: MenuType) -> Self {
        self.menu_type = Some(menu_type);
        self
    }

    /// Names the access callback function
    pub fn with_access_callback(mut self, callback: impl Into<String>) -> Self {
        self.access_callback = Some(AccessValue::Name(callback.into()));
        self
    }

    /// Grants or denies access unconditionally
    pub fn with_access(mut self, granted: bool) -> Self {
        self.access_callback = Some(AccessValue::Bool(granted));
        self
    }

    pub fn with_access_arguments(mut self, arguments: impl IntoIterator<Item = Value>) -> Self {
        self.access_arguments = Some(arguments.into_iter().collect());
        self
    }

    pub fn with_page_callback(mut self, callback: impl Into<String>) -> Self {
        self.page_callback = Some(callback.into());
        self
    }

    pub fn with_page_arguments(mut self, arguments: impl IntoIterator<Item = Value>) -> Self {
        self.page_arguments = Some(arguments.into_iter().collect());
        self
    }

    pub fn with_delivery_callback(mut self, callback: impl Into<String>) -> Self {
        self.delivery_callback = Some(callback.into());
        self
    }

    pub fn with_theme_callback(mut self, callback: impl Into<String>) -> Self {
        self.theme_callback = Some(callback.into());
        self
    }

    pub fn with_theme_arguments(mut self, arguments: impl IntoIterator<Item = Value>) -> Self {
        self.theme_arguments = Some(arguments.into_iter().collect());
        self
    }

    pub fn with_title_callback(mut self, callback: impl Into<String>) -> Self {
        self.title_callback = Some(callback.into());
        self
    }

    pub fn with_load_arguments(mut self, arguments: impl IntoIterator<Item = Value>) -> Self {
        self.load_arguments = Some(arguments.into_iter().collect());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_context(mut self, context: MenuContext) -> Self {
        self.context = Some(context);
        self
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_access_value_conversion() {
        assert_eq!(AccessCallback::from(AccessValue::Bool(true)), AccessCallback::Constant(true));
        assert_eq!(AccessCallback::from(AccessValue::Int(0)), AccessCallback::DENIED);
        assert_eq!(
            AccessCallback::from(AccessValue::Name("user_access".into())),
            AccessCallback::Named("user_access".into())
        );
    }

    #[test]
    fn test_access_callback_serializes_constants_as_int() {
        assert_eq!(serde_json::to_value(AccessCallback::DENIED).unwrap(), json!(0));
        assert_eq!(serde_json::to_value(AccessCallback::Constant(true)).unwrap(), json!(1));
        assert_eq!(
            serde_json::to_value(AccessCallback::Named("node_access".into())).unwrap(),
            json!("node_access")
        );
    }

    #[test]
    fn test_access_callback_round_trips_from_json() {
        let denied: AccessCallback = serde_json::from_value(json!(0)).unwrap();
        assert!(denied.is_denied());
        let named: AccessCallback = serde_json::from_value(json!("user_access")).unwrap();
        assert_eq!(named.name(), Some("user_access"));
    }

    #[test]
    fn test_declaration_from_json() {
        let decl: RouteDeclaration = serde_json::from_value(json!({
            "pattern": "admin/people",
            "title": "People",
            "type": "local_task",
            "access_callback": true,
            "page_arguments": [1, "list"],
            "context": 2
        }))
        .unwrap();

        assert_eq!(decl.title.as_deref(), Some("People"));
        assert_eq!(decl.menu_type, Some(MenuType::LOCAL_TASK));
        assert_eq!(decl.access_callback, Some(AccessValue::Bool(true)));
        assert_eq!(decl.page_arguments, Some(vec![json!(1), json!("list")]));
        assert_eq!(decl.context, Some(MenuContext::Inline));
        assert_eq!(decl.page_callback, None);
    }

    #[test]
    fn test_declaration_rejects_unknown_fields() {
        let result = serde_json::from_value::<RouteDeclaration>(json!({
            "pattern": "a",
            "page callback": "x"
        }));
        assert!(result.is_err());
    }
}
